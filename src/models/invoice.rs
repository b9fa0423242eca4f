use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An issued invoice row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub invoice_id: i64,
    pub appointment_id: i64,
    pub invoice_date: NaiveDate,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceLine {
    pub label: String,
    pub value: String,
}

/// Renderer-agnostic invoice: a title, ordered labeled fields and a closing
/// line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceDocument {
    pub appointment_id: i64,
    pub title: String,
    pub lines: Vec<InvoiceLine>,
    pub closing: String,
}
