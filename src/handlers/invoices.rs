use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::handlers::extract::{AppPath, AppQuery};
use crate::models::{Invoice, InvoiceDocument};
use crate::services::{invoice, validation};
use crate::state::AppState;

fn customer_document(state: &AppState, customer_id: i64) -> Result<InvoiceDocument, AppError> {
    let appointment = {
        let db = state.conn();
        invoice::select_for_customer(&db, customer_id)?
    };
    Ok(invoice::build_document(
        &appointment,
        &state.config.business_name,
        &state.config.currency_symbol,
    ))
}

// GET /api/customers/:id/invoice
pub async fn customer_invoice(
    State(state): State<Arc<AppState>>,
    AppPath(customer_id): AppPath<i64>,
) -> Result<Json<InvoiceDocument>, AppError> {
    Ok(Json(customer_document(&state, customer_id)?))
}

// GET /api/customers/:id/invoice.txt
pub async fn customer_invoice_text(
    State(state): State<Arc<AppState>>,
    AppPath(customer_id): AppPath<i64>,
) -> Result<Response, AppError> {
    let document = customer_document(&state, customer_id)?;
    let filename = format!("invoice-{}.txt", document.appointment_id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        invoice::render_text(&document),
    )
        .into_response())
}

// POST /api/appointments/:id/invoice
#[derive(Deserialize)]
pub struct IssueInvoiceQuery {
    pub date: Option<String>,
}

pub async fn issue_invoice(
    State(state): State<Arc<AppState>>,
    AppPath(appointment_id): AppPath<i64>,
    AppQuery(query): AppQuery<IssueInvoiceQuery>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    let invoice_date = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => Some(validation::parse_date(d)?),
        None => None,
    };
    let issued = {
        let db = state.conn();
        invoice::issue_invoice(&db, appointment_id, invoice_date)?
    };
    Ok((StatusCode::CREATED, Json(issued)))
}

// GET /api/invoices
pub async fn list_invoices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    let invoices = {
        let db = state.conn();
        invoice::list_invoices(&db)?
    };
    Ok(Json(invoices))
}
