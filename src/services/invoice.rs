use chrono::{NaiveDate, Utc};
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Appointment, AppointmentStatus, Invoice, InvoiceDocument, InvoiceLine};

/// Picks the appointment a customer invoice is drawn from: the one booked
/// most recently (highest id), regardless of its calendar date.
pub fn select_for_customer(conn: &Connection, customer_id: i64) -> AppResult<Appointment> {
    if queries::get_customer(conn, customer_id)?.is_none() {
        return Err(AppError::NotFound(format!("customer {customer_id}")));
    }
    queries::latest_appointment_for_customer(conn, customer_id)?
        .ok_or_else(|| AppError::NotFound(format!("appointments for customer {customer_id}")))
}

pub fn format_amount(amount: f64, currency_symbol: &str) -> String {
    format!("{currency_symbol}{amount:.2}")
}

pub fn build_document(
    appointment: &Appointment,
    business_name: &str,
    currency_symbol: &str,
) -> InvoiceDocument {
    let fields = [
        ("Customer", appointment.customer_label()),
        ("Service", appointment.service.clone()),
        ("Staff", appointment.staff_label()),
        ("Date", appointment.date.format("%Y-%m-%d").to_string()),
        ("Time", appointment.time.format("%H:%M").to_string()),
        (
            "Total Amount",
            format_amount(appointment.amount, currency_symbol),
        ),
    ];

    InvoiceDocument {
        appointment_id: appointment.appointment_id,
        title: format!("{business_name} Appointment Invoice"),
        lines: fields
            .into_iter()
            .map(|(label, value)| InvoiceLine {
                label: label.to_string(),
                value,
            })
            .collect(),
        closing: format!("Thank you for visiting {business_name}!"),
    }
}

pub fn render_text(document: &InvoiceDocument) -> String {
    let mut out = String::new();
    out.push_str(&document.title);
    out.push_str("\n\n");
    for line in &document.lines {
        out.push_str(&format!("{}: {}\n", line.label, line.value));
    }
    out.push('\n');
    out.push_str(&document.closing);
    out.push('\n');
    out
}

/// Records an invoice for a single appointment. Cancelled appointments are
/// not billable.
pub fn issue_invoice(
    conn: &Connection,
    appointment_id: i64,
    invoice_date: Option<NaiveDate>,
) -> AppResult<Invoice> {
    let appointment = queries::get_appointment(conn, appointment_id)?
        .ok_or_else(|| AppError::NotFound(format!("appointment {appointment_id}")))?;

    if appointment.status == AppointmentStatus::Cancelled {
        return Err(AppError::Validation(format!(
            "appointment {appointment_id} is cancelled"
        )));
    }

    let invoice_date = invoice_date.unwrap_or_else(|| Utc::now().date_naive());
    let invoice = queries::insert_invoice(conn, appointment_id, &invoice_date, appointment.amount)?;
    tracing::info!(
        invoice_id = invoice.invoice_id,
        appointment_id,
        total = invoice.total_amount,
        "issued invoice"
    );
    Ok(invoice)
}

pub fn list_invoices(conn: &Connection) -> AppResult<Vec<Invoice>> {
    queries::list_invoices(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{NewAppointment, NewCustomer, NewStaff};
    use crate::services::booking;
    use chrono::{NaiveDateTime, NaiveTime};

    fn sample() -> Appointment {
        Appointment {
            appointment_id: 7,
            customer_id: 3,
            customer_name: Some("Priya".to_string()),
            staff_id: 2,
            staff_name: Some("Gudi".to_string()),
            service: "Hair Spa".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            amount: 1500.0,
            status: AppointmentStatus::Scheduled,
            created_at: NaiveDateTime::parse_from_str("2025-03-10 10:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    fn setup() -> (Connection, i64, i64) {
        let conn = db::init_db(":memory:").unwrap();
        let c = booking::register_customer(
            &conn,
            NewCustomer {
                name: "Priya".to_string(),
                phone: None,
                email: None,
            },
        )
        .unwrap();
        let s = booking::register_staff(
            &conn,
            NewStaff {
                name: "Gudi".to_string(),
                specialty: None,
            },
        )
        .unwrap();
        (conn, c, s)
    }

    fn book(conn: &Connection, c: i64, s: i64, date: &str, service: &str) -> i64 {
        booking::book_appointment(
            conn,
            NewAppointment {
                customer_id: c,
                staff_id: s,
                service: service.to_string(),
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                amount: 700.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_document_fields_in_fixed_order() {
        let doc = build_document(&sample(), "Glow", "₹");
        assert_eq!(doc.title, "Glow Appointment Invoice");
        assert_eq!(doc.closing, "Thank you for visiting Glow!");
        assert_eq!(doc.appointment_id, 7);

        let pairs: Vec<(&str, &str)> = doc
            .lines
            .iter()
            .map(|l| (l.label.as_str(), l.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Customer", "Priya"),
                ("Service", "Hair Spa"),
                ("Staff", "Gudi"),
                ("Date", "2025-03-15"),
                ("Time", "14:00"),
                ("Total Amount", "₹1500.00"),
            ]
        );
    }

    #[test]
    fn test_document_is_deterministic() {
        let record = sample();
        assert_eq!(
            build_document(&record, "Glow", "$"),
            build_document(&record, "Glow", "$")
        );
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&build_document(&sample(), "Glow", "$"));
        let expected = "Glow Appointment Invoice\n\n\
                        Customer: Priya\n\
                        Service: Hair Spa\n\
                        Staff: Gudi\n\
                        Date: 2025-03-15\n\
                        Time: 14:00\n\
                        Total Amount: $1500.00\n\n\
                        Thank you for visiting Glow!\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_select_uses_most_recent_booking() {
        let (conn, c, s) = setup();
        book(&conn, c, s, "2025-09-01", "Facial");
        let latest = book(&conn, c, s, "2025-05-01", "Pedicure");

        let selected = select_for_customer(&conn, c).unwrap();
        assert_eq!(selected.appointment_id, latest);
        assert_eq!(selected.service, "Pedicure");
    }

    #[test]
    fn test_select_without_appointments() {
        let (conn, c, _) = setup();
        assert!(matches!(
            select_for_customer(&conn, c),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            select_for_customer(&conn, c + 1),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_issue_invoice_records_amount() {
        let (conn, c, s) = setup();
        let id = book(&conn, c, s, "2025-05-01", "Manicure");
        let date = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();

        let invoice = issue_invoice(&conn, id, Some(date)).unwrap();
        assert_eq!(invoice.appointment_id, id);
        assert_eq!(invoice.total_amount, 700.0);
        assert_eq!(invoice.invoice_date, date);
        assert_eq!(list_invoices(&conn).unwrap(), vec![invoice]);
    }

    #[test]
    fn test_issue_invoice_rejects_cancelled() {
        let (conn, c, s) = setup();
        let id = book(&conn, c, s, "2025-05-01", "Manicure");
        booking::update_appointment_status(&conn, id, AppointmentStatus::Cancelled).unwrap();

        assert!(matches!(
            issue_invoice(&conn, id, None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            issue_invoice(&conn, id + 1, None),
            Err(AppError::NotFound(_))
        ));
    }
}
