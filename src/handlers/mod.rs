pub mod appointments;
pub mod customers;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod invoices;
pub mod staff;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/api/customers/:id/invoice",
            get(invoices::customer_invoice),
        )
        .route(
            "/api/customers/:id/invoice.txt",
            get(invoices::customer_invoice_text),
        )
        .route(
            "/api/staff",
            get(staff::list_staff).post(staff::create_staff),
        )
        .route("/api/services", get(appointments::list_services))
        .route(
            "/api/appointments",
            get(appointments::list_appointments).post(appointments::book_appointment),
        )
        .route("/api/appointments/:id", get(appointments::get_appointment))
        .route(
            "/api/appointments/:id/status",
            post(appointments::update_status),
        )
        .route(
            "/api/appointments/:id/invoice",
            post(invoices::issue_invoice),
        )
        .route("/api/invoices", get(invoices::list_invoices))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .with_state(state)
}
