use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::handlers::extract::AppJson;
use crate::models::{Customer, NewCustomer};
use crate::services::booking;
use crate::state::AppState;

// GET /api/customers
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = {
        let db = state.conn();
        booking::list_customers(&db)?
    };
    Ok(Json(customers))
}

// POST /api/customers
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<NewCustomer>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let id = {
        let db = state.conn();
        booking::register_customer(&db, body)?
    };
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "customer_id": id })),
    ))
}
