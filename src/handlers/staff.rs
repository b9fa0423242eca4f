use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::handlers::extract::AppJson;
use crate::models::{NewStaff, Staff};
use crate::services::booking;
use crate::state::AppState;

// GET /api/staff
pub async fn list_staff(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Staff>>, AppError> {
    let staff = {
        let db = state.conn();
        booking::list_staff(&db)?
    };
    Ok(Json(staff))
}

// POST /api/staff
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<NewStaff>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let id = {
        let db = state.conn();
        booking::register_staff(&db, body)?
    };
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "staff_id": id }))))
}
