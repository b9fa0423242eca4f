use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::DashboardReport;
use crate::services::reporting;
use crate::state::AppState;

// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardReport>, AppError> {
    let report = {
        let db = state.conn();
        reporting::dashboard(&db)?
    };
    Ok(Json(report))
}
