use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db::queries::AppointmentFilter;
use crate::errors::{AppError, AppResult};
use crate::handlers::extract::{AppJson, AppPath, AppQuery};
use crate::models::{Appointment, NewAppointment, SERVICE_CATALOG};
use crate::services::{booking, validation};
use crate::state::AppState;

// GET /api/services
pub async fn list_services() -> Json<Vec<&'static str>> {
    Json(SERVICE_CATALOG.to_vec())
}

// GET /api/appointments
#[derive(Deserialize)]
pub struct AppointmentsQuery {
    pub date: Option<String>,
    pub status: Option<String>,
}

impl AppointmentsQuery {
    fn into_filter(self) -> AppResult<AppointmentFilter> {
        let date = match self.date.as_deref().filter(|d| !d.is_empty()) {
            Some(d) => Some(validation::parse_date(d)?),
            None => None,
        };
        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => Some(validation::parse_status(s)?),
            None => None,
        };
        Ok(AppointmentFilter { date, status })
    }
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<AppointmentsQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let filter = query.into_filter()?;
    let appointments = {
        let db = state.conn();
        booking::list_appointments(&db, &filter)?
    };
    Ok(Json(appointments))
}

// POST /api/appointments
#[derive(Deserialize)]
pub struct BookAppointmentRequest {
    pub customer_id: i64,
    pub staff_id: i64,
    pub service: String,
    pub date: String,
    pub time: String,
    pub amount: f64,
}

pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = NewAppointment {
        customer_id: body.customer_id,
        staff_id: body.staff_id,
        service: body.service,
        date: validation::parse_date(&body.date)?,
        time: validation::parse_time(&body.time)?,
        amount: body.amount,
    };

    let booked = {
        let db = state.conn();
        let id = booking::book_appointment(&db, appointment)?;
        booking::get_appointment(&db, id)?
    };
    Ok((StatusCode::CREATED, Json(booked)))
}

// GET /api/appointments/:id
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = {
        let db = state.conn();
        booking::get_appointment(&db, id)?
    };
    Ok(Json(appointment))
}

// POST /api/appointments/:id/status
#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<StatusUpdateRequest>,
) -> Result<Json<Appointment>, AppError> {
    let status = validation::parse_status(&body.status)?;
    let appointment = {
        let db = state.conn();
        booking::update_appointment_status(&db, id, status)?
    };
    Ok(Json(appointment))
}
