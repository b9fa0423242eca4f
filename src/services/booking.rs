use chrono::{NaiveDateTime, Utc};
use rusqlite::Connection;

use crate::db::queries::{self, AppointmentFilter};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Appointment, AppointmentStatus, Customer, NewAppointment, NewCustomer, NewStaff, Staff,
};
use crate::services::validation;

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn register_customer(conn: &Connection, customer: NewCustomer) -> AppResult<i64> {
    let customer = NewCustomer {
        name: validation::require_name("customer name", &customer.name)?,
        phone: validation::optional_text(customer.phone),
        email: validation::optional_text(customer.email),
    };

    let id = queries::insert_customer(conn, &customer, &now())?;
    tracing::info!(customer_id = id, name = %customer.name, "registered customer");
    Ok(id)
}

pub fn register_staff(conn: &Connection, staff: NewStaff) -> AppResult<i64> {
    let staff = NewStaff {
        name: validation::require_name("staff name", &staff.name)?,
        specialty: validation::optional_text(staff.specialty),
    };

    let id = queries::insert_staff(conn, &staff, &now())?;
    tracing::info!(staff_id = id, name = %staff.name, "registered staff");
    Ok(id)
}

pub fn list_customers(conn: &Connection) -> AppResult<Vec<Customer>> {
    queries::list_customers(conn)
}

pub fn list_staff(conn: &Connection) -> AppResult<Vec<Staff>> {
    queries::list_staff(conn)
}

/// Books a new appointment in the `scheduled` state. Date conflicts and
/// past dates are not checked.
pub fn book_appointment(conn: &Connection, appointment: NewAppointment) -> AppResult<i64> {
    let appointment = NewAppointment {
        service: validation::require_name("service", &appointment.service)?,
        amount: validation::require_amount(appointment.amount)?,
        ..appointment
    };

    if queries::get_customer(conn, appointment.customer_id)?.is_none() {
        return Err(AppError::Validation(format!(
            "unknown customer {}",
            appointment.customer_id
        )));
    }
    if queries::get_staff(conn, appointment.staff_id)?.is_none() {
        return Err(AppError::Validation(format!(
            "unknown staff member {}",
            appointment.staff_id
        )));
    }

    let id = queries::insert_appointment(conn, &appointment, &now())?;
    tracing::info!(
        appointment_id = id,
        customer_id = appointment.customer_id,
        staff_id = appointment.staff_id,
        service = %appointment.service,
        date = %appointment.date,
        "booked appointment"
    );
    Ok(id)
}

pub fn list_appointments(conn: &Connection, filter: &AppointmentFilter) -> AppResult<Vec<Appointment>> {
    queries::list_appointments(conn, filter)
}

pub fn get_appointment(conn: &Connection, id: i64) -> AppResult<Appointment> {
    queries::get_appointment(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))
}

/// Moves an appointment along `scheduled -> completed | cancelled`.
/// Re-applying the current status leaves the row untouched.
pub fn update_appointment_status(
    conn: &Connection,
    id: i64,
    status: AppointmentStatus,
) -> AppResult<Appointment> {
    let mut appointment = get_appointment(conn, id)?;

    if appointment.status == status {
        return Ok(appointment);
    }
    if !appointment.status.can_transition_to(status) {
        tracing::warn!(
            appointment_id = id,
            from = appointment.status.as_str(),
            to = status.as_str(),
            "rejected status transition"
        );
        return Err(AppError::InvalidTransition {
            from: appointment.status,
            to: status,
        });
    }

    if !queries::update_appointment_status(conn, id, status)? {
        return Err(AppError::NotFound(format!("appointment {id}")));
    }
    tracing::info!(
        appointment_id = id,
        from = appointment.status.as_str(),
        to = status.as_str(),
        "updated appointment status"
    );

    appointment.status = status;
    Ok(appointment)
}
