use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::db::queries::{self, AppointmentFilter};
use crate::errors::AppResult;
use crate::models::{Appointment, AppointmentStatus, DashboardReport, StaffPerformance};

/// Loads the full appointment history and summarizes it.
pub fn dashboard(conn: &Connection) -> AppResult<DashboardReport> {
    let appointments = queries::list_appointments(conn, &AppointmentFilter::default())?;
    Ok(summarize(&appointments))
}

pub fn summarize(appointments: &[Appointment]) -> DashboardReport {
    let revenue_by_staff = revenue_by_staff(appointments);
    let top_performer = top_performer(appointments).map(|(staff_name, appointment_count)| {
        let revenue = revenue_by_staff.get(&staff_name).copied().unwrap_or(0.0);
        StaffPerformance {
            staff_name,
            appointment_count,
            revenue,
        }
    });

    DashboardReport {
        total_appointments: appointments.len() as i64,
        total_revenue: total_revenue(appointments),
        realized_revenue: realized_revenue(appointments),
        top_performer,
        revenue_by_staff,
        appointments_by_service: count_by_service(appointments),
    }
}

/// Sum of every amount, cancelled appointments included.
pub fn total_revenue(appointments: &[Appointment]) -> f64 {
    appointments.iter().fold(0.0, |acc, a| acc + a.amount)
}

pub fn realized_revenue(appointments: &[Appointment]) -> f64 {
    appointments
        .iter()
        .filter(|a| a.status != AppointmentStatus::Cancelled)
        .fold(0.0, |acc, a| acc + a.amount)
}

pub fn count_by_staff(appointments: &[Appointment]) -> BTreeMap<String, i64> {
    let mut counts = BTreeMap::new();
    for a in appointments {
        *counts.entry(a.staff_label()).or_insert(0) += 1;
    }
    counts
}

/// Staff member with the most appointments. Ties go to the name that sorts
/// first.
pub fn top_performer(appointments: &[Appointment]) -> Option<(String, i64)> {
    count_by_staff(appointments)
        .into_iter()
        .fold(None, |best, (name, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((name, count)),
        })
}

pub fn revenue_by_staff(appointments: &[Appointment]) -> BTreeMap<String, f64> {
    let mut revenue = BTreeMap::new();
    for a in appointments {
        *revenue.entry(a.staff_label()).or_insert(0.0) += a.amount;
    }
    revenue
}

pub fn count_by_service(appointments: &[Appointment]) -> BTreeMap<String, i64> {
    let mut counts = BTreeMap::new();
    for a in appointments {
        *counts.entry(a.service.clone()).or_insert(0) += 1;
    }
    counts
}
