use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::AppResult;
use crate::models::{
    Appointment, AppointmentStatus, Customer, Invoice, NewAppointment, NewCustomer, NewStaff,
    Staff,
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

fn column_error(idx: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn get_timestamp(row: &Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(|e| column_error(idx, e))
}

fn get_date(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| column_error(idx, e))
}

fn get_time(row: &Row, idx: usize) -> rusqlite::Result<NaiveTime> {
    let raw: String = row.get(idx)?;
    NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(|e| column_error(idx, e))
}

fn get_status(row: &Row, idx: usize) -> rusqlite::Result<AppointmentStatus> {
    let raw: String = row.get(idx)?;
    AppointmentStatus::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown appointment status: {raw}").into(),
        )
    })
}

// ── Customers ──

pub fn insert_customer(
    conn: &Connection,
    customer: &NewCustomer,
    created_at: &NaiveDateTime,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO customers (name, phone, email, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            customer.name,
            customer.phone,
            customer.email,
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn parse_customer_row(row: &Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        customer_id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        created_at: get_timestamp(row, 4)?,
    })
}

pub fn get_customer(conn: &Connection, id: i64) -> AppResult<Option<Customer>> {
    let customer = conn
        .query_row(
            "SELECT customer_id, name, phone, email, created_at FROM customers WHERE customer_id = ?1",
            params![id],
            parse_customer_row,
        )
        .optional()?;
    Ok(customer)
}

pub fn list_customers(conn: &Connection) -> AppResult<Vec<Customer>> {
    let mut stmt = conn.prepare(
        "SELECT customer_id, name, phone, email, created_at FROM customers ORDER BY name, customer_id",
    )?;
    let rows = stmt.query_map([], parse_customer_row)?;

    let mut customers = vec![];
    for row in rows {
        customers.push(row?);
    }
    Ok(customers)
}

// ── Staff ──

pub fn insert_staff(conn: &Connection, staff: &NewStaff, created_at: &NaiveDateTime) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO staff (name, specialty, created_at) VALUES (?1, ?2, ?3)",
        params![
            staff.name,
            staff.specialty,
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn parse_staff_row(row: &Row) -> rusqlite::Result<Staff> {
    Ok(Staff {
        staff_id: row.get(0)?,
        name: row.get(1)?,
        specialty: row.get(2)?,
        created_at: get_timestamp(row, 3)?,
    })
}

pub fn get_staff(conn: &Connection, id: i64) -> AppResult<Option<Staff>> {
    let staff = conn
        .query_row(
            "SELECT staff_id, name, specialty, created_at FROM staff WHERE staff_id = ?1",
            params![id],
            parse_staff_row,
        )
        .optional()?;
    Ok(staff)
}

pub fn list_staff(conn: &Connection) -> AppResult<Vec<Staff>> {
    let mut stmt = conn
        .prepare("SELECT staff_id, name, specialty, created_at FROM staff ORDER BY name, staff_id")?;
    let rows = stmt.query_map([], parse_staff_row)?;

    let mut staff = vec![];
    for row in rows {
        staff.push(row?);
    }
    Ok(staff)
}

// ── Appointments ──

const APPOINTMENT_SELECT: &str = "SELECT a.appointment_id, a.customer_id, c.name, a.staff_id, s.name, \
     a.service, a.date, a.time, a.amount, a.status, a.created_at \
     FROM appointments a \
     LEFT JOIN customers c ON a.customer_id = c.customer_id \
     LEFT JOIN staff s ON a.staff_id = s.staff_id";

/// Exact-match filters for listing appointments. Unset fields match all rows.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

pub fn insert_appointment(
    conn: &Connection,
    appointment: &NewAppointment,
    created_at: &NaiveDateTime,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO appointments (customer_id, staff_id, service, date, time, amount, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            appointment.customer_id,
            appointment.staff_id,
            appointment.service,
            appointment.date.format(DATE_FORMAT).to_string(),
            appointment.time.format(TIME_FORMAT).to_string(),
            appointment.amount,
            AppointmentStatus::Scheduled.as_str(),
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn parse_appointment_row(row: &Row) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        appointment_id: row.get(0)?,
        customer_id: row.get(1)?,
        customer_name: row.get(2)?,
        staff_id: row.get(3)?,
        staff_name: row.get(4)?,
        service: row.get(5)?,
        date: get_date(row, 6)?,
        time: get_time(row, 7)?,
        amount: row.get(8)?,
        status: get_status(row, 9)?,
        created_at: get_timestamp(row, 10)?,
    })
}

pub fn get_appointment(conn: &Connection, id: i64) -> AppResult<Option<Appointment>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE a.appointment_id = ?1");
    let appointment = conn
        .query_row(&sql, params![id], parse_appointment_row)
        .optional()?;
    Ok(appointment)
}

pub fn list_appointments(conn: &Connection, filter: &AppointmentFilter) -> AppResult<Vec<Appointment>> {
    let mut conditions: Vec<String> = vec![];
    let mut params_vec: Vec<Box<dyn ToSql>> = vec![];

    if let Some(date) = filter.date {
        params_vec.push(Box::new(date.format(DATE_FORMAT).to_string()));
        conditions.push(format!("a.date = ?{}", params_vec.len()));
    }
    if let Some(status) = filter.status {
        params_vec.push(Box::new(status.as_str()));
        conditions.push(format!("a.status = ?{}", params_vec.len()));
    }

    let mut sql = APPOINTMENT_SELECT.to_string();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY a.date ASC, a.time ASC, a.appointment_id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), parse_appointment_row)?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row?);
    }
    Ok(appointments)
}

/// The most recently inserted appointment for a customer.
pub fn latest_appointment_for_customer(
    conn: &Connection,
    customer_id: i64,
) -> AppResult<Option<Appointment>> {
    let sql = format!(
        "{APPOINTMENT_SELECT} WHERE a.customer_id = ?1 ORDER BY a.appointment_id DESC LIMIT 1"
    );
    let appointment = conn
        .query_row(&sql, params![customer_id], parse_appointment_row)
        .optional()?;
    Ok(appointment)
}

pub fn update_appointment_status(
    conn: &Connection,
    id: i64,
    status: AppointmentStatus,
) -> AppResult<bool> {
    let count = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE appointment_id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

// ── Invoices ──

fn parse_invoice_row(row: &Row) -> rusqlite::Result<Invoice> {
    Ok(Invoice {
        invoice_id: row.get(0)?,
        appointment_id: row.get(1)?,
        invoice_date: get_date(row, 2)?,
        total_amount: row.get(3)?,
    })
}

pub fn insert_invoice(
    conn: &Connection,
    appointment_id: i64,
    invoice_date: &NaiveDate,
    total_amount: f64,
) -> AppResult<Invoice> {
    conn.execute(
        "INSERT INTO invoices (appointment_id, invoice_date, total_amount) VALUES (?1, ?2, ?3)",
        params![
            appointment_id,
            invoice_date.format(DATE_FORMAT).to_string(),
            total_amount,
        ],
    )?;
    Ok(Invoice {
        invoice_id: conn.last_insert_rowid(),
        appointment_id,
        invoice_date: *invoice_date,
        total_amount,
    })
}

pub fn list_invoices(conn: &Connection) -> AppResult<Vec<Invoice>> {
    let mut stmt = conn.prepare(
        "SELECT invoice_id, appointment_id, invoice_date, total_amount FROM invoices ORDER BY invoice_id DESC",
    )?;
    let rows = stmt.query_map([], parse_invoice_row)?;

    let mut invoices = vec![];
    for row in rows {
        invoices.push(row?);
    }
    Ok(invoices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-06-01 09:00:00", TIMESTAMP_FORMAT).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, TIME_FORMAT).unwrap()
    }

    fn seed_people(conn: &Connection) -> (i64, i64) {
        let customer = NewCustomer {
            name: "Meera".to_string(),
            phone: Some("9876543210".to_string()),
            email: None,
        };
        let staff = NewStaff {
            name: "Bharti".to_string(),
            specialty: Some("Hair".to_string()),
        };
        (
            insert_customer(conn, &customer, &now()).unwrap(),
            insert_staff(conn, &staff, &now()).unwrap(),
        )
    }

    fn book(conn: &Connection, customer_id: i64, staff_id: i64, d: &str, t: &str, amount: f64) -> i64 {
        let appt = NewAppointment {
            customer_id,
            staff_id,
            service: "Haircut".to_string(),
            date: date(d),
            time: time(t),
            amount,
        };
        insert_appointment(conn, &appt, &now()).unwrap()
    }

    #[test]
    fn test_customer_insert_and_get() {
        let conn = setup_db();
        let (customer_id, _) = seed_people(&conn);

        let customer = get_customer(&conn, customer_id).unwrap().unwrap();
        assert_eq!(customer.name, "Meera");
        assert_eq!(customer.phone.as_deref(), Some("9876543210"));
        assert_eq!(customer.email, None);
        assert_eq!(customer.created_at, now());

        assert!(get_customer(&conn, customer_id + 100).unwrap().is_none());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let conn = setup_db();
        let (first, _) = seed_people(&conn);
        conn.execute("DELETE FROM customers WHERE customer_id = ?1", params![first])
            .unwrap();
        let (second, _) = seed_people(&conn);
        assert!(second > first);
    }

    #[test]
    fn test_appointment_join_and_order() {
        let conn = setup_db();
        let (c, s) = seed_people(&conn);
        let late = book(&conn, c, s, "2025-06-02", "15:00", 300.0);
        let early = book(&conn, c, s, "2025-06-02", "09:30", 100.0);
        let next_day = book(&conn, c, s, "2025-06-03", "08:00", 200.0);

        let all = list_appointments(&conn, &AppointmentFilter::default()).unwrap();
        let ids: Vec<i64> = all.iter().map(|a| a.appointment_id).collect();
        assert_eq!(ids, vec![early, late, next_day]);
        assert_eq!(all[0].customer_name.as_deref(), Some("Meera"));
        assert_eq!(all[0].staff_name.as_deref(), Some("Bharti"));
        assert_eq!(all[0].status, AppointmentStatus::Scheduled);
        assert_eq!(all[0].time, time("09:30"));
    }

    #[test]
    fn test_latest_appointment_is_highest_id() {
        let conn = setup_db();
        let (c, s) = seed_people(&conn);
        book(&conn, c, s, "2025-07-01", "10:00", 100.0);
        let newest = book(&conn, c, s, "2025-06-01", "10:00", 150.0);

        let latest = latest_appointment_for_customer(&conn, c).unwrap().unwrap();
        assert_eq!(latest.appointment_id, newest);
        assert!(latest_appointment_for_customer(&conn, c + 1).unwrap().is_none());
    }

    #[test]
    fn test_update_status_reports_missing_row() {
        let conn = setup_db();
        let (c, s) = seed_people(&conn);
        let id = book(&conn, c, s, "2025-06-02", "10:00", 100.0);

        assert!(update_appointment_status(&conn, id, AppointmentStatus::Completed).unwrap());
        assert!(!update_appointment_status(&conn, id + 1, AppointmentStatus::Completed).unwrap());
        let appt = get_appointment(&conn, id).unwrap().unwrap();
        assert_eq!(appt.status, AppointmentStatus::Completed);
    }

    #[test]
    fn test_invoice_insert_and_list() {
        let conn = setup_db();
        let (c, s) = seed_people(&conn);
        let id = book(&conn, c, s, "2025-06-02", "10:00", 450.0);

        let first = insert_invoice(&conn, id, &date("2025-06-02"), 450.0).unwrap();
        let second = insert_invoice(&conn, id, &date("2025-06-03"), 450.0).unwrap();

        let invoices = list_invoices(&conn).unwrap();
        assert_eq!(invoices, vec![second, first]);
    }
}
