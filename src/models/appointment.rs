use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Suggested service labels offered when booking. Appointments may carry any
/// non-empty label.
pub const SERVICE_CATALOG: &[&str] = &[
    "Haircut", "Facial", "Manicure", "Pedicure", "Makeup", "Hair Spa",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(AppointmentStatus::Scheduled),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }

    /// Scheduled appointments may be completed or cancelled. Re-applying the
    /// current status is always allowed so updates stay idempotent.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        *self == next || !self.is_terminal()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub customer_id: i64,
    pub staff_id: i64,
    pub service: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub amount: f64,
}

/// An appointment row joined with the customer and staff names. Names are
/// `None` when the referenced row no longer resolves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub appointment_id: i64,
    pub customer_id: i64,
    pub customer_name: Option<String>,
    pub staff_id: i64,
    pub staff_name: Option<String>,
    pub service: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub amount: f64,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    pub fn staff_label(&self) -> String {
        self.staff_name
            .clone()
            .unwrap_or_else(|| format!("staff #{}", self.staff_id))
    }

    pub fn customer_label(&self) -> String {
        self.customer_name
            .clone()
            .unwrap_or_else(|| format!("customer #{}", self.customer_id))
    }
}

pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
