use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffPerformance {
    pub staff_name: String,
    pub appointment_count: i64,
    pub revenue: f64,
}

/// Dashboard metrics over the full appointment history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardReport {
    pub total_appointments: i64,
    pub total_revenue: f64,
    /// Revenue excluding cancelled appointments.
    pub realized_revenue: f64,
    /// `None` when there are no appointments.
    pub top_performer: Option<StaffPerformance>,
    pub revenue_by_staff: BTreeMap<String, f64>,
    pub appointments_by_service: BTreeMap<String, i64>,
}

impl DashboardReport {
    pub fn has_data(&self) -> bool {
        self.total_appointments > 0
    }
}
