pub mod appointment;
pub mod customer;
pub mod invoice;
pub mod report;
pub mod staff;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment, SERVICE_CATALOG};
pub use customer::{Customer, NewCustomer};
pub use invoice::{Invoice, InvoiceDocument, InvoiceLine};
pub use report::{DashboardReport, StaffPerformance};
pub use staff::{NewStaff, Staff};
