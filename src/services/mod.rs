pub mod booking;
pub mod invoice;
pub mod reporting;
pub mod validation;
