pub mod models;
pub mod services;

pub use models::{AppointmentRecord, Bill, BillItem, Medication, Prescription};
pub use services::history::HistoryService;
