pub mod models;
pub mod services;

pub use models::{AvailabilityEntry, Doctor, DoctorDetail, Hospital, TokenSlot};
pub use services::availability::{available_dates, query_date};
pub use services::doctor::DoctorService;
pub use services::selector::{AvailabilitySelector, DateSelection};
