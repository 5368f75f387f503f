pub mod models;
pub mod services;

pub use models::{BookingOutcome, BookingState, SUCCESS_NOTICE};
pub use services::session::{BookingError, BookingSession};
