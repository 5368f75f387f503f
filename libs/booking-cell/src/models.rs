use std::time::Duration;

use availability_cell::models::TokenSlot;
use payment_cell::CloseOutcome;

/// How long the booking-success notice stays up before the page resets.
/// Cosmetic only; it starts after every network operation for the booking
/// has completed.
pub const SUCCESS_NOTICE: Duration = Duration::from_secs(5);

/// Where one booking attempt currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingState {
    Idle,
    TokenSelected(TokenSlot),
    PaymentOpen(TokenSlot),
    Succeeded { appointment_id: i64 },
}

/// How a payment modal session ended, as seen by the booking page.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Succeeded { appointment_id: i64 },
    Abandoned(CloseOutcome),
}
