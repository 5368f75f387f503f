use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, info, warn};

use availability_cell::models::{Doctor, TokenSlot};
use availability_cell::AvailabilitySelector;
use payment_cell::{
    CheckoutService, CoordinatorError, CoordinatorState, IntakePolicy, PaymentCoordinator,
    PaymentGateway,
};
use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::ApiError;

use crate::models::{BookingOutcome, BookingState, SUCCESS_NOTICE};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("No token slot is selected")]
    NoTokenSelected,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

/// Drives one booking attempt on a doctor's page, from token selection
/// through the payment modal to the post-success notice.
///
/// The state only advances to `PaymentOpen` once a payment intent exists,
/// and only reaches `Succeeded` when the coordinator reports a confirmed
/// appointment. Every other way out of the modal returns the page to its
/// pre-payment state and releases the reservation.
pub struct BookingSession {
    api: Arc<ApiClient>,
    config: AppConfig,
    selector: Arc<AvailabilitySelector>,
    doctor: Doctor,
    state: Mutex<BookingState>,
}

impl BookingSession {
    pub fn new(
        api: Arc<ApiClient>,
        config: AppConfig,
        selector: Arc<AvailabilitySelector>,
        doctor: Doctor,
    ) -> Self {
        Self {
            api,
            config,
            selector,
            doctor,
            state: Mutex::new(BookingState::Idle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BookingState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Pick a token slot from the currently loaded list. Discards any
    /// previous selection, including a lingering success notice. Ignored
    /// while a payment modal is open; the modal owns the flow then.
    pub fn select_token(&self, token: TokenSlot) {
        let mut state = self.lock();
        match *state {
            BookingState::PaymentOpen(_) => {
                debug!("Ignoring token selection while the payment modal is open");
            }
            _ => {
                debug!("Token {} selected", token.id);
                *state = BookingState::TokenSelected(token);
            }
        }
    }

    /// Reserve the selected token and open the payment modal.
    ///
    /// Creates the payment intent first; if that fails the page stays on
    /// `TokenSelected` so the patient can retry.
    pub async fn open_payment(
        &self,
        gateway: Option<Arc<dyn PaymentGateway>>,
        policy: IntakePolicy,
    ) -> Result<PaymentCoordinator, BookingError> {
        let token = match &*self.lock() {
            BookingState::TokenSelected(token) => token.clone(),
            _ => return Err(BookingError::NoTokenSelected),
        };

        let checkout = CheckoutService::new(self.api.clone());
        let intent = match checkout.create_payment_intent(token.id).await {
            Ok(intent) => intent,
            Err(err) => {
                warn!("Payment intent creation failed: {}", err);
                return Err(err.into());
            }
        };

        info!(
            "Payment {} created for token {}, opening payment modal",
            intent.payment_id, token.id
        );
        *self.lock() = BookingState::PaymentOpen(token.clone());

        let coordinator = PaymentCoordinator::new(
            checkout,
            gateway,
            &self.config,
            Some(token),
            self.doctor.clone(),
            intent,
            policy,
        )?;
        Ok(coordinator)
    }

    /// Fold the finished payment modal back into the page state.
    ///
    /// On a confirmed appointment the calendar panel is reset for the next
    /// booking. Anything else counts as abandonment: the coordinator is
    /// closed, releasing the reservation best-effort.
    pub async fn finish(&self, coordinator: &PaymentCoordinator) -> BookingOutcome {
        if let CoordinatorState::Succeeded { appointment_id } = coordinator.state() {
            info!("Booking succeeded, appointment {}", appointment_id);
            *self.lock() = BookingState::Succeeded { appointment_id };
            self.selector.reset();
            return BookingOutcome::Succeeded { appointment_id };
        }

        let released = coordinator.close().await;
        *self.lock() = BookingState::Idle;
        BookingOutcome::Abandoned(released)
    }

    /// Let the success notice linger, then clear it. No-op unless the page
    /// is showing a success.
    pub async fn auto_dismiss(&self) {
        tokio::time::sleep(SUCCESS_NOTICE).await;
        self.dismiss();
    }

    /// Clear the success notice immediately.
    pub fn dismiss(&self) {
        let mut state = self.lock();
        if matches!(*state, BookingState::Succeeded { .. }) {
            *state = BookingState::Idle;
        }
    }

    pub fn state(&self) -> BookingState {
        self.lock().clone()
    }
}
