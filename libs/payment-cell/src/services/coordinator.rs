use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use availability_cell::models::{Doctor, TokenSlot};
use shared_config::AppConfig;

use crate::models::{
    ConfirmAppointmentRequest, CoordinatorState, IntakeForm, IntakePolicy, PaymentIntent,
};
use crate::services::checkout::CheckoutService;
use crate::services::gateway::PaymentGateway;

/// How long the success state stays visible before the modal auto-closes.
/// Purely cosmetic; every network operation has already completed.
pub const SUCCESS_CLOSE_DELAY: Duration = Duration::from_secs(2);

pub const NOT_READY_MESSAGE: &str =
    "The payment form is still loading. Please try again in a moment.";
pub const PAYMENT_INCOMPLETE_MESSAGE: &str = "Payment was not completed. Please try again.";
pub const REASON_REQUIRED_MESSAGE: &str = "Please enter a reason for your visit.";
pub const CONFIRM_FALLBACK_MESSAGE: &str =
    "Could not confirm the appointment. Please contact the clinic.";

#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("No appointment token was provided. Please close this window and pick a slot again.")]
    MissingToken,
}

/// Result of a charge submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Gateway not initialized; nothing was attempted.
    NotReady,
    /// The card entry step is already over (charge succeeded, appointment
    /// confirmed, or modal closed); nothing was attempted.
    NotCollecting,
    /// Intake must be collected first under `IntakePolicy::BeforeCharge`.
    IntakeRequired,
    /// A submission is already in flight; this call was a no-op.
    AlreadyInFlight,
    /// Gateway reported an error; its message is shown verbatim.
    Declined(String),
    /// Charge went through but the intent did not reach "succeeded".
    Incomplete,
    /// Charge succeeded; the intake step is next.
    AwaitingIntake,
    /// Charge and backend confirm both succeeded (`BeforeCharge` only).
    Confirmed(i64),
    /// Charge succeeded but the backend rejected the confirm.
    Rejected(String),
}

/// Result of an intake submission.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
    /// Reason was empty after trimming.
    InvalidReason,
    /// Intake stored ahead of the charge (`BeforeCharge` only).
    Stored,
    /// No succeeded charge yet; the confirm call is not reachable.
    NotCharged,
    /// A submission is already in flight; this call was a no-op.
    AlreadyInFlight,
    Confirmed(i64),
    Rejected(String),
}

/// Result of closing the modal.
#[derive(Debug, Clone, PartialEq)]
pub enum CloseOutcome {
    /// Nothing to release (already confirmed or already closed).
    Clean,
    /// The reserved payment/token was released.
    Released,
    /// The release call failed; surfaced as a non-blocking notice.
    ReleaseFailed(String),
}

struct Inner {
    state: CoordinatorState,
    error: Option<String>,
    intake: Option<IntakeForm>,
}

/// Drives one payment modal session: charge confirmation at the gateway,
/// post-payment intake, backend appointment confirmation, and best-effort
/// release on abandonment.
///
/// The charge must reach "succeeded" before the backend confirm call becomes
/// reachable; an appointment is never confirmed without a succeeded charge.
pub struct PaymentCoordinator {
    checkout: CheckoutService,
    gateway: Option<Arc<dyn PaymentGateway>>,
    token: TokenSlot,
    doctor: Doctor,
    intent: PaymentIntent,
    policy: IntakePolicy,
    success_code: i64,
    return_url: String,
    inner: Mutex<Inner>,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for PaymentCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentCoordinator")
            .field("token", &self.token)
            .field("intent", &self.intent)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PaymentCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        checkout: CheckoutService,
        gateway: Option<Arc<dyn PaymentGateway>>,
        config: &AppConfig,
        token: Option<TokenSlot>,
        doctor: Doctor,
        intent: PaymentIntent,
        policy: IntakePolicy,
    ) -> Result<Self, CoordinatorError> {
        let token = token.ok_or(CoordinatorError::MissingToken)?;

        Ok(Self {
            checkout,
            gateway,
            token,
            doctor,
            intent,
            policy,
            success_code: config.confirm_success_code,
            return_url: config.payment_return_url.clone(),
            inner: Mutex::new(Inner {
                state: CoordinatorState::Collecting,
                error: None,
                intake: None,
            }),
            in_flight: AtomicBool::new(false),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_error(&self, message: &str) {
        self.lock().error = Some(message.to_string());
    }

    /// Registration fee plus consultation fee; missing or non-finite fees
    /// count as zero so the displayed amount is always a number.
    pub fn total_due(&self) -> f64 {
        fee(self.doctor.hospital.registration_fee) + fee(self.doctor.consultation_fee)
    }

    /// Confirm the charge at the gateway. Only reachable from the card
    /// entry step; once a charge has succeeded the session never returns
    /// to it.
    pub async fn submit_payment(&self) -> SubmitOutcome {
        if self.lock().state != CoordinatorState::Collecting {
            debug!("Ignoring charge submission outside the card entry step");
            return SubmitOutcome::NotCollecting;
        }

        let Some(gateway) = self.gateway.clone() else {
            self.set_error(NOT_READY_MESSAGE);
            return SubmitOutcome::NotReady;
        };

        if self.policy == IntakePolicy::BeforeCharge && self.lock().intake.is_none() {
            self.set_error(REASON_REQUIRED_MESSAGE);
            return SubmitOutcome::IntakeRequired;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Charge submission already in flight, ignoring");
            return SubmitOutcome::AlreadyInFlight;
        }

        let result = gateway
            .confirm_payment(&self.intent.client_secret, &self.return_url)
            .await;

        let outcome = match result {
            Err(gateway_error) => {
                warn!("Gateway declined the charge: {}", gateway_error.message);
                self.set_error(&gateway_error.message);
                SubmitOutcome::Declined(gateway_error.message)
            }
            Ok(confirmation) if !confirmation.is_succeeded() => {
                warn!(
                    "Charge did not complete, intent status: {}",
                    confirmation.status
                );
                self.set_error(PAYMENT_INCOMPLETE_MESSAGE);
                SubmitOutcome::Incomplete
            }
            Ok(confirmation) => {
                info!("Charge succeeded for payment {}", self.intent.payment_id);
                {
                    let mut inner = self.lock();
                    inner.error = None;
                    inner.state = CoordinatorState::AwaitingIntake {
                        intent_id: confirmation.intent_id.clone(),
                    };
                }

                match self.policy {
                    IntakePolicy::AfterCharge => SubmitOutcome::AwaitingIntake,
                    IntakePolicy::BeforeCharge => {
                        match self.confirm_backend(&confirmation.intent_id).await {
                            Ok(appointment_id) => SubmitOutcome::Confirmed(appointment_id),
                            Err(message) => SubmitOutcome::Rejected(message),
                        }
                    }
                }
            }
        };

        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    /// Record the intake form and, once a charge has succeeded, confirm the
    /// appointment with the backend. Entered data is preserved on failure.
    pub async fn submit_intake(&self, reason: &str, notes: Option<&str>) -> IntakeOutcome {
        let trimmed = reason.trim();
        if trimmed.is_empty() {
            self.set_error(REASON_REQUIRED_MESSAGE);
            return IntakeOutcome::InvalidReason;
        }

        let form = IntakeForm {
            reason: trimmed.to_string(),
            notes: notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        };

        let intent_id = {
            let mut inner = self.lock();
            match &inner.state {
                CoordinatorState::AwaitingIntake { intent_id } => intent_id.clone(),
                CoordinatorState::Collecting if self.policy == IntakePolicy::BeforeCharge => {
                    inner.intake = Some(form);
                    inner.error = None;
                    return IntakeOutcome::Stored;
                }
                _ => return IntakeOutcome::NotCharged,
            }
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            // Losing submissions must not replace the form the in-flight
            // confirm is sending.
            debug!("Intake submission already in flight, ignoring");
            return IntakeOutcome::AlreadyInFlight;
        }

        self.lock().intake = Some(form);

        let result = self.confirm_backend(&intent_id).await;
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(appointment_id) => IntakeOutcome::Confirmed(appointment_id),
            Err(message) => IntakeOutcome::Rejected(message),
        }
    }

    /// Let the success state linger on screen, then close the modal.
    pub async fn auto_close(&self) -> CloseOutcome {
        tokio::time::sleep(SUCCESS_CLOSE_DELAY).await;
        self.close().await
    }

    /// Close the modal. Before success this is an abandonment: the reserved
    /// payment/token is released best-effort, and the close never blocks on
    /// the outcome of that call.
    pub async fn close(&self) -> CloseOutcome {
        let needs_release = {
            let mut inner = self.lock();
            let done = matches!(
                inner.state,
                CoordinatorState::Succeeded { .. } | CoordinatorState::Closed
            );
            inner.state = CoordinatorState::Closed;
            !done
        };

        if !needs_release {
            return CloseOutcome::Clean;
        }

        info!("Releasing abandoned payment {}", self.intent.payment_id);
        match self.checkout.cancel_payment(self.intent.payment_id).await {
            Ok(()) => CloseOutcome::Released,
            Err(err) => {
                warn!(
                    "Failed to release payment {}: {}",
                    self.intent.payment_id, err
                );
                CloseOutcome::ReleaseFailed(err.to_string())
            }
        }
    }

    async fn confirm_backend(&self, intent_id: &str) -> Result<i64, String> {
        let intake = self.lock().intake.clone();
        let request = ConfirmAppointmentRequest {
            payment_id: self.intent.payment_id,
            payment_intent_id: intent_id.to_string(),
            reason: intake.as_ref().map(|form| form.reason.clone()),
            notes: intake.as_ref().and_then(|form| form.notes.clone()),
        };

        match self
            .checkout
            .confirm_appointment(self.token.id, &request)
            .await
        {
            Ok(response) if response.status == self.success_code => {
                match response.appointment_id {
                    Some(appointment_id) => {
                        info!("Appointment {} confirmed", appointment_id);
                        let mut inner = self.lock();
                        inner.error = None;
                        inner.state = CoordinatorState::Succeeded { appointment_id };
                        Ok(appointment_id)
                    }
                    None => {
                        self.set_error(CONFIRM_FALLBACK_MESSAGE);
                        Err(CONFIRM_FALLBACK_MESSAGE.to_string())
                    }
                }
            }
            Ok(response) => {
                let message = response
                    .error
                    .unwrap_or_else(|| CONFIRM_FALLBACK_MESSAGE.to_string());
                warn!("Backend rejected the confirm: {}", message);
                self.set_error(&message);
                Err(message)
            }
            Err(err) => {
                let message = err.to_string();
                warn!("Confirm call failed: {}", message);
                self.set_error(&message);
                Err(message)
            }
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.lock().state.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// The intake form as last entered, preserved across rejected confirms.
    pub fn intake(&self) -> Option<IntakeForm> {
        self.lock().intake.clone()
    }

    pub fn token(&self) -> &TokenSlot {
        &self.token
    }

    pub fn payment_id(&self) -> i64 {
        self.intent.payment_id
    }
}

fn fee(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
