use serde::{Deserialize, Serialize};

/// Server-issued payment intent, scoped to one reserved token.
/// A fresh intent is created per booking attempt; it is never reused across
/// tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    pub payment_id: i64,
}

/// Result of a client-side charge confirmation at the gateway.
/// `status` is the gateway's own status string; only `"succeeded"` lets the
/// flow proceed.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub intent_id: String,
    pub status: String,
}

impl PaymentConfirmation {
    pub const SUCCEEDED: &'static str = "succeeded";

    pub fn is_succeeded(&self) -> bool {
        self.status == Self::SUCCEEDED
    }
}

/// Gateway-reported failure. The message is human-readable and shown to the
/// user verbatim (e.g. "Your card was declined.").
#[derive(Debug, Clone)]
pub struct GatewayError {
    pub message: String,
}

/// Mandatory reason plus optional notes collected around the charge.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeForm {
    pub reason: String,
    pub notes: Option<String>,
}

/// Whether intake data is collected before or after the charge. The two
/// legacy coordinator variants collapse into one machine driven by this flag;
/// `AfterCharge` is the current two-phase contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntakePolicy {
    BeforeCharge,
    #[default]
    AfterCharge,
}

/// Body of `POST /appointment/confirm/{token_id}/`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmAppointmentRequest {
    pub payment_id: i64,
    pub payment_intent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Response of the confirm endpoint. `status` is an opaque domain code; it
/// only ever gets compared against the configured success sentinel.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmAppointmentResponse {
    pub status: i64,
    pub appointment_id: Option<i64>,
    pub error: Option<String>,
}

/// Where the payment modal session currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorState {
    /// Card entry step; no successful charge yet.
    Collecting,
    /// Charge succeeded; waiting for the intake form before the backend
    /// confirm call.
    AwaitingIntake { intent_id: String },
    /// Appointment confirmed server-side.
    Succeeded { appointment_id: i64 },
    /// Modal dismissed.
    Closed,
}
