use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{ConfirmAppointmentRequest, ConfirmAppointmentResponse, PaymentIntent};

/// Payment-related endpoints of the portal API.
pub struct CheckoutService {
    api: Arc<ApiClient>,
}

impl CheckoutService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Reserve a token and create a payment intent against it.
    pub async fn create_payment_intent(&self, token_id: i64) -> Result<PaymentIntent, ApiError> {
        debug!("Creating payment intent for token {}", token_id);

        let path = format!("/appointment/payment/{}/", token_id);
        self.api.request(Method::POST, &path, Some(json!({}))).await
    }

    /// Confirm the appointment after a succeeded charge.
    pub async fn confirm_appointment(
        &self,
        token_id: i64,
        request: &ConfirmAppointmentRequest,
    ) -> Result<ConfirmAppointmentResponse, ApiError> {
        debug!(
            "Confirming appointment for token {} with payment {}",
            token_id, request.payment_id
        );

        let path = format!("/appointment/confirm/{}/", token_id);
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.api.request(Method::POST, &path, Some(body)).await
    }

    /// Release a reserved payment and its token. Best-effort; callers treat
    /// failures as non-blocking.
    pub async fn cancel_payment(&self, payment_id: i64) -> Result<(), ApiError> {
        debug!("Cancelling payment {}", payment_id);

        let path = format!("/appointment/cancel/{}/", payment_id);
        self.api.request_no_content(Method::DELETE, &path).await
    }
}
