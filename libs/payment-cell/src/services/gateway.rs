use async_trait::async_trait;

use crate::models::{GatewayError, PaymentConfirmation};

/// Narrow boundary to the card-payment SDK.
///
/// The real implementation wraps the hosted card-input element and its
/// confirm-payment call; tests substitute a mock. The coordinator only ever
/// needs this one operation.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Confirm the charge for an existing intent. Returns the gateway's
    /// error (shown verbatim) or the resulting intent id and status.
    async fn confirm_payment(
        &self,
        client_secret: &str,
        return_url: &str,
    ) -> Result<PaymentConfirmation, GatewayError>;
}
