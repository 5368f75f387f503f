use std::env;
use tracing::warn;

/// Fallback confirm sentinel; the real value comes from the API contract.
const DEFAULT_CONFIRM_SUCCESS_CODE: i64 = 6000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub payment_publishable_key: String,
    pub payment_return_url: String,
    pub confirm_success_code: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("CARELINK_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CARELINK_API_BASE_URL not set, using empty value");
                    String::new()
                }),
            payment_publishable_key: env::var("CARELINK_PAYMENT_PUBLISHABLE_KEY")
                .unwrap_or_else(|_| {
                    warn!("CARELINK_PAYMENT_PUBLISHABLE_KEY not set, using empty value");
                    String::new()
                }),
            payment_return_url: env::var("CARELINK_PAYMENT_RETURN_URL")
                .unwrap_or_else(|_| {
                    warn!("CARELINK_PAYMENT_RETURN_URL not set, using default");
                    "https://carelink.example.com/payment/return".to_string()
                }),
            confirm_success_code: env::var("CARELINK_CONFIRM_SUCCESS_CODE")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_CONFIRM_SUCCESS_CODE),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }

    pub fn is_payments_configured(&self) -> bool {
        !self.payment_publishable_key.is_empty()
            && !self.payment_return_url.is_empty()
    }
}
