use std::sync::{Arc, RwLock};

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::{ApiError, SessionStore};

type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// JSON client for the portal REST API.
///
/// The bearer token is read from the session store at the start of every
/// request. A 401 from any endpoint clears the stored token and fires the
/// registered unauthorized handler before the error is returned; that is the
/// app-wide logout policy, not something individual callers handle.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    on_unauthorized: RwLock<Option<UnauthorizedHandler>>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            session,
            on_unauthorized: RwLock::new(None),
        }
    }

    pub fn on_unauthorized<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.on_unauthorized.write() {
            *guard = Some(Arc::new(handler));
        }
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Config("stored session token is not valid".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        if self.base_url.is_empty() {
            return Err(ApiError::Config("API base URL is not set".to_string()));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self.client.request(method, &url).headers(self.headers()?);
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Received 401 from {}, clearing session", url);
            self.session.clear();
            if let Some(handler) = self
                .on_unauthorized
                .read()
                .ok()
                .and_then(|guard| guard.clone())
            {
                handler();
            }
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);

            let message = server_error_message(&error_text)
                .unwrap_or_else(|| format!("API error ({})", status));

            return Err(match status {
                StatusCode::NOT_FOUND => ApiError::NotFound(message),
                _ => ApiError::Api(message),
            });
        }

        Ok(response)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Issue a request where only the status matters (the cancel endpoint
    /// returns an empty body).
    pub async fn request_no_content(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.send(method, path, None).await?;
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Pull the human-readable message out of an `{"error": "..."}` body.
fn server_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::server_error_message;

    #[test]
    fn extracts_error_field() {
        assert_eq!(
            server_error_message(r#"{"error": "Slot no longer available"}"#),
            Some("Slot no longer available".to_string())
        );
    }

    #[test]
    fn non_json_body_yields_none() {
        assert_eq!(server_error_message("<html>bad gateway</html>"), None);
    }
}
