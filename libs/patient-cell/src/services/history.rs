use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{AppointmentRecord, Bill, Prescription};

/// Read-only history endpoints of the portal API. Plain fetch-and-decode;
/// errors propagate for the calling view to display.
pub struct HistoryService {
    api: Arc<ApiClient>,
}

impl HistoryService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Every appointment of the signed-in patient, newest first.
    pub async fn appointments(&self) -> Result<Vec<AppointmentRecord>, ApiError> {
        debug!("Fetching appointment history");
        self.api.request(Method::GET, "/appointments/", None).await
    }

    /// The most recently completed appointment, if any.
    pub async fn latest(&self) -> Result<Option<AppointmentRecord>, ApiError> {
        debug!("Fetching latest appointment");
        self.api
            .request(Method::GET, "/appointments/latest", None)
            .await
    }

    /// Appointments that have not happened yet.
    pub async fn upcoming(&self) -> Result<Vec<AppointmentRecord>, ApiError> {
        debug!("Fetching upcoming appointments");
        self.api
            .request(Method::GET, "/appointments/pre", None)
            .await
    }

    pub async fn appointment(&self, id: i64) -> Result<AppointmentRecord, ApiError> {
        debug!("Fetching appointment {}", id);
        let path = format!("/appointments/{}/", id);
        self.api.request(Method::GET, &path, None).await
    }

    pub async fn prescription(&self, appointment_id: i64) -> Result<Prescription, ApiError> {
        debug!("Fetching prescription for appointment {}", appointment_id);
        let path = format!("/appointments/prescription/{}/", appointment_id);
        self.api.request(Method::GET, &path, None).await
    }

    pub async fn bill(&self, appointment_id: i64) -> Result<Bill, ApiError> {
        debug!("Fetching bill for appointment {}", appointment_id);
        let path = format!("/appointments/bill/{}/", appointment_id);
        self.api.request(Method::GET, &path, None).await
    }
}
