use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Method;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{Doctor, DoctorDetail};
use crate::services::availability::query_date;

/// Read-only doctor lookups.
pub struct DoctorService {
    api: Arc<ApiClient>,
}

impl DoctorService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch a doctor's profile and availability records.
    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, ApiError> {
        debug!("Fetching doctor: {}", doctor_id);

        let path = format!("/doctor/{}/", doctor_id);
        let detail: DoctorDetail = self.api.request(Method::GET, &path, None).await?;
        Ok(detail.doctor)
    }

    /// Fetch the doctor together with the bookable token slots for one date.
    pub async fn get_doctor_for_date(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Result<DoctorDetail, ApiError> {
        debug!("Fetching tokens for doctor {} on {}", doctor_id, date);

        let path = format!(
            "/doctor/{}/?appointment_date={}",
            doctor_id,
            query_date(date)
        );
        self.api.request(Method::GET, &path, None).await
    }
}
