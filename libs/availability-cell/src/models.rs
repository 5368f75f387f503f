use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Doctor record as served by `GET /doctor/{id}/`. Read-only on this side;
/// the portal never mutates doctor data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub full_name: String,
    pub specialty: Option<String>,
    pub consultation_fee: Option<f64>,
    pub hospital: Hospital,
    #[serde(default)]
    pub availability: Vec<AvailabilityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub registration_fee: Option<f64>,
}

/// One availability record: the doctor takes appointments on `date`.
/// Times stay as the `HH:MM[:SS]` strings the API sends; display formatting
/// happens at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// One reservable appointment slot on a specific date. Fetched fresh per
/// date selection and never cached across dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSlot {
    pub id: i64,
    pub token_number: i32,
    pub time_start: String,
    pub time_end: String,
}

/// Response of `GET /doctor/{id}/`; `token_slots` is only populated when the
/// request carried an `appointment_date` query parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorDetail {
    #[serde(flatten)]
    pub doctor: Doctor,
    #[serde(default, rename = "token_slots")]
    pub tokens: Vec<TokenSlot>,
}
