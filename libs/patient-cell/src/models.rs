use chrono::NaiveDate;
use serde::Deserialize;

/// Read projection of a booked appointment for the history views. The
/// portal never mutates these; status changes happen server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    pub id: i64,
    pub status: String,
    pub appointment_date: NaiveDate,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub doctor_name: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub appointment_id: i64,
    #[serde(default)]
    pub medications: Vec<Medication>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub appointment_id: i64,
    pub total: f64,
    #[serde(default)]
    pub items: Vec<BillItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BillItem {
    pub description: String,
    pub amount: f64,
}
