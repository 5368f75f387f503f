use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub api_base_url: String,
    pub payment_publishable_key: String,
    pub confirm_success_code: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            payment_publishable_key: "pk_test_carelink".to_string(),
            confirm_success_code: 6000,
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            payment_publishable_key: self.payment_publishable_key.clone(),
            payment_return_url: "http://localhost:3000/payment/return".to_string(),
            confirm_success_code: self.confirm_success_code,
        }
    }
}

/// Canned portal API response bodies for wiremock-backed tests.
pub struct MockPortalResponses;

impl MockPortalResponses {
    pub fn token_slot(id: i64, token_number: i32, time_start: &str, time_end: &str) -> Value {
        json!({
            "id": id,
            "token_number": token_number,
            "time_start": time_start,
            "time_end": time_end
        })
    }

    pub fn availability_entry(id: i64, date: &str) -> Value {
        json!({
            "id": id,
            "date": date,
            "start_time": "09:00:00",
            "end_time": "13:00:00"
        })
    }

    pub fn doctor_detail(doctor_id: i64, dates: &[&str], tokens: Vec<Value>) -> Value {
        let availability: Vec<Value> = dates
            .iter()
            .enumerate()
            .map(|(idx, date)| Self::availability_entry(idx as i64 + 1, date))
            .collect();

        json!({
            "id": doctor_id,
            "full_name": "Dr. Asha Verma",
            "specialty": "Cardiology",
            "consultation_fee": 500.0,
            "hospital": {
                "id": 1,
                "name": "CareLink General",
                "registration_fee": 30.0
            },
            "availability": availability,
            "token_slots": tokens
        })
    }

    pub fn payment_intent(payment_id: i64) -> Value {
        json!({
            "clientSecret": format!("pi_secret_{}", payment_id),
            "payment_id": payment_id
        })
    }

    pub fn confirm_success(code: i64, appointment_id: i64) -> Value {
        json!({
            "status": code,
            "appointment_id": appointment_id
        })
    }

    pub fn confirm_rejection(code: i64, error: &str) -> Value {
        json!({
            "status": code,
            "error": error
        })
    }

    pub fn appointment_record(appointment_id: i64, status: &str) -> Value {
        json!({
            "id": appointment_id,
            "status": status,
            "appointment_date": "2026-09-01",
            "time_start": "10:30:00",
            "time_end": "10:45:00",
            "doctor_name": "Dr. Asha Verma",
            "department": "Cardiology"
        })
    }

    pub fn prescription(prescription_id: i64, appointment_id: i64) -> Value {
        json!({
            "id": prescription_id,
            "appointment_id": appointment_id,
            "medications": [
                {
                    "name": "Atorvastatin 10mg",
                    "dosage": "1-0-1",
                    "instructions": "After meals"
                }
            ],
            "notes": "Review in two weeks"
        })
    }

    pub fn bill(bill_id: i64, appointment_id: i64) -> Value {
        json!({
            "id": bill_id,
            "appointment_id": appointment_id,
            "total": 530.0,
            "items": [
                { "description": "Registration fee", "amount": 30.0 },
                { "description": "Consultation fee", "amount": 500.0 }
            ]
        })
    }
}
