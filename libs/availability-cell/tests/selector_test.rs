use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::from_value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use availability_cell::{AvailabilitySelector, DateSelection, Doctor, DoctorDetail, DoctorService};
use shared_api::ApiClient;
use shared_models::MemorySession;
use shared_utils::test_utils::{MockPortalResponses, TestConfig};

fn test_doctor(dates: &[&str]) -> Doctor {
    let detail: DoctorDetail =
        from_value(MockPortalResponses::doctor_detail(3, dates, vec![])).unwrap();
    detail.doctor
}

fn selector_for(server: &MockServer, doctor: &Doctor) -> AvailabilitySelector {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    let api = Arc::new(ApiClient::new(
        &config,
        Arc::new(MemorySession::with_token("patient-token")),
    ));
    AvailabilitySelector::new(DoctorService::new(api), doctor)
}

fn date(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}

#[tokio::test]
async fn unavailable_date_is_a_no_op() {
    let server = MockServer::start().await;
    let doctor = test_doctor(&["2026-09-01"]);
    let selector = selector_for(&server, &doctor);

    // Any fetch at all for a non-member date is a bug.
    Mock::given(method("GET"))
        .and(path("/doctor/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockPortalResponses::doctor_detail(3, &["2026-09-01"], vec![]),
        ))
        .expect(0)
        .mount(&server)
        .await;

    assert!(!selector.is_selectable(date("2026-09-05")));
    let outcome = selector.select_date(date("2026-09-05")).await;

    assert_matches!(outcome, DateSelection::NotAvailable);
    assert!(selector.tokens().is_empty());
    assert_eq!(selector.selected_date(), None);
}

#[tokio::test]
async fn selecting_an_available_date_loads_tokens() {
    let server = MockServer::start().await;
    let doctor = test_doctor(&["2026-09-01"]);
    let selector = selector_for(&server, &doctor);

    Mock::given(method("GET"))
        .and(path("/doctor/3/"))
        .and(query_param("appointment_date", "2026-09-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockPortalResponses::doctor_detail(
                3,
                &["2026-09-01"],
                vec![
                    MockPortalResponses::token_slot(101, 1, "10:00:00", "10:15:00"),
                    MockPortalResponses::token_slot(102, 2, "10:15:00", "10:30:00"),
                ],
            ),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = selector.select_date(date("2026-09-01")).await;

    assert_matches!(outcome, DateSelection::Tokens(tokens) if tokens.len() == 2);
    assert_eq!(selector.tokens().len(), 2);
    assert_eq!(selector.selected_date(), Some(date("2026-09-01")));
    assert!(!selector.is_loading());
}

#[tokio::test]
async fn fetch_failure_fails_soft_with_empty_tokens() {
    let server = MockServer::start().await;
    let doctor = test_doctor(&["2026-09-01"]);
    let selector = selector_for(&server, &doctor);

    Mock::given(method("GET"))
        .and(path("/doctor/3/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = selector.select_date(date("2026-09-01")).await;

    assert_matches!(outcome, DateSelection::Tokens(tokens) if tokens.is_empty());
    assert!(selector.tokens().is_empty());
    assert!(!selector.is_loading());
}

#[tokio::test]
async fn stale_response_never_overwrites_a_newer_selection() {
    let server = MockServer::start().await;
    let doctor = test_doctor(&["2026-09-01", "2026-09-02"]);
    let selector = selector_for(&server, &doctor);

    // The first date's response arrives after the second date was selected.
    Mock::given(method("GET"))
        .and(path("/doctor/3/"))
        .and(query_param("appointment_date", "2026-09-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockPortalResponses::doctor_detail(
                    3,
                    &["2026-09-01", "2026-09-02"],
                    vec![MockPortalResponses::token_slot(201, 1, "09:00:00", "09:15:00")],
                ))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doctor/3/"))
        .and(query_param("appointment_date", "2026-09-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockPortalResponses::doctor_detail(
                3,
                &["2026-09-01", "2026-09-02"],
                vec![MockPortalResponses::token_slot(301, 1, "11:00:00", "11:15:00")],
            ),
        ))
        .mount(&server)
        .await;

    let (first, second) = tokio::join!(
        selector.select_date(date("2026-09-01")),
        selector.select_date(date("2026-09-02")),
    );

    assert_matches!(first, DateSelection::Superseded);
    assert_matches!(second, DateSelection::Tokens(tokens) if tokens.len() == 1);

    let tokens = selector.tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].id, 301);
    assert_eq!(selector.selected_date(), Some(date("2026-09-02")));
}

#[tokio::test]
async fn replacing_the_doctor_recomputes_the_date_set() {
    let server = MockServer::start().await;
    let doctor = test_doctor(&["2026-09-01"]);
    let selector = selector_for(&server, &doctor);

    assert!(selector.is_selectable(date("2026-09-01")));

    let updated = test_doctor(&["2026-09-10"]);
    selector.set_doctor(&updated);

    assert!(!selector.is_selectable(date("2026-09-01")));
    assert!(selector.is_selectable(date("2026-09-10")));
    assert_eq!(selector.selected_date(), None);
}
