use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use availability_cell::{AvailabilitySelector, DoctorService};
use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::MemorySession;
use shared_utils::format_time_12h;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareLink patient portal");

    // Load configuration
    let config = AppConfig::from_env();
    if !config.is_configured() {
        bail!("CARELINK_API_BASE_URL is not set");
    }

    let session = Arc::new(match std::env::var("CARELINK_SESSION_TOKEN") {
        Ok(token) => MemorySession::with_token(&token),
        Err(_) => MemorySession::new(),
    });

    let mut args = std::env::args().skip(1);
    let doctor_id: i64 = args
        .next()
        .context("usage: carelink-portal <doctor-id> [date]")?
        .parse()
        .context("doctor id must be numeric")?;

    let api = Arc::new(ApiClient::new(&config, session));
    let doctors = DoctorService::new(api.clone());

    let doctor = doctors.get_doctor(doctor_id).await?;
    println!(
        "{} ({})",
        doctor.full_name,
        doctor.specialty.as_deref().unwrap_or("General")
    );

    let mut dates: Vec<NaiveDate> = doctor
        .availability
        .iter()
        .map(|entry| entry.date)
        .collect();
    dates.sort();
    dates.dedup();
    println!("Available dates:");
    for date in &dates {
        println!("  {}", date);
    }

    if let Some(raw) = args.next() {
        let date: NaiveDate = raw.parse().context("date must be YYYY-MM-DD")?;
        let selector = AvailabilitySelector::new(DoctorService::new(api), &doctor);
        selector.select_date(date).await;

        println!("Tokens on {}:", date);
        for token in selector.tokens() {
            println!(
                "  #{} {} - {}",
                token.token_number,
                format_time_12h(&token.time_start),
                format_time_12h(&token.time_end)
            );
        }
    }

    Ok(())
}
