//! Demo: fetch the coming week's economic calendar, reduce duplicate
//! announcements, and write `calendar.ics` next to the binary.
//!
//! Needs `FMP_API_KEY` (or a `config/calendar.toml`); see `CalendarConfig`.

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing_subscriber::EnvFilter;

use fmp_economic_calendar::{Calendar, CalendarConfig, FmpClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = CalendarConfig::load()?;
    let client = FmpClient::with_base_url(&cfg.api_key, &cfg.base_url);

    let from = Utc::now().date_naive();
    let to = from + Duration::days(7);

    let mut cal = Calendar::fetch(&client, from, to, cfg.tz_offset).await?;
    let removed = cal.reduce();
    println!(
        "{} events between {from} and {to} ({removed} duplicates removed)",
        cal.len()
    );

    cal.write_ics("calendar.ics")?;
    println!("wrote calendar.ics");
    Ok(())
}
