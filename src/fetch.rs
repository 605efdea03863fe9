// src/fetch.rs
//! FMP economic-calendar retrieval.
//!
//! `CalendarSource` is the seam tests plug fixtures into; `FmpClient` is the
//! real HTTP implementation. Parsing is a separate pure step so fixture JSON
//! goes through the exact same code path as live responses.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::event::Event;

pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com";

#[async_trait]
pub trait CalendarSource {
    /// Fetch all calendar rows in the inclusive `[from, to]` date range.
    async fn fetch(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>>;
    fn name(&self) -> &'static str;
}

/// Parse an FMP economic-calendar response body. Any row with an
/// unrecognized impact label or malformed timestamp fails the whole batch;
/// silently skipping rows would corrupt severity comparisons downstream.
pub fn parse_calendar(json: &str) -> Result<Vec<Event>> {
    serde_json::from_str(json).context("parsing economic-calendar response")
}

pub struct FmpClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl FmpClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, from: NaiveDate, to: NaiveDate) -> String {
        format!(
            "{}/api/v3/economic_calendar?from={}&to={}&apikey={}",
            self.base_url,
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
            self.api_key
        )
    }
}

#[async_trait]
impl CalendarSource for FmpClient {
    async fn fetch(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>> {
        // The URL carries the API key: never echo it into errors or logs.
        let resp = self
            .client
            .get(self.endpoint(from, to))
            .send()
            .await
            .context("requesting economic calendar")?
            .error_for_status()
            .context("economic-calendar request rejected")?;

        let body = resp
            .text()
            .await
            .context("reading economic-calendar response body")?;
        let events = parse_calendar(&body)?;
        debug!(from = %from, to = %to, rows = events.len(), "fetched economic calendar");
        Ok(events)
    }

    fn name(&self) -> &'static str {
        "fmp"
    }
}
