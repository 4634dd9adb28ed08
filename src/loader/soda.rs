//! Loader for Socrata Open Data API (SODA) food-inspection endpoints.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{IntoUrl, Url};
use serde::Deserialize;

use crate::core::Record;
use crate::error::LoadError;
use crate::loader::RecordsLoader;

/// Chicago's food-inspections dataset, the endpoint this loader was built
/// against.
pub const CHICAGO_FOOD_INSPECTIONS_URL: &str =
    "https://data.cityofchicago.org/resource/4ijn-s7e5.json";

/// User agent for API requests
const USER_AGENT: &str = concat!("foodwatch/", env!("CARGO_PKG_VERSION"));

/// Timestamp format SODA uses for floating timestamps, e.g.
/// `2025-04-29T00:00:00.000`.
const SODA_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One row of the SODA response in wire form.
#[derive(Debug, Deserialize)]
struct SodaRow {
    dba_name: String,
    address: String,
    inspection_date: Option<String>,
}

impl SodaRow {
    fn into_record(self) -> Result<Record, LoadError> {
        let inspection_date = self
            .inspection_date
            .as_deref()
            .map(|raw| NaiveDateTime::parse_from_str(raw, SODA_DATE_FORMAT))
            .transpose()?;
        Ok(Record {
            title: self.dba_name,
            address: self.address,
            inspection_date,
        })
    }
}

/// Fetches inspection records from a SODA JSON endpoint.
pub struct SodaLoader {
    client: reqwest::Client,
    endpoint: Url,
}

impl SodaLoader {
    /// Build a loader for an arbitrary SODA endpoint.
    pub fn new(endpoint: impl IntoUrl) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into_url()?,
        })
    }

    /// Build a loader for [`CHICAGO_FOOD_INSPECTIONS_URL`].
    pub fn chicago() -> Result<Self, LoadError> {
        Self::new(CHICAGO_FOOD_INSPECTIONS_URL)
    }
}

#[async_trait]
impl RecordsLoader for SodaLoader {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        tracing::info!(endpoint = %self.endpoint, "fetching inspection records");
        let body = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let rows: Vec<SodaRow> = serde_json::from_str(&body)?;
        rows.into_iter().map(SodaRow::into_record).collect()
    }
}
