use crate::core::{ConfigProvider, HolidayProvider, HolidaySet, Result};
use crate::utils::error::WorkingDaysError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_HOLIDAYS_URL: &str = "https://content.capta.co/Recruitment/WorkingDays.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches a JSON array of `YYYY-MM-DD` strings over HTTP.
#[derive(Debug, Clone)]
pub struct HttpHolidayProvider {
    client: Client,
    url: String,
}

impl HttpHolidayProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.holidays_url(), config.request_timeout())
    }
}

#[async_trait]
impl HolidayProvider for HttpHolidayProvider {
    async fn fetch_holidays(&self) -> Result<HolidaySet> {
        tracing::debug!("Fetching holidays from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Holiday response status: {}", status);
        if !status.is_success() {
            return Err(WorkingDaysError::HolidaySourceError {
                message: format!("{} returned HTTP {}", self.url, status),
            });
        }

        let entries: Vec<String> = response.json().await?;
        let holidays = HolidaySet::from_strings(&entries);
        tracing::debug!("Parsed {} of {} holiday entries", holidays.len(), entries.len());
        Ok(holidays)
    }
}
