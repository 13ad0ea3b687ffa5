use crate::adapters::cache::DEFAULT_CACHE_TTL;
use crate::adapters::http::DEFAULT_HOLIDAYS_URL;
use crate::app::request::{DEFAULT_MAX_DAYS, DEFAULT_MAX_HOURS};
use crate::core::calendar::DEFAULT_TIMEZONE;
use crate::core::{BusinessHours, ConfigProvider};
use crate::domain::model::BusinessDateQuery;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono_tz::Tz;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "working-days")]
#[command(about = "Add business days and hours to a UTC instant on a working calendar")]
pub struct CliConfig {
    /// Business days to add
    #[arg(long, allow_hyphen_values = true)]
    pub days: Option<String>,

    /// Business hours to add
    #[arg(long, allow_hyphen_values = true)]
    pub hours: Option<String>,

    /// Start instant, e.g. 2025-04-10T15:00:00Z (defaults to now)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, default_value = DEFAULT_HOLIDAYS_URL)]
    pub holidays_url: String,

    /// Read holidays from a local JSON file instead of the URL
    #[arg(long)]
    pub holidays_file: Option<String>,

    #[arg(long, default_value_t = 5)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "America/Bogota")]
    pub timezone: String,

    /// TOML configuration file; replaces the calendar and holiday flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn query(&self) -> BusinessDateQuery {
        BusinessDateQuery {
            days: self.days.clone(),
            hours: self.hours.clone(),
            date: self.date.clone(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn holidays_url(&self) -> &str {
        &self.holidays_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn cache_ttl(&self) -> Duration {
        DEFAULT_CACHE_TTL
    }

    fn timezone(&self) -> Tz {
        self.timezone.parse().unwrap_or(DEFAULT_TIMEZONE)
    }

    fn business_hours(&self) -> BusinessHours {
        BusinessHours::default()
    }

    fn max_days(&self) -> u32 {
        DEFAULT_MAX_DAYS
    }

    fn max_hours(&self) -> u32 {
        DEFAULT_MAX_HOURS
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.holidays_file {
            Some(path) => validation::validate_path("holidays_file", path)?,
            None => validation::validate_url("holidays_url", &self.holidays_url)?,
        }
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_timezone("timezone", &self.timezone)?;
        Ok(())
    }
}
