use crate::adapters::cache::{ttl_from_hours, DEFAULT_CACHE_TTL, MAX_CACHE_TTL_HOURS};
use crate::adapters::http::{DEFAULT_HOLIDAYS_URL, DEFAULT_TIMEOUT};
use crate::app::request::{DEFAULT_MAX_DAYS, DEFAULT_MAX_HOURS};
use crate::core::calendar::DEFAULT_TIMEZONE;
use crate::core::{BusinessHours, ConfigProvider};
use crate::utils::error::{Result, WorkingDaysError};
use crate::utils::validation::{self, Validate};
use chrono_tz::Tz;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Settings for the Lambda deployment, read from environment variables.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub holidays_url: String,
    pub timeout_seconds: u64,
    pub cache_ttl_hours: u64,
    pub timezone: Tz,
    pub business_hours: BusinessHours,
    pub max_days: u32,
    pub max_hours: u32,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = BusinessHours::default();
        let timezone = match lookup("BUSINESS_TIMEZONE") {
            Some(name) => validation::validate_timezone("BUSINESS_TIMEZONE", &name)?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Self {
            holidays_url: lookup("HOLIDAYS_URL").unwrap_or_else(|| DEFAULT_HOLIDAYS_URL.to_string()),
            timeout_seconds: parse_or(&lookup, "HOLIDAYS_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?,
            cache_ttl_hours: parse_or(
                &lookup,
                "HOLIDAYS_CACHE_TTL_HOURS",
                DEFAULT_CACHE_TTL.as_secs() / 3600,
            )?,
            timezone,
            business_hours: BusinessHours {
                start: parse_or(&lookup, "BUSINESS_START", defaults.start)?,
                end: parse_or(&lookup, "BUSINESS_END", defaults.end)?,
                lunch_start: parse_or(&lookup, "LUNCH_START", defaults.lunch_start)?,
                lunch_end: parse_or(&lookup, "LUNCH_END", defaults.lunch_end)?,
            },
            max_days: parse_or(&lookup, "MAX_DAYS", DEFAULT_MAX_DAYS)?,
            max_hours: parse_or(&lookup, "MAX_HOURS", DEFAULT_MAX_HOURS)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| WorkingDaysError::InvalidConfigValueError {
                field: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

impl ConfigProvider for LambdaConfig {
    fn holidays_url(&self) -> &str {
        &self.holidays_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn cache_ttl(&self) -> Duration {
        ttl_from_hours(self.cache_ttl_hours)
    }

    fn timezone(&self) -> Tz {
        self.timezone
    }

    fn business_hours(&self) -> BusinessHours {
        self.business_hours
    }

    fn max_days(&self) -> u32 {
        self.max_days
    }

    fn max_hours(&self) -> u32 {
        self.max_hours
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("HOLIDAYS_URL", &self.holidays_url)?;
        validation::validate_range("HOLIDAYS_TIMEOUT_SECS", self.timeout_seconds, 1, 30)?;
        validation::validate_range(
            "HOLIDAYS_CACHE_TTL_HOURS",
            self.cache_ttl_hours,
            1,
            MAX_CACHE_TTL_HOURS,
        )?;
        validation::validate_business_hours("BUSINESS_HOURS", &self.business_hours)?;
        validation::validate_positive_number("MAX_DAYS", self.max_days.into(), 1)?;
        validation::validate_positive_number("MAX_HOURS", self.max_hours.into(), 1)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClockTime;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LambdaConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.holidays_url, DEFAULT_HOLIDAYS_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.cache_ttl(), Duration::from_secs(24 * 3600));
        assert_eq!(config.timezone(), chrono_tz::America::Bogota);
        assert_eq!(config.business_hours(), BusinessHours::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = LambdaConfig::from_lookup(lookup_from(&[
            ("HOLIDAYS_URL", "https://holidays.example.com/co.json"),
            ("HOLIDAYS_CACHE_TTL_HOURS", "6"),
            ("BUSINESS_START", "07:30"),
            ("MAX_DAYS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.cache_ttl(), Duration::from_secs(6 * 3600));
        assert_eq!(config.business_hours.start, ClockTime::new(7, 30));
        assert_eq!(config.max_days(), 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let err = LambdaConfig::from_lookup(lookup_from(&[("MAX_HOURS", "lots")])).unwrap_err();
        assert!(matches!(
            err,
            WorkingDaysError::InvalidConfigValueError { ref field, .. } if field == "MAX_HOURS"
        ));

        assert!(LambdaConfig::from_lookup(lookup_from(&[("BUSINESS_TIMEZONE", "Bogota")])).is_err());

        let inverted = LambdaConfig::from_lookup(lookup_from(&[
            ("LUNCH_START", "14:00"),
            ("LUNCH_END", "13:00"),
        ]))
        .unwrap();
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_huge_cache_ttl_rejected_without_overflow() {
        let config = LambdaConfig::from_lookup(lookup_from(&[(
            "HOLIDAYS_CACHE_TTL_HOURS",
            "18446744073709551615",
        )]))
        .unwrap();

        assert_eq!(config.cache_ttl(), Duration::from_secs(u64::MAX));
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            WorkingDaysError::InvalidConfigValueError { ref field, .. }
                if field == "HOLIDAYS_CACHE_TTL_HOURS"
        ));

        let month = LambdaConfig::from_lookup(lookup_from(&[("HOLIDAYS_CACHE_TTL_HOURS", "720")]))
            .unwrap();
        assert!(month.validate().is_ok());
    }
}
