use crate::adapters::cache::{ttl_from_hours, DEFAULT_CACHE_TTL, MAX_CACHE_TTL_HOURS};
use crate::adapters::http::{DEFAULT_HOLIDAYS_URL, DEFAULT_TIMEOUT};
use crate::app::request::{DEFAULT_MAX_DAYS, DEFAULT_MAX_HOURS};
use crate::core::calendar::DEFAULT_TIMEZONE;
use crate::core::{BusinessHours, ConfigProvider};
use crate::utils::error::{Result, WorkingDaysError};
use crate::utils::validation::{self, Validate};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub holidays: HolidaysConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub timezone: Option<String>,
    pub business_hours: Option<BusinessHours>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidaysConfig {
    pub url: Option<String>,
    pub file: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub cache_ttl_hours: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_days: Option<u32>,
    pub max_hours: Option<u32>,
}

fn env_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"))
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WorkingDaysError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn holidays_file(&self) -> Option<&str> {
        self.holidays.file.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn holidays_url(&self) -> &str {
        self.holidays.url.as_deref().unwrap_or(DEFAULT_HOLIDAYS_URL)
    }

    fn request_timeout(&self) -> Duration {
        self.holidays
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    fn cache_ttl(&self) -> Duration {
        self.holidays
            .cache_ttl_hours
            .map(ttl_from_hours)
            .unwrap_or(DEFAULT_CACHE_TTL)
    }

    fn timezone(&self) -> Tz {
        self.calendar
            .timezone
            .as_deref()
            .and_then(|name| name.parse().ok())
            .unwrap_or(DEFAULT_TIMEZONE)
    }

    fn business_hours(&self) -> BusinessHours {
        self.calendar.business_hours.unwrap_or_default()
    }

    fn max_days(&self) -> u32 {
        self.limits.max_days.unwrap_or(DEFAULT_MAX_DAYS)
    }

    fn max_hours(&self) -> u32 {
        self.limits.max_hours.unwrap_or(DEFAULT_MAX_HOURS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match self.holidays_file() {
            Some(path) => validation::validate_path("holidays.file", path)?,
            None => validation::validate_url("holidays.url", self.holidays_url())?,
        }
        validation::validate_range(
            "holidays.timeout_seconds",
            self.request_timeout().as_secs(),
            1,
            300,
        )?;
        if let Some(hours) = self.holidays.cache_ttl_hours {
            validation::validate_range("holidays.cache_ttl_hours", hours, 1, MAX_CACHE_TTL_HOURS)?;
        }
        if let Some(name) = &self.calendar.timezone {
            validation::validate_timezone("calendar.timezone", name)?;
        }
        validation::validate_business_hours("calendar.business_hours", &self.business_hours())?;
        validation::validate_positive_number("limits.max_days", self.max_days().into(), 1)?;
        validation::validate_positive_number("limits.max_hours", self.max_hours().into(), 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClockTime;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[calendar]
timezone = "America/Lima"

[calendar.business_hours]
start = "07:00"
end = "16:00"
lunch_start = "12:00"
lunch_end = "12:30"

[holidays]
url = "https://holidays.example.com/pe.json"
timeout_seconds = 3
cache_ttl_hours = 12

[limits]
max_days = 365
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.timezone(), chrono_tz::America::Lima);
        assert_eq!(config.business_hours().lunch_end, ClockTime::new(12, 30));
        assert_eq!(config.holidays_url(), "https://holidays.example.com/pe.json");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.cache_ttl(), Duration::from_secs(12 * 3600));
        assert_eq!(config.max_days(), 365);
        assert_eq!(config.max_hours(), DEFAULT_MAX_HOURS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.holidays_url(), DEFAULT_HOLIDAYS_URL);
        assert_eq!(config.timezone(), DEFAULT_TIMEZONE);
        assert_eq!(config.business_hours(), BusinessHours::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WORKING_DAYS_TEST_HOLIDAYS_URL", "https://test.holidays.com/list.json");

        let toml_content = r#"
[holidays]
url = "${WORKING_DAYS_TEST_HOLIDAYS_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.holidays_url(), "https://test.holidays.com/list.json");

        std::env::remove_var("WORKING_DAYS_TEST_HOLIDAYS_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[holidays]\nurl = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_zone = TomlConfig::from_toml_str("[calendar]\ntimezone = \"Mars/Base\"\n").unwrap();
        assert!(bad_zone.validate().is_err());

        let bad_time = TomlConfig::from_toml_str(
            "[calendar.business_hours]\nstart = \"8am\"\nend = \"17:00\"\nlunch_start = \"12:00\"\nlunch_end = \"13:00\"\n",
        );
        assert!(matches!(bad_time, Err(WorkingDaysError::TomlError(_))));
    }

    #[test]
    fn test_cache_ttl_bounds() {
        let too_long = TomlConfig::from_toml_str("[holidays]\ncache_ttl_hours = 9223372036854775807\n")
            .unwrap();
        assert_eq!(too_long.cache_ttl(), Duration::from_secs(u64::MAX));
        assert!(matches!(
            too_long.validate(),
            Err(WorkingDaysError::InvalidConfigValueError { ref field, .. })
                if field == "holidays.cache_ttl_hours"
        ));

        let zero = TomlConfig::from_toml_str("[holidays]\ncache_ttl_hours = 0\n").unwrap();
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[holidays]
file = "./holidays.json"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.holidays_file(), Some("./holidays.json"));
        assert!(config.validate().is_ok());
    }
}
