use crate::domain::model::{BusinessDateQuery, CalculationRequest};
use crate::utils::error::{Result, WorkingDaysError};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_MAX_DAYS: u32 = 3650;
pub const DEFAULT_MAX_HOURS: u32 = 87_600;

/// Upper bounds on the counts a single request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_days: u32,
    pub max_hours: u32,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_days: DEFAULT_MAX_DAYS,
            max_hours: DEFAULT_MAX_HOURS,
        }
    }
}

fn iso_utc_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?Z$").expect("valid regex")
    })
}

/// Turns raw query parameters into an engine request.
pub fn parse_query(query: &BusinessDateQuery, limits: &RequestLimits) -> Result<CalculationRequest> {
    let days = parse_count("Days", query.days.as_deref(), limits.max_days)?;
    let hours = parse_count("Hours", query.hours.as_deref(), limits.max_hours)?;
    let start = query.date.as_deref().map(parse_start_date).transpose()?;

    if days == 0 && hours == 0 {
        return Err(WorkingDaysError::invalid_parameters(
            "At least one of days or hours must be provided",
        ));
    }

    Ok(CalculationRequest { days, hours, start })
}

fn parse_count(label: &str, raw: Option<&str>, max: u32) -> Result<u32> {
    let Some(raw) = raw else {
        return Ok(0);
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WorkingDaysError::invalid_parameters(format!(
            "{} must be a non-negative integer",
            label
        )));
    }

    match raw.parse::<u32>() {
        Ok(value) if value <= max => Ok(value),
        _ => Err(WorkingDaysError::invalid_parameters(format!(
            "{} must not exceed {}",
            label, max
        ))),
    }
}

/// Accepts strict ISO-8601 UTC timestamps with a literal `Z` suffix.
pub fn parse_start_date(raw: &str) -> Result<DateTime<Utc>> {
    if !iso_utc_pattern().is_match(raw) {
        return Err(WorkingDaysError::invalid_parameters(
            "Date must be in ISO 8601 format with Z suffix",
        ));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            WorkingDaysError::invalid_parameters(format!("Date is not a valid instant: {}", e))
        })
}
