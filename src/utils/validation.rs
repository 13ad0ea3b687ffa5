use crate::domain::model::BusinessHours;
use crate::utils::error::{Result, WorkingDaysError};
use chrono_tz::Tz;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(WorkingDaysError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_timezone(field_name: &str, name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: format!("Unknown IANA timezone: {}", e),
        })
}

pub fn validate_business_hours(field_name: &str, hours: &BusinessHours) -> Result<()> {
    let ordered = hours.start.minutes() < hours.lunch_start.minutes()
        && hours.lunch_start.minutes() < hours.lunch_end.minutes()
        && hours.lunch_end.minutes() < hours.end.minutes();

    if !ordered {
        return Err(WorkingDaysError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: hours.to_string(),
            reason: "Expected start < lunch_start < lunch_end < end".to_string(),
        });
    }
    Ok(())
}
