use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Minutes since midnight of any timestamp, seconds ignored.
    pub fn minutes_of<T: Timelike>(value: &T) -> u32 {
        value.hour() * 60 + value.minute()
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got '{}'", s))?;
        let hour: u32 = hour
            .parse()
            .map_err(|_| format!("invalid hour in '{}'", s))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| format!("invalid minute in '{}'", s))?;
        if hour > 23 || minute > 59 {
            return Err(format!("time of day out of range: '{}'", s));
        }
        Ok(Self { hour, minute })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Daily working window with a lunch break, evaluated in the civil zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start: ClockTime,
    pub end: ClockTime,
    pub lunch_start: ClockTime,
    pub lunch_end: ClockTime,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start: ClockTime::new(8, 0),
            end: ClockTime::new(17, 0),
            lunch_start: ClockTime::new(12, 0),
            lunch_end: ClockTime::new(13, 0),
        }
    }
}

impl fmt::Display for BusinessHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} (lunch {}-{})",
            self.start, self.end, self.lunch_start, self.lunch_end
        )
    }
}

/// Non-working calendar dates in the civil zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: HashSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `YYYY-MM-DD` strings. Entries that are not in that
    /// exact canonical form can never match a date and are skipped.
    pub fn from_strings<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dates = HashSet::new();
        for entry in entries {
            let raw = entry.as_ref();
            match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) if date.format("%Y-%m-%d").to_string() == raw => {
                    dates.insert(date);
                }
                _ => tracing::warn!("Skipping malformed holiday entry: {:?}", raw),
            }
        }
        Self { dates }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Raw, untrusted query parameters as received by the façade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDateQuery {
    pub days: Option<String>,
    pub hours: Option<String>,
    pub date: Option<String>,
}

/// Validated input for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationRequest {
    pub days: u32,
    pub hours: u32,
    pub start: Option<DateTime<Utc>>,
}
