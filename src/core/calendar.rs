//! Civil-zone projection and working-instant predicates.
//!
//! Every predicate reads wall-clock fields (weekday, date, hour, minute) of
//! a timestamp that has already been projected into the calendar's zone.
//! Seconds are ignored when comparing against business hours.

use crate::domain::model::{BusinessHours, ClockTime, HolidaySet};
use chrono::{DateTime, Datelike, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Bogota;

/// Upper bound on forward shifts when a local time falls in a zone gap.
const MAX_GAP_SHIFT_HOURS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    tz: Tz,
    hours: BusinessHours,
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE, BusinessHours::default())
    }
}

impl BusinessCalendar {
    pub fn new(tz: Tz, hours: BusinessHours) -> Self {
        Self { tz, hours }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn hours(&self) -> &BusinessHours {
        &self.hours
    }

    pub fn project(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    pub fn is_weekend(&self, dt: &DateTime<Tz>) -> bool {
        matches!(dt.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_holiday(&self, dt: &DateTime<Tz>, holidays: &HolidaySet) -> bool {
        holidays.contains(dt.date_naive())
    }

    pub fn is_non_working_day(&self, dt: &DateTime<Tz>, holidays: &HolidaySet) -> bool {
        self.is_weekend(dt) || self.is_holiday(dt, holidays)
    }

    pub fn is_before_window(&self, dt: &DateTime<Tz>) -> bool {
        ClockTime::minutes_of(dt) < self.hours.start.minutes()
    }

    pub fn is_after_window(&self, dt: &DateTime<Tz>) -> bool {
        ClockTime::minutes_of(dt) > self.hours.end.minutes()
    }

    /// `[start, end]`, inclusive at both ends.
    pub fn is_within_daily_window(&self, dt: &DateTime<Tz>) -> bool {
        !self.is_before_window(dt) && !self.is_after_window(dt)
    }

    /// `[lunch_start, lunch_end)`: the lunch-end minute is working time.
    pub fn is_lunch_window(&self, dt: &DateTime<Tz>) -> bool {
        let minutes = ClockTime::minutes_of(dt);
        minutes >= self.hours.lunch_start.minutes() && minutes < self.hours.lunch_end.minutes()
    }

    /// Working date, inside the daily window and outside lunch.
    pub fn is_working_instant(&self, dt: &DateTime<Tz>, holidays: &HolidaySet) -> bool {
        !self.is_non_working_day(dt, holidays)
            && self.is_within_daily_window(dt)
            && !self.is_lunch_window(dt)
    }

    /// Same civil date with the time of day replaced; seconds are zeroed.
    pub(crate) fn at_time(&self, dt: &DateTime<Tz>, time: ClockTime) -> DateTime<Tz> {
        self.localize(dt.date_naive().and_time(time.to_naive_time()))
    }

    pub(crate) fn at_window_start(&self, dt: &DateTime<Tz>) -> DateTime<Tz> {
        self.at_time(dt, self.hours.start)
    }

    /// Same wall-clock time on the following civil date.
    pub(crate) fn next_day(&self, dt: &DateTime<Tz>) -> DateTime<Tz> {
        self.localize(dt.naive_local() + TimeDelta::days(1))
    }

    /// Longest run of consecutive non-working days is `7 * (h + 2) / 5`
    /// for `h` holidays, so any day-advancing loop settles within this bound.
    pub(crate) fn day_advance_limit(&self, holidays: &HolidaySet) -> usize {
        holidays.len() * 7 / 5 + 6
    }

    fn localize(&self, naive: NaiveDateTime) -> DateTime<Tz> {
        let mut candidate = naive;
        for _ in 0..MAX_GAP_SHIFT_HOURS {
            match self.tz.from_local_datetime(&candidate) {
                LocalResult::Single(dt) => return dt,
                LocalResult::Ambiguous(earliest, _) => return earliest,
                LocalResult::None => candidate += TimeDelta::hours(1),
            }
        }
        self.tz.from_utc_datetime(&naive)
    }
}
