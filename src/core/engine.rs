use crate::core::calendar::BusinessCalendar;
use crate::core::snap::SnapMode;
use crate::domain::model::{CalculationRequest, HolidaySet};
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

impl BusinessCalendar {
    /// Steps forward `days` working days, then snaps onto business hours.
    ///
    /// The time of day is carried through the stepping and only corrected by
    /// the final snap. When `start` itself is on a non-working day the result
    /// lands at the end of the target day's window instead.
    pub fn add_business_days(
        &self,
        start: DateTime<Tz>,
        days: u32,
        holidays: &HolidaySet,
    ) -> DateTime<Tz> {
        let mode = if self.is_non_working_day(&start, holidays) {
            SnapMode::EndOfDay
        } else {
            SnapMode::Nearest
        };

        let mut current = start;
        let mut added = 0;
        while added < days {
            current = self.next_day(&current);
            if !self.is_non_working_day(&current, holidays) {
                added += 1;
            }
        }

        tracing::debug!("Advanced {} business days to {} ({:?} snap)", days, current, mode);
        self.snap(current, holidays, mode)
    }

    /// Adds `hours` one-hour increments of working time.
    ///
    /// An increment that would leave the daily window, or land on a
    /// non-working day, restarts from the next working day's window start.
    /// Lunch hours are passed through without being credited.
    pub fn add_business_hours(
        &self,
        start: DateTime<Tz>,
        hours: u32,
        holidays: &HolidaySet,
    ) -> DateTime<Tz> {
        let mut current = start;
        let mut added = 0;
        while added < hours {
            let next = current + TimeDelta::hours(1);

            if self.leaves_daily_window(&next) || self.is_non_working_day(&next, holidays) {
                current = self.next_working_day_start(&current, holidays) + TimeDelta::hours(1);
            } else if self.is_lunch_window(&next) {
                current = next;
                continue;
            } else {
                current = next;
            }

            added += 1;
        }

        tracing::debug!("Advanced {} business hours to {}", hours, current);
        current
    }

    /// Roll-over check for a single hour increment.
    fn leaves_daily_window(&self, next: &DateTime<Tz>) -> bool {
        self.is_before_window(next) || self.is_after_window(next)
    }

    /// Window start of the first working day strictly after `dt`.
    fn next_working_day_start(&self, dt: &DateTime<Tz>, holidays: &HolidaySet) -> DateTime<Tz> {
        let mut current = self.at_window_start(&self.next_day(dt));
        for _ in 0..self.day_advance_limit(holidays) {
            if !self.is_non_working_day(&current, holidays) {
                break;
            }
            current = self.at_window_start(&self.next_day(&current));
        }
        current
    }

    /// Resolves days fully, then hours, and returns the absolute instant.
    pub fn compute(
        &self,
        days: u32,
        hours: u32,
        start: DateTime<Utc>,
        holidays: &HolidaySet,
    ) -> DateTime<Utc> {
        let mut current = self.project(start);
        tracing::debug!(
            "Computing +{}d +{}h from {} ({} holidays)",
            days,
            hours,
            current,
            holidays.len()
        );

        if days > 0 {
            current = self.add_business_days(current, days, holidays);
        }
        if hours > 0 {
            current = self.add_business_hours(current, hours, holidays);
        }

        current.with_timezone(&Utc)
    }

    /// Same as [`BusinessCalendar::compute`], using `now` when the request
    /// carries no start instant.
    pub fn compute_request(
        &self,
        request: &CalculationRequest,
        holidays: &HolidaySet,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        self.compute(
            request.days,
            request.hours,
            request.start.unwrap_or(now),
            holidays,
        )
    }
}

/// Business instant on the default calendar (America/Bogota, 08:00-17:00,
/// lunch 12:00-13:00). A missing start means the current instant.
pub fn compute_business_instant(
    days: u32,
    hours: u32,
    start: Option<DateTime<Utc>>,
    holidays: &HolidaySet,
) -> DateTime<Utc> {
    BusinessCalendar::default().compute(days, hours, start.unwrap_or_else(Utc::now), holidays)
}
