//! Boundary snapping: maps any timestamp onto a working instant.
//!
//! Snapping is a small state machine. Each step classifies the current
//! timestamp, then either settles on a result or advances to the next
//! civil day and classifies again. Every advance moves the civil date
//! forward by exactly one day, which bounds the loop.

use crate::core::calendar::BusinessCalendar;
use crate::domain::model::HolidaySet;
use chrono::DateTime;
use chrono_tz::Tz;

/// Where a timestamp sits relative to the working calendar, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapState {
    NonWorkingDay,
    BeforeWindow,
    AfterWindow,
    Lunch,
    Valid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    /// Nearest working instant.
    #[default]
    Nearest,
    /// Once a working date is reached, settle on the end of its window.
    /// Used when a day count starts from a non-working day.
    EndOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advance(DateTime<Tz>),
    Settle(DateTime<Tz>),
}

impl BusinessCalendar {
    pub fn classify(&self, dt: &DateTime<Tz>, holidays: &HolidaySet) -> SnapState {
        if self.is_non_working_day(dt, holidays) {
            SnapState::NonWorkingDay
        } else if self.is_before_window(dt) {
            SnapState::BeforeWindow
        } else if self.is_after_window(dt) {
            SnapState::AfterWindow
        } else if self.is_lunch_window(dt) {
            SnapState::Lunch
        } else {
            SnapState::Valid
        }
    }

    pub fn transition(&self, state: SnapState, dt: &DateTime<Tz>, mode: SnapMode) -> Transition {
        let hours = self.hours();
        match (state, mode) {
            (SnapState::NonWorkingDay, _) => {
                Transition::Advance(self.at_window_start(&self.next_day(dt)))
            }
            (_, SnapMode::EndOfDay) => Transition::Settle(self.at_time(dt, hours.end)),
            (SnapState::BeforeWindow, _) => Transition::Settle(self.at_window_start(dt)),
            (SnapState::AfterWindow, _) => {
                Transition::Advance(self.at_window_start(&self.next_day(dt)))
            }
            (SnapState::Lunch, _) => Transition::Settle(self.at_time(dt, hours.lunch_start)),
            (SnapState::Valid, _) => Transition::Settle(*dt),
        }
    }

    /// Applies the snap rules until a result settles.
    pub fn snap(&self, dt: DateTime<Tz>, holidays: &HolidaySet, mode: SnapMode) -> DateTime<Tz> {
        let mut current = dt;
        for _ in 0..=self.day_advance_limit(holidays) {
            let state = self.classify(&current, holidays);
            match self.transition(state, &current, mode) {
                Transition::Settle(result) => return result,
                Transition::Advance(next) => current = next,
            }
        }
        tracing::warn!("Snap did not settle for {}; returning last candidate", dt);
        current
    }
}
