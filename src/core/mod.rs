pub mod calendar;
pub mod engine;
pub mod snap;

pub use crate::domain::model::{BusinessHours, CalculationRequest, ClockTime, HolidaySet};
pub use crate::domain::ports::{ConfigProvider, HolidayProvider};
pub use crate::utils::error::Result;
pub use calendar::BusinessCalendar;
pub use engine::compute_business_instant;
pub use snap::{SnapMode, SnapState};
