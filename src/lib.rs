pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CachedHolidayProvider, FileHolidayProvider, HttpHolidayProvider};
pub use app::{BusinessDateService, RequestLimits};
pub use config::{lambda::LambdaConfig, toml_config::TomlConfig};
pub use self::core::{compute_business_instant, BusinessCalendar, BusinessHours, HolidaySet};
pub use utils::error::{Result, WorkingDaysError};
