// Adapters layer: concrete holiday sources and the caching wrapper.

pub mod cache;
pub mod file;
pub mod http;

pub use cache::{CachedHolidayProvider, HolidaySnapshot};
pub use file::FileHolidayProvider;
pub use http::HttpHolidayProvider;
