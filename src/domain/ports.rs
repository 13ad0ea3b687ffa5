use crate::domain::model::{BusinessHours, HolidaySet};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono_tz::Tz;
use std::time::Duration;

/// Source of non-working dates.
#[async_trait]
pub trait HolidayProvider: Send + Sync {
    async fn fetch_holidays(&self) -> Result<HolidaySet>;
}

#[async_trait]
impl<P: HolidayProvider + ?Sized> HolidayProvider for std::sync::Arc<P> {
    async fn fetch_holidays(&self) -> Result<HolidaySet> {
        (**self).fetch_holidays().await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn holidays_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn cache_ttl(&self) -> Duration;
    fn timezone(&self) -> Tz;
    fn business_hours(&self) -> BusinessHours;
    fn max_days(&self) -> u32;
    fn max_hours(&self) -> u32;
}
