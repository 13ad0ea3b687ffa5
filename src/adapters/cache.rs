use crate::core::{HolidayProvider, HolidaySet, Result};
use crate::utils::error::WorkingDaysError;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const MAX_CACHE_TTL_HOURS: u64 = 24 * 30;

/// TTL for a configured hour count; saturates instead of overflowing.
pub fn ttl_from_hours(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

/// A holiday list together with the instant it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySnapshot {
    pub holidays: HolidaySet,
    pub fetched_at: DateTime<Utc>,
}

impl HolidaySnapshot {
    pub fn new(holidays: HolidaySet, fetched_at: DateTime<Utc>) -> Self {
        Self {
            holidays,
            fetched_at,
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

/// Wraps a provider with a time-to-live cache.
///
/// A failed refresh falls back to the last snapshot, however old. Only when
/// nothing has ever been fetched does the failure surface, as
/// `ServiceUnavailable`.
pub struct CachedHolidayProvider<P: HolidayProvider> {
    inner: P,
    ttl: Duration,
    snapshot: Mutex<Option<HolidaySnapshot>>,
}

impl<P: HolidayProvider> CachedHolidayProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            snapshot: Mutex::new(None),
        }
    }

    pub fn with_snapshot(inner: P, ttl: Duration, snapshot: HolidaySnapshot) -> Self {
        Self {
            inner,
            ttl,
            snapshot: Mutex::new(Some(snapshot)),
        }
    }

    pub async fn snapshot(&self) -> Option<HolidaySnapshot> {
        self.snapshot.lock().await.clone()
    }

    pub async fn holidays_at(&self, now: DateTime<Utc>) -> Result<HolidaySet> {
        let mut cached = self.snapshot.lock().await;

        if let Some(snapshot) = cached.as_ref() {
            if snapshot.is_fresh(now, self.ttl) {
                return Ok(snapshot.holidays.clone());
            }
        }

        match self.inner.fetch_holidays().await {
            Ok(holidays) => {
                tracing::info!("Refreshed holiday cache with {} dates", holidays.len());
                *cached = Some(HolidaySnapshot::new(holidays.clone(), now));
                Ok(holidays)
            }
            Err(e) => match cached.as_ref() {
                Some(stale) => {
                    tracing::warn!(
                        "Holiday refresh failed ({}); serving cache from {}",
                        e,
                        stale.fetched_at
                    );
                    Ok(stale.holidays.clone())
                }
                None => {
                    tracing::error!("Holiday refresh failed with no cached data: {}", e);
                    Err(WorkingDaysError::ServiceUnavailable {
                        message: "Unable to fetch holidays".to_string(),
                    })
                }
            },
        }
    }
}

#[async_trait]
impl<P: HolidayProvider> HolidayProvider for CachedHolidayProvider<P> {
    async fn fetch_holidays(&self) -> Result<HolidaySet> {
        self.holidays_at(Utc::now()).await
    }
}
