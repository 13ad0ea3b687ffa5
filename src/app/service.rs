use crate::app::request::{parse_query, RequestLimits};
use crate::core::{BusinessCalendar, ConfigProvider, HolidayProvider, Result};
use crate::domain::model::BusinessDateQuery;
use crate::utils::error::{ErrorKind, WorkingDaysError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Absolute ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Date { date: String },
    Error { error: ErrorKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn success(date: DateTime<Utc>) -> Self {
        Self {
            status_code: 200,
            body: ResponseBody::Date {
                date: format_instant(date),
            },
        }
    }

    pub fn error(err: &WorkingDaysError) -> Self {
        Self {
            status_code: err.status_code(),
            body: ResponseBody::Error {
                error: err.kind(),
                message: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.body, ResponseBody::Date { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.body)?)
    }
}

/// Validates a query, looks up holidays and runs the engine.
pub struct BusinessDateService<P: HolidayProvider> {
    calendar: BusinessCalendar,
    holidays: P,
    limits: RequestLimits,
}

impl<P: HolidayProvider> BusinessDateService<P> {
    pub fn new(calendar: BusinessCalendar, holidays: P, limits: RequestLimits) -> Self {
        Self {
            calendar,
            holidays,
            limits,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C, holidays: P) -> Self {
        Self::new(
            BusinessCalendar::new(config.timezone(), config.business_hours()),
            holidays,
            RequestLimits {
                max_days: config.max_days(),
                max_hours: config.max_hours(),
            },
        )
    }

    pub async fn calculate(&self, query: &BusinessDateQuery) -> Result<DateTime<Utc>> {
        self.calculate_at(query, Utc::now()).await
    }

    /// Like [`BusinessDateService::calculate`] with an explicit fallback
    /// start for queries without a `date`.
    pub async fn calculate_at(
        &self,
        query: &BusinessDateQuery,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        // reject bad input before touching the holiday source
        let request = parse_query(query, &self.limits)?;
        let holidays = self.holidays.fetch_holidays().await?;
        Ok(self.calendar.compute_request(&request, &holidays, now))
    }

    pub async fn handle(&self, query: &BusinessDateQuery) -> ApiResponse {
        match self.calculate(query).await {
            Ok(date) => {
                tracing::info!("Calculated {} for {:?}", format_instant(date), query);
                ApiResponse::success(date)
            }
            Err(e) => {
                match e.kind() {
                    ErrorKind::InvalidParameters => tracing::warn!("Rejected {:?}: {}", query, e),
                    ErrorKind::ServiceUnavailable => tracing::error!("Request failed: {}", e),
                }
                ApiResponse::error(&e)
            }
        }
    }
}
