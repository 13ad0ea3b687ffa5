use httpmock::prelude::*;
use std::collections::HashMap;
use std::time::Duration;
use working_days::adapters::HolidaySnapshot;
use working_days::app::{handle_gateway_event, ApiGatewayRequest};
use working_days::domain::model::BusinessDateQuery;
use working_days::{
    BusinessCalendar, BusinessDateService, CachedHolidayProvider, HolidaySet, HttpHolidayProvider,
    RequestLimits,
};

const TTL: Duration = Duration::from_secs(24 * 60 * 60);

fn holy_week() -> serde_json::Value {
    serde_json::json!(["2025-04-17", "2025-04-18", "2025-05-01"])
}

fn gateway_event(params: &[(&str, &str)]) -> ApiGatewayRequest {
    ApiGatewayRequest {
        http_method: Some("GET".to_string()),
        path: Some("/calculate-business-date".to_string()),
        query_string_parameters: Some(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

fn service_for(url: String) -> BusinessDateService<CachedHolidayProvider<HttpHolidayProvider>> {
    let provider = HttpHolidayProvider::new(url, Duration::from_secs(5)).unwrap();
    BusinessDateService::new(
        BusinessCalendar::default(),
        CachedHolidayProvider::new(provider, TTL),
        RequestLimits::default(),
    )
}

#[tokio::test]
async fn test_end_to_end_with_remote_holidays() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/WorkingDays.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(holy_week());
    });

    let service = service_for(server.url("/WorkingDays.json"));
    let response = handle_gateway_event(
        &service,
        gateway_event(&[("days", "5"), ("hours", "4"), ("date", "2025-04-10T15:00:00.000Z")]),
    )
    .await;

    api_mock.assert();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers["Content-Type"], "application/json");
    assert_eq!(response.body, r#"{"date":"2025-04-21T20:00:00.000Z"}"#);
}

#[tokio::test]
async fn test_holidays_fetched_once_across_requests() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/WorkingDays.json");
        then.status(200).json_body(holy_week());
    });

    let service = service_for(server.url("/WorkingDays.json"));
    for (hours, expected) in [("1", "2025-09-22T14:00:00.000Z"), ("8", "2025-09-22T22:00:00.000Z")] {
        let response = handle_gateway_event(
            &service,
            gateway_event(&[("hours", hours), ("date", "2025-09-19T22:00:00Z")]),
        )
        .await;
        assert_eq!(response.body, format!(r#"{{"date":"{}"}}"#, expected));
    }

    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_invalid_parameters_do_not_hit_upstream() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/WorkingDays.json");
        then.status(200).json_body(holy_week());
    });

    let service = service_for(server.url("/WorkingDays.json"));

    let cases = [
        (vec![], "At least one of days or hours must be provided"),
        (vec![("days", "0"), ("hours", "0")], "At least one of days or hours must be provided"),
        (vec![("hours", "two")], "Hours must be a non-negative integer"),
        (
            vec![("days", "1"), ("date", "2025-04-10 15:00:00")],
            "Date must be in ISO 8601 format with Z suffix",
        ),
    ];

    for (params, message) in cases {
        let response = handle_gateway_event(&service, gateway_event(&params)).await;
        assert_eq!(response.status_code, 400);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "InvalidParameters");
        assert_eq!(body["message"], message);
    }

    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_upstream_failure_without_cache_is_service_unavailable() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/WorkingDays.json");
        then.status(502);
    });

    let service = service_for(server.url("/WorkingDays.json"));
    let response = handle_gateway_event(&service, gateway_event(&[("hours", "1")])).await;

    api_mock.assert();
    assert_eq!(response.status_code, 503);
    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "ServiceUnavailable");
    assert_eq!(body["message"], "Unable to fetch holidays");
}

#[tokio::test]
async fn test_expired_cache_served_when_upstream_fails() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/WorkingDays.json");
        then.status(500);
    });

    let provider =
        HttpHolidayProvider::new(server.url("/WorkingDays.json"), Duration::from_secs(5)).unwrap();
    let fetched_at = chrono::DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let cache = CachedHolidayProvider::with_snapshot(
        provider,
        TTL,
        HolidaySnapshot::new(HolidaySet::from_strings(["2025-04-17", "2025-04-18"]), fetched_at),
    );
    let service = BusinessDateService::new(BusinessCalendar::default(), cache, RequestLimits::default());

    let query = BusinessDateQuery {
        days: Some("1".to_string()),
        hours: None,
        date: Some("2025-04-16T15:00:00Z".to_string()),
    };
    let result = service.calculate(&query).await.unwrap();

    api_mock.assert();
    assert_eq!(
        working_days::app::format_instant(result),
        "2025-04-21T15:00:00.000Z"
    );
}
