//! API Gateway proxy shapes for the Lambda entry point.

use crate::app::service::{ApiResponse, BusinessDateService};
use crate::core::HolidayProvider;
use crate::domain::model::BusinessDateQuery;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl ApiGatewayRequest {
    pub fn query(&self) -> BusinessDateQuery {
        let param = |name: &str| {
            self.query_string_parameters
                .as_ref()
                .and_then(|params| params.get(name).cloned())
        };
        BusinessDateQuery {
            days: param("days"),
            hours: param("hours"),
            date: param("date"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl From<ApiResponse> for ApiGatewayResponse {
    fn from(response: ApiResponse) -> Self {
        let body = response.to_json().unwrap_or_else(|e| {
            tracing::error!("Failed to serialize response body: {}", e);
            r#"{"error":"ServiceUnavailable","message":"An unexpected error occurred"}"#.to_string()
        });
        Self {
            status_code: response.status_code,
            headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            body,
        }
    }
}

pub async fn handle_gateway_event<P: HolidayProvider>(
    service: &BusinessDateService<P>,
    request: ApiGatewayRequest,
) -> ApiGatewayResponse {
    tracing::debug!(
        "{} {}",
        request.http_method.as_deref().unwrap_or("GET"),
        request.path.as_deref().unwrap_or("/")
    );
    service.handle(&request.query()).await.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_proxy_event() {
        let event: ApiGatewayRequest = serde_json::from_value(serde_json::json!({
            "httpMethod": "GET",
            "path": "/calculate-business-date",
            "queryStringParameters": {"hours": "1", "date": "2025-09-19T22:00:00Z"},
            "headers": {},
            "requestContext": {}
        }))
        .unwrap();

        let query = event.query();
        assert_eq!(query.days, None);
        assert_eq!(query.hours.as_deref(), Some("1"));
        assert_eq!(query.date.as_deref(), Some("2025-09-19T22:00:00Z"));
    }

    #[test]
    fn test_null_query_parameters() {
        let event: ApiGatewayRequest =
            serde_json::from_str(r#"{"queryStringParameters": null}"#).unwrap();
        assert_eq!(event.query(), BusinessDateQuery::default());
    }

    #[test]
    fn test_response_shape() {
        let err = crate::utils::error::WorkingDaysError::invalid_parameters("bad");
        let response = ApiGatewayResponse::from(ApiResponse::error(&err));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["headers"]["Content-Type"], "application/json");
        assert_eq!(
            json["body"],
            r#"{"error":"InvalidParameters","message":"bad"}"#
        );
    }
}
