// Application layer: the request façade around the calendar engine.

pub mod gateway;
pub mod request;
pub mod service;

pub use gateway::{handle_gateway_event, ApiGatewayRequest, ApiGatewayResponse};
pub use request::{parse_query, RequestLimits};
pub use service::{format_instant, ApiResponse, BusinessDateService, ResponseBody};
