#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use working_days::app::{handle_gateway_event, ApiGatewayRequest};
#[cfg(feature = "lambda")]
use working_days::core::ConfigProvider;
#[cfg(feature = "lambda")]
use working_days::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use working_days::{BusinessDateService, CachedHolidayProvider, HttpHolidayProvider, LambdaConfig};

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    // one service per container, so the holiday cache survives warm invocations
    let provider = CachedHolidayProvider::new(
        HttpHolidayProvider::from_config(&config)?,
        config.cache_ttl(),
    );
    let service = BusinessDateService::from_config(&config, provider);
    let service = &service;

    tracing::info!(
        "Business date handler ready ({}, {})",
        config.timezone(),
        config.business_hours()
    );

    run(service_fn(
        move |event: LambdaEvent<ApiGatewayRequest>| async move {
            Ok::<_, Error>(handle_gateway_event(service, event.payload).await)
        },
    ))
    .await
}
