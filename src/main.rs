use clap::Parser;
use std::sync::Arc;
use working_days::core::{ConfigProvider, HolidayProvider};
use working_days::utils::error::ErrorSeverity;
use working_days::utils::{logger, validation::Validate};
use working_days::{
    BusinessDateService, CliConfig, FileHolidayProvider, HttpHolidayProvider, TomlConfig,
    WorkingDaysError,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => {
                    let holidays_file = config.holidays_file().map(str::to_string);
                    run(&cli, &config, holidays_file.as_deref()).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(&cli, &cli, cli.holidays_file.as_deref()).await,
    };

    match outcome {
        Ok(body) => {
            println!("{}", body);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            println!("{}", working_days::app::ApiResponse::error(&e).to_json()?);

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run<C>(
    cli: &CliConfig,
    config: &C,
    holidays_file: Option<&str>,
) -> Result<String, WorkingDaysError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let provider: Arc<dyn HolidayProvider> = match holidays_file {
        Some(path) => Arc::new(FileHolidayProvider::new(path)),
        None => Arc::new(HttpHolidayProvider::from_config(config)?),
    };
    let service = BusinessDateService::from_config(config, provider);

    let date = service.calculate(&cli.query()).await?;
    working_days::app::ApiResponse::success(date).to_json()
}
