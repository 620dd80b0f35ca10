use std::sync::Arc;

use javap_api::ApiServer;
use javap_config::{AppConfig, LogFormatChoice, ProcessorSettings};
use javap_core::{DefaultPasteRegistry, PasteService, PasteStore, Processor, SdkRegistry};
use javap_data::PgPasteStore;
use javap_processor::{CommandProcessor, MeteredProcessor};
use javap_telemetry::{LogFormat, LoggingConfig, Metrics};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Dependencies required to bootstrap the javap service.
pub(crate) struct BootstrapDependencies {
    config: AppConfig,
    telemetry: Metrics,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config = AppConfig::from_env().map_err(|err| AppError::config("config.from_env", err))?;
        let telemetry =
            Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        Ok(Self { config, telemetry })
    }
}

/// Entry point for the javap boot sequence.
///
/// # Errors
///
/// Returns an error if configuration, logging, the database, the built-in
/// pastes, or the HTTP listener fail.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies { config, telemetry } = dependencies;

    let logging = LoggingConfig {
        level: &config.logging.level,
        format: log_format(config.logging.format),
        ..LoggingConfig::default()
    };
    javap_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    info!(config = ?config, "javap bootstrap starting");

    let pool = javap_data::connect(&config.database.url, config.database.max_connections)
        .await
        .map_err(|err| AppError::data("database.connect", err))?;
    let store = PgPasteStore::new(pool)
        .await
        .map_err(|err| AppError::data("paste_store.new", err))?;

    let sdks = SdkRegistry::standard();
    let service = build_service(Arc::new(store), &sdks, &config.processor, &telemetry).await?;
    info!(
        defaults = service.defaults().pastes().len(),
        "built-in pastes ready"
    );

    let addr = config.http.socket_addr();
    info!(addr = %addr, "launching api listener");
    ApiServer::new(service, sdks, telemetry)
        .serve(addr)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))
}

/// Wire the metered command processor and the built-in pastes around `store`.
pub(crate) async fn build_service(
    store: Arc<dyn PasteStore>,
    sdks: &SdkRegistry,
    settings: &ProcessorSettings,
    telemetry: &Metrics,
) -> AppResult<PasteService> {
    let command = CommandProcessor::new(sdks.clone(), settings.clone());
    let processor: Arc<dyn Processor> =
        Arc::new(MeteredProcessor::new(Arc::new(command), telemetry.clone()));
    let defaults = DefaultPasteRegistry::build(sdks, processor.as_ref())
        .await
        .map_err(|err| AppError::processor("defaults.build", err))?;
    Ok(PasteService::new(store, processor, Arc::new(defaults)))
}

const fn log_format(choice: Option<LogFormatChoice>) -> LogFormat {
    match choice {
        Some(LogFormatChoice::Json) => LogFormat::Json,
        Some(LogFormatChoice::Pretty) => LogFormat::Pretty,
        None => LogFormat::infer(),
    }
}
