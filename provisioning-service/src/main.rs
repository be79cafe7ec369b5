use provisioning_service::{
    config::ProvisioningConfig, services::metrics::init_metrics, Application,
};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ProvisioningConfig::from_env()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );
    init_metrics()?;

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        default_api_host = %config.mist.default_api_host,
        "Starting provisioning service"
    );

    let application = Application::build(config).await?;
    tracing::info!("Listening on port {}", application.port());
    application.run_until_stopped().await?;

    Ok(())
}
