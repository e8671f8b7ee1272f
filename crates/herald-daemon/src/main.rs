use std::sync::Arc;

use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // load config: explicit HERALD_CONFIG path > ~/.herald/herald.toml
    let config_path = std::env::var("HERALD_CONFIG").ok();
    let config = herald_core::HeraldConfig::load(config_path.as_deref())?;

    let registry = herald_core::build_registry(&config.jobs);
    if registry.is_empty() {
        warn!("no valid jobs configured, nothing to schedule");
    }

    let source = herald_report::HttpDataSource::new(&config.source);
    let gateway = herald_telegram::TelegramGateway::new(&config.telegram);
    let retry = herald_report::RetryPolicy::from_config(&config.retry);
    let pipeline = Arc::new(herald_report::ReportPipeline::new(source, gateway, retry));

    let activated = herald_scheduler::activate_all(&registry, &config.scheduler, move |job| {
        let pipeline = Arc::clone(&pipeline);
        async move {
            // job-body boundary: one firing's failure never reaches the
            // scheduler or the other jobs
            if let Err(e) = pipeline.fire(&job).await {
                error!(job = %job.report_id, error = %e, "firing failed");
            }
        }
    });
    info!(
        configured = config.jobs.len(),
        activated,
        "herald started"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received, exiting");
    Ok(())
}
