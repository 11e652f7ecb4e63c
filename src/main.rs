use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

use sora::{
    Ctx, app, logging,
    resolver::{LocaleResolver, create_default_resolver},
    settings::AppConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config =
        AppConfig::load(config_path.as_deref()).context("failed to load configuration")?;

    let _log_guard = logging::init(&config.log)?;

    let resolver = create_default_resolver(&config).context("failed to build media resolver")?;
    let ctx = Ctx::new(resolver, LocaleResolver::new(&config.locale));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!("Sora listening on {}", address);

    axum::serve(listener, app(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Sora stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
