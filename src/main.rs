use anyhow::Context;
use listo_lib::config::AppConfig;
use listo_lib::http::build_router;
use listo_lib::shared::utils::logger::init_logger;
use listo_lib::{build_state, log_info, log_warn, serve};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let state = build_state(&config)
        .await
        .with_context(|| format!("failed to initialize {} storage", config.storage))?;
    let app = build_router(state, config.max_body_bytes);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    log_info!(
        "Server listening on {} ({} storage)",
        config.bind_addr,
        config.storage
    );

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_warn!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        log_info!("Shutdown requested, draining connections");
        signal.cancel();
    });

    serve(listener, app, shutdown).await.context("server error")?;
    log_info!("Server stopped");
    Ok(())
}
