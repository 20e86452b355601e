use std::net::SocketAddr;

use dotenvy::dotenv;
use gsms::housekeeping::spawn_housekeeping;
use gsms::router::init_router;
use gsms::state::init_app_state;
use gsms_config::ServerConfig;
use gsms_observability::{init_tracing, shutdown_tracer};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %format!("{:#}", e), "Server failed");
        shutdown_tracer().await;
        std::process::exit(1);
    }

    shutdown_tracer().await;
}

async fn run() -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env();
    let state = init_app_state(&server_config).await?;

    #[cfg(feature = "observability")]
    if let Some(handle) = gsms_observability::init_metrics() {
        let metrics_addr =
            std::env::var("METRICS_ADDR").unwrap_or_else(|_| "0.0.0.0:9090".to_string());
        let listener = tokio::net::TcpListener::bind(&metrics_addr).await?;
        info!(addr = %metrics_addr, "Metrics available at /metrics");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, gsms_observability::metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    spawn_housekeeping(&state);
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server_config.addr).await?;
    info!(addr = %server_config.addr, "🚀 Server running");
    info!("📚 Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
