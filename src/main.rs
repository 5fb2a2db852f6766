use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use study::router::init_router;
use study::state::init_app_state;
use study_config::ServerConfig;
use study_db::run_migrations;
use study_observability::{init_metrics, init_tracing, metrics_app, shutdown_tracer};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;
    run_migrations(&state.db).await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let server = ServerConfig::from_env();
    let listener = TcpListener::bind(server.bind_address()).await?;

    info!(address = %server.bind_address(), "🚀 Server running");
    info!("📚 Swagger UI available at /swagger-ui");
    info!("📖 Scalar UI available at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}
