use anyhow::Context;
use dotenvy::dotenv;

use instructor_led::instructor_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use instructor_led::instructor_db::{Store, init_db_pool, run_migrations};
use instructor_led::logging::init_tracing;
use instructor_led::router::init_router;
use instructor_led::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guards = init_tracing().context("Failed to create logs directory")?;

    let jwt_config = JwtConfig::from_env();
    jwt_config.validate()?;
    let server_config = ServerConfig::from_env();

    let pool = init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to connect to database")?;
    if server_config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let state = AppState::new(Store::postgres(pool), &jwt_config, CorsConfig::from_env());
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!("🚀 Server running on http://{}", address);
    tracing::info!("📚 Swagger UI available at http://{}/swagger-ui", address);
    tracing::info!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
