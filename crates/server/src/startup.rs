use std::future::Future;
use std::sync::Arc;

use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::auth::repo::seaorm::SeaOrmUserRepository;
use service::auth::repository::UserRepository;
use service::auth::AuthConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Bind the configured host and port; host names such as `localhost` are resolved.
async fn bind_listener(server: &ServerConfig) -> Result<TcpListener, StartupError> {
    TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|e| StartupError::Bind(format!("{}:{}: {e}", server.host, server.port)))
}

/// Connect, migrate and assemble the handler state from configuration.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migration failed: {e}")))?;
        info!(schema = migration::SCHEMA, "migrations applied");
    }

    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET not configured, using the development secret");
    }

    let repo: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository { db });
    Ok(ServerState::new(repo, AuthConfig::from(&cfg.auth)))
}

/// Resolves once `signal` fires. A signal listener that fails to install
/// never resolves, so the server keeps running instead of stopping at once.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "failed to listen for Ctrl+C, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = build_state(&cfg).await?;
    let app = routes::build_router(state);

    let listener = bind_listener(&cfg.server).await?;
    info!(addr = %listener.local_addr()?, "login_app listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c())).await?;
    Ok(())
}
