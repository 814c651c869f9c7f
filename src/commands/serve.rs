//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MemoryUserStore, SeaUserStore, UserStore};
use crate::services::{JwtIssuer, TokenIssuer};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let (store, database): (Arc<dyn UserStore>, Option<Arc<Database>>) = if args.in_memory {
        tracing::warn!("Using in-memory user store; users are lost on shutdown");
        (Arc::new(MemoryUserStore::new()), None)
    } else {
        let db = Database::connect(&config)
            .await
            .map_err(|e| AppError::storage(format!("Database connection failed: {}", e)))?;
        (
            Arc::new(SeaUserStore::new(db.get_connection())),
            Some(Arc::new(db)),
        )
    };

    let token_issuer: Arc<dyn TokenIssuer> = Arc::new(JwtIssuer::new(config.token_config()));
    let app = create_router(AppState::new(store, token_issuer, database));

    let host = args.host.unwrap_or_else(|| config.server_host.clone());
    let port = args.port.unwrap_or(config.server_port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
