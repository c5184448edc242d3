//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::db::Database;
use crate::workout::WorkoutService;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// This function creates a StreamableHttpService that can be nested into an Axum router.
///
/// # Arguments
/// * `service` - Workout service shared by every session
/// * `cancellation_token` - Token for graceful shutdown
///
/// # Example
/// ```no_run
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use liftlog::db::{Database, SqliteDatabase};
/// # use liftlog::mcp::create_mcp_service;
/// # use liftlog::workout::WorkoutService;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let db = SqliteDatabase::in_memory().await?;
/// # db.migrate().await?;
///
/// let ct = CancellationToken::new();
/// let mcp_service = create_mcp_service(WorkoutService::new(db), ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<D: Database + 'static>(
    service: WorkoutService<D>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<D>, LocalSessionManager> {
    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<McpServer<D>, std::io::Error> {
        Ok(McpServer::with_service(service.clone()))
    };

    let config = StreamableHttpServerConfig::default()
        .with_stateful_mode(true) // Enable session management
        .with_cancellation_token(cancellation_token);

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
