//! Liftlog MCP server binary.
//!
//! Creates the concrete database implementation and serves the workout
//! tools over Streamable HTTP (default) or stdio.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::Router;
use clap::Parser;
use liftlog::db::{Database, DbError, SqliteDatabase};
use liftlog::mcp::{McpServer, create_mcp_service};
use liftlog::paths::resolve_db_path;
use liftlog::workout::WorkoutService;
use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(liftlog::binary::database))]
    Database(#[from] DbError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(liftlog::binary::io))]
    Io(#[from] std::io::Error),

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(liftlog::binary::transport))]
    Transport { message: String },
}

#[derive(Parser)]
#[command(name = "liftlog-mcp")]
#[command(author, version, about = "Liftlog MCP server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3838")]
    port: u16,

    /// Database file path (defaults to ~/.local/share/liftlog/workouts.db)
    #[arg(long, env = "LIFTLOG_DB")]
    db: Option<PathBuf>,

    /// Serve over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,
}

/// Initialize tracing subscriber with env filter
///
/// Logs go to stderr so stdout stays free for the stdio transport.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "liftlog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    run().await?;
    Ok(())
}

async fn run() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    init_tracing();

    let db_path = resolve_db_path(cli.db);
    info!(path = %db_path.display(), "Opening database");

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&db_path).await?;
    db.migrate().await?;
    info!("Database migrations complete");

    let service = WorkoutService::new(db);

    if cli.stdio {
        serve_stdio(service).await
    } else {
        serve_http(service, cli.host, cli.port).await
    }
}

async fn serve_stdio(service: WorkoutService<SqliteDatabase>) -> Result<(), BinaryError> {
    info!("Serving MCP over stdio");

    let running = McpServer::with_service(service)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| BinaryError::Transport {
            message: e.to_string(),
        })?;

    running.waiting().await.map_err(|e| BinaryError::Transport {
        message: e.to_string(),
    })?;
    info!("stdio session ended");
    Ok(())
}

async fn serve_http(
    service: WorkoutService<SqliteDatabase>,
    host: IpAddr,
    port: u16,
) -> Result<(), BinaryError> {
    let ct = CancellationToken::new();

    let app = Router::new()
        .nest_service("/mcp", create_mcp_service(service, ct.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(host, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP server listening on http://{}/mcp", addr);

    let shutdown = ct.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
        }
        shutdown.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;
    Ok(())
}
