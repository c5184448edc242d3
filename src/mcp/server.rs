//! MCP server implementation
//!
//! This module implements the MCP server that exposes the workout tools.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::db::Database;
use crate::workout::WorkoutService;

/// Main MCP server
///
/// Generic over `D: Database` for zero-cost abstraction (no dynamic dispatch).
///
/// Tools are declared in `tools::{workouts, import, logs}`, each contributing
/// a router that is combined here.
pub struct McpServer<D: Database> {
    pub(crate) service: WorkoutService<D>,
    tool_router: ToolRouter<Self>,
}

impl<D: Database> Clone for McpServer<D> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            tool_router: self.tool_router.clone(),
        }
    }
}

impl<D: Database + 'static> McpServer<D> {
    /// Create a new MCP server with the given database
    pub fn new(db: impl Into<Arc<D>>) -> Self {
        Self::with_service(WorkoutService::new(db))
    }

    /// Create a server around an existing service
    pub fn with_service(service: WorkoutService<D>) -> Self {
        Self {
            service,
            tool_router: Self::workout_router() + Self::import_router() + Self::log_router(),
        }
    }

    /// The combined tool router
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }
}

#[tool_handler(router = self.tool_router)]
impl<D: Database + 'static> ServerHandler for McpServer<D> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Liftlog MCP Server - Plan, validate, import and log workouts. Workouts are addressed by ID or by date (YYYY-MM-DD); at most one workout per date.",
        )
    }
}
