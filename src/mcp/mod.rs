//! Model Context Protocol (MCP) server implementation
//!
//! This module provides an MCP server over the Streamable HTTP transport
//! (or stdio, see the `liftlog-mcp` binary). The server exposes tools for
//! planning, validating, importing and logging workouts.
//!
//! - **server**: `McpServer`, generic over `D: Database`
//! - **service**: Streamable HTTP service for embedding in an Axum router
//! - **tools**: tool handlers grouped by concern (workouts, import, logs)

pub mod server;
mod service;
pub mod tools;


pub use server::McpServer;
pub use service::create_mcp_service;
