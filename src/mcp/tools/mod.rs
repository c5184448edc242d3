//! MCP tool implementations
//!
//! Tools are grouped by concern, each group contributing its own router to
//! [`McpServer`](crate::mcp::McpServer):
//!
//! - `workouts`: create, validate, list, get, update, delete
//! - `import`: CSV import
//! - `logs`: exercise logging
//!
//! Every tool answers with pretty-printed JSON text. Failures are returned
//! as tool results flagged as errors, never as protocol errors.

mod args;
pub mod import;
pub mod logs;
pub mod workouts;


use std::fmt::Display;

use rmcp::{ErrorData as McpError, model::*};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

/// Successful tool result carrying `value` as pretty JSON.
pub(crate) fn success(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_failed",
            Some(json!({"error": e.to_string()})),
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Error tool result `{"success": false, "error": "<message>"}`.
pub(crate) fn failure(error: impl Display) -> Result<CallToolResult, McpError> {
    let message = error.to_string();
    warn!(error = %message, "Tool call failed");

    let body = json!({ "success": false, "error": message });
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    Ok(CallToolResult::error(vec![Content::text(text)]))
}
