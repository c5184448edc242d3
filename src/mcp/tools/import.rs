//! MCP tool for CSV workout import.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::Database;
use crate::import::ImportSummary;
use crate::mcp::McpServer;
use crate::mcp::tools::args::Args;
use crate::mcp::tools::{failure, success};
use crate::workout::{Operation, OperationContext};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImportWorkoutsParams {
    #[serde(default)]
    #[schemars(
        description = "CSV text with a header row. Columns: workoutName, date, exerciseName, description, order, Weight, Weight Unit, Equipment, Exercise Measure, Set 1 Count, Set 2 Count, Set 3 Count, Set 4 Count, Set 5 Count (optional)."
    )]
    pub csv: Value,
}

#[derive(Serialize)]
struct ImportResponse<'a> {
    success: bool,
    #[serde(flatten)]
    summary: &'a ImportSummary,
}

#[tool_router(router = import_router, vis = "pub(crate)")]
impl<D: Database + 'static> McpServer<D> {
    #[tool(
        description = "Import workouts from CSV text. Rows are grouped into one workout per (date, workoutName). Any malformed row aborts the whole import and nothing is saved. Existing workouts on the same dates are not checked."
    )]
    pub async fn import_workouts(
        &self,
        params: Parameters<ImportWorkoutsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut args = Args::default();
        let csv = args.required_string("csv", &params.0.csv);
        if let Err(e) = args.finish().during(Operation::ImportWorkouts) {
            return failure(e);
        }

        match self.service.import_csv(&csv).await {
            Ok(summary) => success(&ImportResponse {
                success: true,
                summary: &summary,
            }),
            Err(e) => failure(e),
        }
    }
}
