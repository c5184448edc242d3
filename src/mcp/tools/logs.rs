//! MCP tools for exercise logs.

use chrono::{DateTime, Utc};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::db::{Database, ExerciseLog, SetEntry};
use crate::mcp::McpServer;
use crate::mcp::tools::args::{Args, field};
use crate::mcp::tools::{failure, success};
use crate::workout::log_entry::SetSummary;
use crate::workout::{NewLog, Operation, OperationContext, OperationError, WorkoutError};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogExerciseParams {
    #[serde(default)]
    #[schemars(description = "Workout ID")]
    pub workout_id: Value,
    #[serde(default)]
    #[schemars(description = "Exercise ID, e.g. '<workoutId>_exercise_1'")]
    pub exercise_id: Value,
    #[serde(default)]
    #[schemars(
        description = "Sets actually performed: [{reps?: integer 0-999, duration?: 'MM:SS' | 'HH:MM:SS' | '30s' | '5min', weight?: '135 lbs', notes?: string}]"
    )]
    pub sets: Value,
    #[serde(default)]
    #[schemars(description = "Comments, at most 500 characters (optional)")]
    pub comments: Value,
    #[serde(default)]
    #[schemars(
        description = "When the exercise was performed, RFC 3339 (optional, defaults to now)"
    )]
    pub logged_at: Value,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListExerciseLogsParams {
    #[serde(default)]
    #[schemars(description = "Workout ID")]
    pub workout_id: Value,
}

fn set_entries(args: &mut Args, sets: &Value) -> Vec<SetEntry> {
    let Some(items) = args.array("sets", sets) else {
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("sets.{}", i);
        let Some(set) = args.object(&path, item) else {
            continue;
        };
        entries.push(SetEntry {
            reps: args.integer(&format!("{}.reps", path), field(set, "reps")),
            duration: args.string(&format!("{}.duration", path), field(set, "duration")),
            weight: args.string(&format!("{}.weight", path), field(set, "weight")),
            notes: args.string(&format!("{}.notes", path), field(set, "notes")),
        });
    }
    entries
}

fn parse_logged_at(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, OperationError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };

    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|e| WorkoutError::Validation(vec![format!("loggedAt: {}", e)]))
        .during(Operation::LogExercise)
}

/// A stored log alongside its interpreted sets.
#[derive(Serialize)]
struct LogView<'a> {
    #[serde(flatten)]
    log: &'a ExerciseLog,
    summary: Vec<SetSummary>,
}

impl<'a> LogView<'a> {
    fn of(log: &'a ExerciseLog) -> Self {
        Self {
            log,
            summary: log.actual.sets.iter().map(SetSummary::of).collect(),
        }
    }
}

// =============================================================================
// Log Tools
// =============================================================================

#[tool_router(router = log_router, vis = "pub(crate)")]
impl<D: Database + 'static> McpServer<D> {
    #[tool(
        description = "Record the sets actually performed for one exercise of a workout. At least one set with data, or a comment, is required."
    )]
    pub async fn log_exercise(
        &self,
        params: Parameters<LogExerciseParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut args = Args::default();
        let workout_id = args.required_string("workoutId", &params.workout_id);
        let exercise_id = args.required_string("exerciseId", &params.exercise_id);
        let sets = set_entries(&mut args, &params.sets);
        let comments = args.string("comments", &params.comments);
        let logged_at = args.string("loggedAt", &params.logged_at);
        if let Err(e) = args.finish().during(Operation::LogExercise) {
            return failure(e);
        }

        let logged_at = match parse_logged_at(logged_at.as_deref()) {
            Ok(logged_at) => logged_at,
            Err(e) => return failure(e),
        };

        let log = NewLog {
            workout_id,
            exercise_id,
            sets,
            comments: comments.unwrap_or_default(),
            logged_at,
        };

        match self.service.log_exercise(log).await {
            Ok(created) => success(&json!({
                "success": true,
                "log": LogView::of(&created),
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "List exercise logs recorded for a workout, oldest first.")]
    pub async fn list_exercise_logs(
        &self,
        params: Parameters<ListExerciseLogsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut args = Args::default();
        let workout_id = args.required_string("workoutId", &params.0.workout_id);
        if let Err(e) = args.finish().during(Operation::ListExerciseLogs) {
            return failure(e);
        }

        match self.service.list_exercise_logs(&workout_id).await {
            Ok(logs) => success(&json!({
                "success": true,
                "count": logs.len(),
                "logs": logs.iter().map(LogView::of).collect::<Vec<_>>(),
            })),
            Err(e) => failure(e),
        }
    }
}
