//! MCP tools for workout management.

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

use crate::db::Database;
use crate::mcp::McpServer;
use crate::mcp::tools::args::{Args, field};
use crate::mcp::tools::{failure, success};
use crate::workout::{ExerciseUpdate, Operation, OperationContext, WorkoutUpdate};

// =============================================================================
// Parameter Structs
// =============================================================================

/// Workout fields are left untyped so that shape problems come back as
/// validation errors instead of rejected calls.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkoutParams {
    #[serde(default)]
    #[schemars(description = "Workout name (non-empty)")]
    pub name: Value,
    #[serde(default)]
    #[schemars(description = "Workout date in YYYY-MM-DD format. Only one workout per date.")]
    pub date: Value,
    #[serde(default)]
    #[schemars(
        description = "Exercises: [{name, description, order (positive integer, unique), planned: {sets: [numbers], unit: 'reps'|'seconds'|'minutes', weight?: {amount, unit: 'lb'|'kg'|'bodyweight'}, equipment?, isUnilateral?}}]"
    )]
    pub exercises: Value,
}

impl WorkoutParams {
    fn candidate(self) -> Value {
        json!({
            "name": self.name,
            "date": self.date,
            "exercises": self.exercises,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkoutsParams {
    #[serde(default)]
    #[schemars(description = "Start date filter in YYYY-MM-DD format, inclusive (optional)")]
    pub start_date: Value,
    #[serde(default)]
    #[schemars(description = "End date filter in YYYY-MM-DD format, inclusive (optional)")]
    pub end_date: Value,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IdentifierParams {
    #[serde(default)]
    #[schemars(description = "Workout ID or date in YYYY-MM-DD format (string)")]
    pub identifier: Value,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutParams {
    #[serde(default)]
    #[schemars(description = "Workout ID or date in YYYY-MM-DD format (string)")]
    pub identifier: Value,
    #[serde(default)]
    #[schemars(
        description = "Fields to change; omitted fields are kept: {name?: string, date?: 'YYYY-MM-DD', exercises?: [same shape as create_workout]}"
    )]
    pub updates: Value,
    #[serde(default)]
    #[schemars(
        description = "true: replace all exercises. false (default): merge by position, so exercise i overwrites existing exercise i and extras are appended."
    )]
    pub replace_exercises: Value,
}

/// Read the `updates` object of an update call.
fn workout_update(args: &mut Args, updates: &Value) -> WorkoutUpdate {
    if updates.is_null() {
        return WorkoutUpdate::default();
    }
    let Some(obj) = args.object("updates", updates) else {
        return WorkoutUpdate::default();
    };

    WorkoutUpdate {
        name: args.string("updates.name", field(obj, "name")),
        date: args.string("updates.date", field(obj, "date")),
        exercises: args
            .array("updates.exercises", field(obj, "exercises"))
            .map(<[Value]>::to_vec),
    }
}

// =============================================================================
// Workout Tools
// =============================================================================

#[tool_router(router = workout_router, vis = "pub(crate)")]
impl<D: Database + 'static> McpServer<D> {
    #[tool(
        description = "Create a new workout. The workout is validated first; a workout already scheduled on the same date is rejected. Unilateral exercises are detected from name and description when isUnilateral is omitted."
    )]
    pub async fn create_workout(
        &self,
        params: Parameters<WorkoutParams>,
    ) -> Result<CallToolResult, McpError> {
        let candidate = params.0.candidate();

        match self.service.create(&candidate).await {
            Ok(created) => {
                let mut response = json!({
                    "success": true,
                    "workout": created.workout,
                });
                if !created.warnings.is_empty() {
                    response["validation"] = json!({ "warnings": created.warnings });
                }
                success(&response)
            }
            Err(e) => failure(e),
        }
    }

    #[tool(
        description = "Validate workout data structure and business rules without saving. Returns {valid, errors, warnings?}."
    )]
    pub async fn validate_workout(
        &self,
        params: Parameters<WorkoutParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.service.validate(&params.0.candidate());
        success(&result)
    }

    #[tool(
        description = "List existing workouts, newest first, optionally filtered by an inclusive date range."
    )]
    pub async fn list_workouts(
        &self,
        params: Parameters<ListWorkoutsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut args = Args::default();
        let start = args.string("startDate", &params.0.start_date);
        let end = args.string("endDate", &params.0.end_date);
        if let Err(e) = args.finish().during(Operation::ListWorkouts) {
            return failure(e);
        }

        match self.service.list(start.as_deref(), end.as_deref()).await {
            Ok(workouts) => success(&json!({
                "success": true,
                "count": workouts.len(),
                "workouts": workouts,
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "Get details of a specific workout by ID or date (YYYY-MM-DD).")]
    pub async fn get_workout(
        &self,
        params: Parameters<IdentifierParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut args = Args::default();
        let identifier = args.required_string("identifier", &params.0.identifier);
        if let Err(e) = args.finish().during(Operation::GetWorkout) {
            return failure(e);
        }

        match self.service.get(&identifier).await {
            Ok(workout) => success(&json!({ "success": true, "workout": workout })),
            Err(e) => failure(e),
        }
    }

    #[tool(
        description = "Update a workout by ID or date. Exercises merge by position unless replaceExercises is true. The resulting workout is re-validated before saving."
    )]
    pub async fn update_workout(
        &self,
        params: Parameters<UpdateWorkoutParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut args = Args::default();
        let identifier = args.required_string("identifier", &params.identifier);
        let update = workout_update(&mut args, &params.updates);
        let replace = args.bool("replaceExercises", &params.replace_exercises);
        if let Err(e) = args.finish().during(Operation::UpdateWorkout) {
            return failure(e);
        }
        let mode = ExerciseUpdate::from_replace_flag(replace.unwrap_or(false));

        match self.service.update(&identifier, update, mode).await {
            Ok(workout) => success(&json!({
                "success": true,
                "workout": workout,
                "message": "Workout updated successfully",
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(
        description = "Delete a workout by ID or date, together with all of its exercise logs."
    )]
    pub async fn delete_workout(
        &self,
        params: Parameters<IdentifierParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut args = Args::default();
        let identifier = args.required_string("identifier", &params.0.identifier);
        if let Err(e) = args.finish().during(Operation::DeleteWorkout) {
            return failure(e);
        }

        match self.service.delete(&identifier).await {
            Ok(deleted) => success(&json!({
                "success": true,
                "deletedWorkout": deleted.deleted_workout,
                "deletedExerciseLogs": deleted.deleted_exercise_logs,
                "message": format!(
                    "Workout deleted successfully. Also removed {} associated exercise logs.",
                    deleted.deleted_exercise_logs
                ),
            })),
            Err(e) => failure(e),
        }
    }
}
