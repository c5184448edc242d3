use std::path::Path;

use serde_json::Value;
use tabled::{Table, Tabled};

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, format_sets, format_weight, truncate_with_ellipsis};
use crate::db::{Database, Exercise, Workout};
use crate::workout::{WorkoutService, WorkoutSummary};

#[derive(Tabled)]
struct WorkoutDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Exercises")]
    exercises: usize,
}

impl From<&WorkoutSummary> for WorkoutDisplay {
    fn from(summary: &WorkoutSummary) -> Self {
        Self {
            id: summary.id.clone(),
            date: summary.date.to_string(),
            name: truncate_with_ellipsis(&summary.name, 40),
            exercises: summary.exercise_count,
        }
    }
}

#[derive(Tabled)]
struct ExerciseDisplay {
    #[tabled(rename = "#")]
    order: u32,
    #[tabled(rename = "Exercise")]
    name: String,
    #[tabled(rename = "Sets")]
    sets: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Equipment")]
    equipment: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Exercise> for ExerciseDisplay {
    fn from(exercise: &Exercise) -> Self {
        Self {
            order: exercise.order,
            name: truncate_with_ellipsis(&exercise.name, 30),
            sets: format_sets(&exercise.planned),
            weight: format_weight(&exercise.planned),
            equipment: exercise
                .planned
                .equipment
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            description: truncate_with_ellipsis(&exercise.description, 40),
        }
    }
}

/// List workouts between optional inclusive date bounds
pub async fn list_workouts<D: Database>(
    service: &WorkoutService<D>,
    start: Option<&str>,
    end: Option<&str>,
    format: &str,
) -> CliResult<String> {
    let workouts = service.list(start, end).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&workouts)?),
        _ => Ok(format_table(&workouts)),
    }
}

fn format_table(workouts: &[WorkoutSummary]) -> String {
    if workouts.is_empty() {
        return "No workouts found.".to_string();
    }

    let display: Vec<WorkoutDisplay> = workouts.iter().map(WorkoutDisplay::from).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Show a single workout by ID or date
pub async fn show_workout<D: Database>(
    service: &WorkoutService<D>,
    identifier: &str,
    format: &str,
) -> CliResult<String> {
    let workout = service.get(identifier).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&workout)?),
        _ => Ok(format_workout_detail(&workout)),
    }
}

fn format_workout_detail(workout: &Workout) -> String {
    use tabled::builder::Builder;

    let mut builder = Builder::default();
    builder.push_record(["Workout ID", &workout.id]);
    builder.push_record(["Name", &workout.name]);
    builder.push_record(["Date", &workout.date.to_string()]);

    let mut header = builder.build();
    apply_table_style(&mut header);

    if workout.exercises.is_empty() {
        return format!("{}\nNo exercises planned.", header);
    }

    let mut exercises: Vec<&Exercise> = workout.exercises.iter().collect();
    exercises.sort_by_key(|e| e.order);
    let mut table = Table::new(exercises.into_iter().map(ExerciseDisplay::from));
    apply_table_style(&mut table);

    format!("{}\n{}", header, table)
}

/// Delete a workout and its exercise logs
pub async fn delete_workout<D: Database>(
    service: &WorkoutService<D>,
    identifier: &str,
) -> CliResult<String> {
    let deleted = service.delete(identifier).await?;

    Ok(format!(
        "✓ Deleted workout: {} ({}, {}) and {} exercise log(s)",
        deleted.deleted_workout.name,
        deleted.deleted_workout.date,
        deleted.deleted_workout.id,
        deleted.deleted_exercise_logs
    ))
}

/// Validate a workout JSON file without saving it
pub fn validate_file<D: Database>(service: &WorkoutService<D>, path: &Path) -> CliResult<String> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let candidate: Value = serde_json::from_str(&text).map_err(|source| CliError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    let result = service.validate(&candidate);
    let mut lines = Vec::new();

    if result.valid {
        lines.push("✓ Workout is valid".to_string());
    } else {
        lines.push(format!("✗ Workout is invalid ({} error(s))", result.errors.len()));
        lines.extend(result.errors.iter().map(|e| format!("  - {}", e)));
    }
    lines.extend(result.warnings().iter().map(|w| format!("  ! {}", w)));

    Ok(lines.join("\n"))
}
