use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::db::{Database, ExerciseLog, SetEntry};
use crate::workout::WorkoutService;

#[derive(Tabled)]
struct LogDisplay {
    #[tabled(rename = "Logged")]
    logged_at: String,
    #[tabled(rename = "Exercise")]
    exercise_id: String,
    #[tabled(rename = "Sets")]
    sets: String,
    #[tabled(rename = "Comments")]
    comments: String,
}

impl From<&ExerciseLog> for LogDisplay {
    fn from(log: &ExerciseLog) -> Self {
        Self {
            logged_at: log.logged_at.format("%Y-%m-%d %H:%M").to_string(),
            exercise_id: log.exercise_id.clone(),
            sets: format_logged_sets(&log.actual.sets),
            comments: if log.comments.is_empty() {
                "-".to_string()
            } else {
                truncate_with_ellipsis(&log.comments, 40)
            },
        }
    }
}

/// Logged sets as `5 @ 135 lbs, 1:30`.
fn format_logged_sets(sets: &[SetEntry]) -> String {
    let parts: Vec<String> = sets
        .iter()
        .filter(|s| s.has_data())
        .map(|s| {
            let mut part = match (&s.reps, &s.duration) {
                (Some(reps), Some(duration)) => format!("{} x {}", reps, duration),
                (Some(reps), None) => reps.to_string(),
                (None, Some(duration)) => duration.clone(),
                (None, None) => String::new(),
            };
            if let Some(weight) = s.weight.as_deref().filter(|w| !w.trim().is_empty()) {
                if part.is_empty() {
                    part = weight.to_string();
                } else {
                    part = format!("{} @ {}", part, weight);
                }
            }
            part
        })
        .collect();

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

/// List exercise logs recorded for a workout
pub async fn list_logs<D: Database>(
    service: &WorkoutService<D>,
    workout_id: &str,
    format: &str,
) -> CliResult<String> {
    let logs = service.list_exercise_logs(workout_id).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&logs)?),
        _ => Ok(format_table(&logs)),
    }
}

fn format_table(logs: &[ExerciseLog]) -> String {
    if logs.is_empty() {
        return "No exercise logs found.".to_string();
    }

    let display: Vec<LogDisplay> = logs.iter().map(LogDisplay::from).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}
