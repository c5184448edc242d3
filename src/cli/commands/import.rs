use std::path::Path;

use crate::cli::error::{CliError, CliResult};
use crate::db::Database;
use crate::workout::WorkoutService;

/// Import workouts from a CSV file
///
/// The whole file is parsed before anything is written; a malformed row
/// aborts the import.
pub async fn import_file<D: Database>(
    service: &WorkoutService<D>,
    path: &Path,
    format: &str,
) -> CliResult<String> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let summary = service.import_csv(&text).await?;

    if format == "json" {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    let mut lines = vec![format!(
        "✓ Imported {} workout(s) with {} exercise(s) from {} row(s)",
        summary.workouts_created, summary.exercises_created, summary.rows
    )];
    lines.extend(
        summary
            .workouts
            .iter()
            .map(|w| format!("  {}  {} ({} exercises)", w.date, w.name, w.exercise_count)),
    );
    Ok(lines.join("\n"))
}
