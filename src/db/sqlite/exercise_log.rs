//! SQLite ExerciseLogRepository implementation.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};

use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{Actual, DbError, DbResult, ExerciseLog, ExerciseLogRepository};

/// SQLx-backed exercise log repository.
pub struct SqliteExerciseLogRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ExerciseLogRepository for SqliteExerciseLogRepository<'a> {
    async fn create(&self, log: &ExerciseLog) -> DbResult<ExerciseLog> {
        // Use provided ID if not empty, otherwise generate one
        let id = if log.id.is_empty() {
            generate_entity_id()
        } else {
            log.id.clone()
        };

        let sets_json =
            serde_json::to_string(&log.actual.sets).map_err(|e| DbError::InvalidData {
                message: format!("cannot serialize sets: {}", e),
            })?;

        sqlx::query(
            r#"
            INSERT INTO exercise_log (id, workout_id, exercise_id, logged_at, sets, comments, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&log.workout_id)
        .bind(&log.exercise_id)
        .bind(format_logged_at(&log.logged_at))
        .bind(&sets_json)
        .bind(&log.comments)
        .bind(current_timestamp())
        .execute(self.pool)
        .await?;

        Ok(ExerciseLog {
            id,
            ..log.clone()
        })
    }

    async fn get(&self, id: &str) -> DbResult<ExerciseLog> {
        let row = sqlx::query(
            "SELECT id, workout_id, exercise_id, logged_at, sets, comments
             FROM exercise_log WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let row = row.ok_or(DbError::NotFound {
            entity_type: "ExerciseLog".to_string(),
            id: id.to_string(),
        })?;

        row_to_log(&row)
    }

    async fn list_by_workout(&self, workout_id: &str) -> DbResult<Vec<ExerciseLog>> {
        let rows = sqlx::query(
            "SELECT id, workout_id, exercise_id, logged_at, sets, comments
             FROM exercise_log WHERE workout_id = ?
             ORDER BY logged_at ASC",
        )
        .bind(workout_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(row_to_log).collect()
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_logged_at(logged_at: &DateTime<Utc>) -> String {
    logged_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert a database row to an ExerciseLog model.
fn row_to_log(row: &sqlx::sqlite::SqliteRow) -> DbResult<ExerciseLog> {
    let id: String = row.get("id");

    let logged_at_str: String = row.get("logged_at");
    let logged_at = DateTime::parse_from_rfc3339(&logged_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData {
            message: format!("exercise log {} has invalid timestamp: {}", id, e),
        })?;

    let sets_json: String = row.get("sets");
    let sets = serde_json::from_str(&sets_json).map_err(|e| DbError::InvalidData {
        message: format!("exercise log {} has invalid sets: {}", id, e),
    })?;

    Ok(ExerciseLog {
        id,
        workout_id: row.get("workout_id"),
        exercise_id: row.get("exercise_id"),
        logged_at,
        actual: Actual { sets },
        comments: row.get("comments"),
    })
}
