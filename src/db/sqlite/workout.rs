//! SQLite WorkoutRepository implementation.

use chrono::{Days, NaiveDate};
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{
    DbError, DbResult, Exercise, Workout, WorkoutQuery, WorkoutRepository, calendar_date,
};

const SELECT_WORKOUT: &str = "SELECT id, name, date, exercises FROM workout";

/// SQLx-backed workout repository.
pub struct SqliteWorkoutRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> WorkoutRepository for SqliteWorkoutRepository<'a> {
    async fn create(&self, workout: &Workout) -> DbResult<Workout> {
        let mut conn = self.pool.acquire().await?;
        insert_workout(&mut *conn, workout).await
    }

    async fn create_many(&self, workouts: &[Workout]) -> DbResult<Vec<Workout>> {
        let mut tx = self.pool.begin().await?;

        let mut created = Vec::with_capacity(workouts.len());
        for workout in workouts {
            created.push(insert_workout(&mut *tx, workout).await?);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn get(&self, id: &str) -> DbResult<Workout> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_WORKOUT))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or(DbError::NotFound {
            entity_type: "Workout".to_string(),
            id: id.to_string(),
        })?;

        row_to_workout(&row)
    }

    async fn find_by_date(&self, date: NaiveDate) -> DbResult<Vec<Workout>> {
        let rows = sqlx::query(&format!(
            "{} WHERE date = ? ORDER BY created_at ASC",
            SELECT_WORKOUT
        ))
        .bind(format_date(date))
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(row_to_workout).collect()
    }

    async fn list(&self, query: &WorkoutQuery) -> DbResult<Vec<Workout>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut bind_values: Vec<String> = Vec::new();

        if let Some(start) = query.start {
            conditions.push("date >= ?");
            bind_values.push(format_date(start));
        }

        if let Some(end) = query.end {
            // Inclusive end date becomes an exclusive "day after" bound
            let day_after = end
                .checked_add_days(Days::new(1))
                .ok_or_else(|| DbError::InvalidData {
                    message: format!("end date out of range: {}", end),
                })?;
            conditions.push("date < ?");
            bind_values.push(format_date(day_after));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY date DESC, created_at DESC",
            SELECT_WORKOUT, where_clause
        );

        let mut query_builder = sqlx::query(&sql);
        for value in &bind_values {
            query_builder = query_builder.bind(value);
        }

        let rows = query_builder.fetch_all(self.pool).await?;
        rows.iter().map(row_to_workout).collect()
    }

    async fn update(&self, workout: &Workout) -> DbResult<()> {
        let exercises_json = exercises_to_json(&workout.exercises)?;

        let result = sqlx::query(
            r#"
            UPDATE workout
            SET name = ?, date = ?, exercises = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&workout.name)
        .bind(format_date(workout.date))
        .bind(&exercises_json)
        .bind(current_timestamp())
        .bind(&workout.id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity_type: "Workout".to_string(),
                id: workout.id.clone(),
            });
        }

        Ok(())
    }

    async fn delete_cascade(&self, id: &str) -> DbResult<usize> {
        let mut tx = self.pool.begin().await?;

        let logs = sqlx::query("DELETE FROM exercise_log WHERE workout_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let workout = sqlx::query("DELETE FROM workout WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if workout.rows_affected() == 0 {
            // Dropping the transaction rolls back the log deletion
            return Err(DbError::NotFound {
                entity_type: "Workout".to_string(),
                id: id.to_string(),
            });
        }

        tx.commit().await?;
        Ok(logs.rows_affected() as usize)
    }
}

/// Insert one workout on an existing connection or transaction.
async fn insert_workout(conn: &mut SqliteConnection, workout: &Workout) -> DbResult<Workout> {
    let mut workout = workout.clone();
    if workout.id.is_empty() {
        workout.assign_id(&generate_entity_id());
    }

    let now = current_timestamp();
    let exercises_json = exercises_to_json(&workout.exercises)?;

    sqlx::query(
        r#"
        INSERT INTO workout (id, name, date, exercises, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&workout.id)
    .bind(&workout.name)
    .bind(format_date(workout.date))
    .bind(&exercises_json)
    .bind(&now)
    .bind(&now)
    .execute(&mut *conn)
    .await?;

    Ok(workout)
}

fn format_date(date: NaiveDate) -> String {
    date.format(calendar_date::FORMAT).to_string()
}

fn exercises_to_json(exercises: &[Exercise]) -> DbResult<String> {
    serde_json::to_string(exercises).map_err(|e| DbError::InvalidData {
        message: format!("cannot serialize exercises: {}", e),
    })
}

/// Convert a database row to a Workout model.
fn row_to_workout(row: &sqlx::sqlite::SqliteRow) -> DbResult<Workout> {
    let id: String = row.get("id");

    let date_str: String = row.get("date");
    let date = NaiveDate::parse_from_str(&date_str, calendar_date::FORMAT).map_err(|e| {
        DbError::InvalidData {
            message: format!("workout {} has invalid date '{}': {}", id, date_str, e),
        }
    })?;

    let exercises_json: String = row.get("exercises");
    let exercises = serde_json::from_str(&exercises_json).map_err(|e| DbError::InvalidData {
        message: format!("workout {} has invalid exercises: {}", id, e),
    })?;

    Ok(Workout {
        id,
        name: row.get("name"),
        date,
        exercises,
    })
}
