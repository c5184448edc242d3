//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Methods return `Send` futures so that callers generic over `Database`
//! (the MCP tool handlers in particular) stay `Send` themselves.

use std::future::Future;

use chrono::NaiveDate;

use crate::db::{
    DbResult,
    models::{ExerciseLog, Workout, WorkoutQuery},
};

/// Repository for Workout documents.
pub trait WorkoutRepository: Send + Sync {
    /// Insert a workout. An empty `id` is replaced by a generated one and the
    /// exercises are keyed from it.
    fn create(&self, workout: &Workout) -> impl Future<Output = DbResult<Workout>> + Send;

    /// Insert many workouts in one atomic batch (all or nothing).
    fn create_many(
        &self,
        workouts: &[Workout],
    ) -> impl Future<Output = DbResult<Vec<Workout>>> + Send;

    /// Get a workout by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Workout>> + Send;

    /// All workouts stored for exactly this date.
    fn find_by_date(&self, date: NaiveDate) -> impl Future<Output = DbResult<Vec<Workout>>> + Send;

    /// Workouts within the query's date range, newest first.
    fn list(&self, query: &WorkoutQuery) -> impl Future<Output = DbResult<Vec<Workout>>> + Send;

    /// Overwrite name, date and exercises of an existing workout.
    fn update(&self, workout: &Workout) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a workout and every exercise log referencing it in one batch.
    ///
    /// Returns the number of exercise logs removed.
    fn delete_cascade(&self, id: &str) -> impl Future<Output = DbResult<usize>> + Send;
}

/// Repository for ExerciseLog documents.
pub trait ExerciseLogRepository: Send + Sync {
    /// Insert a log. An empty `id` is replaced by a generated one.
    fn create(&self, log: &ExerciseLog) -> impl Future<Output = DbResult<ExerciseLog>> + Send;

    /// Get a log by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<ExerciseLog>> + Send;

    /// All logs for a workout, oldest first.
    fn list_by_workout(
        &self,
        workout_id: &str,
    ) -> impl Future<Output = DbResult<Vec<ExerciseLog>>> + Send;
}

/// Combined database interface.
///
/// Uses associated types instead of trait objects so repositories can
/// borrow the connection pool without dynamic dispatch.
pub trait Database: Send + Sync {
    type Workouts<'a>: WorkoutRepository
    where
        Self: 'a;
    type ExerciseLogs<'a>: ExerciseLogRepository
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the workout repository.
    fn workouts(&self) -> Self::Workouts<'_>;

    /// Get the exercise log repository.
    fn exercise_logs(&self) -> Self::ExerciseLogs<'_>;
}
