//! Workout operation errors.

use std::fmt;

use chrono::NaiveDate;
use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;
use crate::import::CsvError;

/// Why a workout operation failed.
#[derive(Error, Diagnostic, Debug)]
pub enum WorkoutError {
    #[error("Validation failed: {}", .0.join(", "))]
    #[diagnostic(code(liftlog::workout::validation_failed))]
    Validation(Vec<String>),

    #[error("A workout already exists for {0}")]
    #[diagnostic(
        code(liftlog::workout::date_conflict),
        help("Update the existing workout instead, or pick another date.")
    )]
    DateConflict(NaiveDate),

    #[error("No workout found for date {0}")]
    NoWorkoutOnDate(String),

    #[error("Workout with ID {0} not found")]
    #[diagnostic(code(liftlog::workout::not_found))]
    NotFound(String),

    #[error("Multiple workouts found for date {0}. Use workout ID instead.")]
    #[diagnostic(code(liftlog::workout::ambiguous_date))]
    AmbiguousDate(NaiveDate),

    #[error("Exercise {exercise_id} not found in workout {workout_id}")]
    #[diagnostic(code(liftlog::workout::exercise_not_found))]
    ExerciseNotFound {
        workout_id: String,
        exercise_id: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),
}

/// The public operation an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateWorkout,
    GetWorkout,
    ListWorkouts,
    UpdateWorkout,
    DeleteWorkout,
    ImportWorkouts,
    LogExercise,
    ListExerciseLogs,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::CreateWorkout => "create workout",
            Operation::GetWorkout => "get workout",
            Operation::ListWorkouts => "list workouts",
            Operation::UpdateWorkout => "update workout",
            Operation::DeleteWorkout => "delete workout",
            Operation::ImportWorkouts => "import workouts",
            Operation::LogExercise => "log exercise",
            Operation::ListExerciseLogs => "list exercise logs",
        };
        write!(f, "{}", s)
    }
}

/// A failed operation with its cause.
#[derive(Error, Diagnostic, Debug)]
#[error("Failed to {operation}: {source}")]
#[diagnostic(code(liftlog::workout::operation_failed))]
pub struct OperationError {
    pub operation: Operation,
    #[source]
    #[diagnostic_source]
    pub source: WorkoutError,
}

impl OperationError {
    /// Validation messages, when the operation was rejected by the validator.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match &self.source {
            WorkoutError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Attach the failing operation to a result.
pub trait OperationContext<T> {
    fn during(self, operation: Operation) -> Result<T, OperationError>;
}

impl<T, E: Into<WorkoutError>> OperationContext<T> for Result<T, E> {
    fn during(self, operation: Operation) -> Result<T, OperationError> {
        self.map_err(|e| OperationError {
            operation,
            source: e.into(),
        })
    }
}

pub type WorkoutResult<T> = Result<T, WorkoutError>;
