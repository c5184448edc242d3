//! Workout validation and operations.
//!
//! - `units`: parsing of dates, measures, weights and durations
//! - `unilateral`: left/right tracking heuristic
//! - `validator`: schema and business-rule checks
//! - `log_entry`: checks for logged sets
//! - `service`: create/get/list/update/delete, import and logging

mod error;
pub mod log_entry;
mod service;
pub mod unilateral;
pub mod units;
mod validator;


pub use error::{Operation, OperationContext, OperationError, WorkoutError, WorkoutResult};
pub use service::{
    Created, Deleted, DeletedWorkout, ExerciseSummary, ExerciseUpdate, NewLog, WorkoutService,
    WorkoutSummary, WorkoutUpdate,
};
pub use validator::{NewExercise, NewWorkout, Validated, ValidationResult, Validator};
pub(crate) use validator::type_name;
