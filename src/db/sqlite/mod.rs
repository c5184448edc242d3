//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod exercise_log;
mod workout;

#[cfg(test)]
mod workout_test;

pub use connection::SqliteDatabase;
pub use exercise_log::SqliteExerciseLogRepository;
pub use workout::SqliteWorkoutRepository;
