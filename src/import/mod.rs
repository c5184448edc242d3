//! CSV workout import.
//!
//! Import is a two-step pure transformation, [`parse_rows`] then
//! [`group_rows`], followed by a single atomic batch write done by
//! `WorkoutService::import_csv`.
//!
//! Expected columns: `workoutName, date, exerciseName, description, order,
//! Weight, Weight Unit, Equipment, Exercise Measure, Set 1 Count .. Set 5
//! Count`.

mod error;
mod group;
mod rows;

#[cfg(test)]
mod group_test;

pub use error::{CsvError, MIN_COLUMNS};
pub use group::{ImportSummary, group_rows};
pub use rows::{CsvRow, parse_rows};
