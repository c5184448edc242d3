//! Rows to workout drafts.

use std::collections::HashMap;

use serde::Serialize;

use crate::db::{Exercise, Workout};
use crate::import::error::CsvError;
use crate::import::rows::CsvRow;
use crate::workout::WorkoutSummary;
use crate::workout::units::parse_iso_date;

/// Group rows by `(date, workout name)` into unsaved workouts.
///
/// Groups keep first-seen order; within a group rows are stably sorted by
/// `order`. Ids are left empty for the store to assign, which keys the
/// exercises by their sorted position.
pub fn group_rows(rows: &[CsvRow]) -> Result<Vec<Workout>, CsvError> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<Vec<&CsvRow>> = Vec::new();

    for row in rows {
        let key = (row.date.as_str(), row.workout_name.as_str());
        match index.get(&key) {
            Some(&i) => groups[i].push(row),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![row]);
            }
        }
    }

    groups
        .into_iter()
        .map(|mut group| -> Result<Workout, CsvError> {
            let first = group[0];
            let date = parse_iso_date(&first.date).ok_or_else(|| CsvError::InvalidDate {
                line: first.line,
                value: first.date.clone(),
            })?;

            group.sort_by_key(|row| row.order);

            Ok(Workout {
                id: String::new(),
                name: first.workout_name.clone(),
                date,
                exercises: group.into_iter().map(draft_exercise).collect(),
            })
        })
        .collect()
}

fn draft_exercise(row: &CsvRow) -> Exercise {
    Exercise {
        id: String::new(),
        workout_id: String::new(),
        name: row.exercise_name.clone(),
        description: row.description.clone(),
        planned: row.planned.clone(),
        order: row.order,
    }
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Data rows read.
    pub rows: usize,
    pub workouts_created: usize,
    pub exercises_created: usize,
    pub workouts: Vec<WorkoutSummary>,
}

impl ImportSummary {
    pub fn new(rows: usize, created: &[Workout]) -> Self {
        Self {
            rows,
            workouts_created: created.len(),
            exercises_created: created.iter().map(|w| w.exercises.len()).sum(),
            workouts: created.iter().map(WorkoutSummary::from).collect(),
        }
    }
}
