//! Domain models for the workout database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application. They serialize with camelCase keys,
//! which is also the shape exchanged with MCP clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the persistence layer.
pub type Id = String;

// =============================================================================
// Query Types
// =============================================================================

/// Date range filter for listing workouts.
///
/// Both bounds are inclusive calendar dates. Storage backends translate
/// `end` into an exclusive "day after" bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

// =============================================================================
// Workouts
// =============================================================================

/// A named, dated collection of planned exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Id,
    pub name: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Workout {
    /// Assign the workout id and key every exercise by its 1-based position.
    ///
    /// Only used when a workout is first persisted or its exercise list is
    /// replaced wholesale.
    pub fn assign_id(&mut self, id: &str) {
        self.id = id.to_string();
        for (index, exercise) in self.exercises.iter_mut().enumerate() {
            exercise.workout_id = id.to_string();
            exercise.id = exercise_id(id, index + 1);
        }
    }

    /// Next free exercise sequence number for this workout.
    ///
    /// Ids are never recomputed, so appended exercises continue after the
    /// highest sequence already in use.
    pub fn next_exercise_seq(&self) -> usize {
        self.exercises
            .iter()
            .filter_map(|e| exercise_seq(&self.id, &e.id))
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// One planned movement within a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Id,
    pub workout_id: Id,
    pub name: String,
    pub description: String,
    pub planned: Planned,
    pub order: u32,
}

/// Prescribed target values for an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planned {
    /// One entry per planned set: reps or a duration, depending on `unit`.
    pub sets: Vec<f64>,
    pub unit: SetUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unilateral: Option<bool>,
}

/// Planned load for an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub amount: f64,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn bodyweight() -> Self {
        Self {
            amount: 0.0,
            unit: WeightUnit::Bodyweight,
        }
    }
}

/// Unit of the values in `Planned::sets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SetUnit {
    #[default]
    Reps,
    Seconds,
    Minutes,
}

impl std::fmt::Display for SetUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetUnit::Reps => write!(f, "reps"),
            SetUnit::Seconds => write!(f, "seconds"),
            SetUnit::Minutes => write!(f, "minutes"),
        }
    }
}

impl std::str::FromStr for SetUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reps" => Ok(SetUnit::Reps),
            "seconds" => Ok(SetUnit::Seconds),
            "minutes" => Ok(SetUnit::Minutes),
            _ => Err(format!("Invalid set unit: {}", s)),
        }
    }
}

/// Unit of a planned weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Lb,
    Kg,
    Bodyweight,
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WeightUnit::Lb => "lb",
            WeightUnit::Kg => "kg",
            WeightUnit::Bodyweight => "bodyweight",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lb" => Ok(WeightUnit::Lb),
            "kg" => Ok(WeightUnit::Kg),
            "bodyweight" => Ok(WeightUnit::Bodyweight),
            _ => Err(format!("Invalid weight unit: {}", s)),
        }
    }
}

/// Build the deterministic id of the `seq`-th exercise of a workout.
pub fn exercise_id(workout_id: &str, seq: usize) -> Id {
    format!("{}_exercise_{}", workout_id, seq)
}

/// Extract the sequence number from an exercise id owned by `workout_id`.
pub fn exercise_seq(workout_id: &str, exercise_id: &str) -> Option<usize> {
    exercise_id
        .strip_prefix(workout_id)?
        .strip_prefix("_exercise_")?
        .parse()
        .ok()
}

// =============================================================================
// Exercise Logs
// =============================================================================

/// What was actually performed for one exercise in one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub id: Id,
    pub workout_id: Id,
    pub exercise_id: Id,
    pub logged_at: DateTime<Utc>,
    pub actual: Actual,
    #[serde(default)]
    pub comments: String,
}

/// Logged performance for an exercise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Actual {
    pub sets: Vec<SetEntry>,
}

/// One performed set. Weight and duration are kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SetEntry {
    /// Whether the set carries any performance data.
    pub fn has_data(&self) -> bool {
        self.reps.is_some() || filled(self.duration.as_deref()) || filled(self.weight.as_deref())
    }
}

fn filled(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.trim().is_empty())
}

/// Serde adapter for `YYYY-MM-DD` calendar dates.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
