//! Workout operations over a [`Database`].
//!
//! Every public method wraps its failure in an [`OperationError`] naming
//! the operation, e.g. `Failed to update workout: Validation failed: ...`.
//!
//! The duplicate-date guard on create and update is check-then-act: two
//! concurrent creates for the same date can both succeed.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::db::{
    Actual, Database, DbError, Exercise, ExerciseLog, ExerciseLogRepository, Id, SetEntry,
    Workout, WorkoutQuery, WorkoutRepository, calendar_date, exercise_id,
};
use crate::import::{self, ImportSummary};
use crate::workout::error::{
    Operation, OperationContext, OperationError, WorkoutError, WorkoutResult,
};
use crate::workout::log_entry::validate_log;
use crate::workout::unilateral;
use crate::workout::units::{is_iso_date, parse_iso_date};
use crate::workout::validator::{NewExercise, Validated, ValidationResult, Validator};

// =============================================================================
// Inputs
// =============================================================================

/// How incoming exercises are combined with the stored ones on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExerciseUpdate {
    /// Positional merge: incoming exercise `i` overwrites the name,
    /// description, plan and order of stored exercise `i` and keeps its id.
    /// Extra incoming exercises are appended with fresh ids. Inserting or
    /// removing an exercise mid-list therefore shifts data onto neighbours.
    #[default]
    Merge,
    /// Discard stored exercises and key the incoming ones `1..=n`.
    Replace,
}

impl ExerciseUpdate {
    pub fn from_replace_flag(replace: bool) -> Self {
        if replace { Self::Replace } else { Self::Merge }
    }
}

/// Fields to change on an existing workout. Absent fields are kept.
///
/// Dates and exercises stay untyped so that bad input surfaces as
/// validation errors on the composed workout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutUpdate {
    pub name: Option<String>,
    pub date: Option<String>,
    pub exercises: Option<Vec<Value>>,
}

impl WorkoutUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.date.is_none() && self.exercises.is_none()
    }
}

/// A performance record to attach to an exercise.
#[derive(Debug, Clone)]
pub struct NewLog {
    pub workout_id: Id,
    pub exercise_id: Id,
    pub sets: Vec<SetEntry>,
    pub comments: String,
    /// Defaults to now.
    pub logged_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Outputs
// =============================================================================

/// A freshly created workout and the validator's advisory warnings.
#[derive(Debug, Clone, Serialize)]
pub struct Created {
    pub workout: Workout,
    pub warnings: Vec<String>,
}

/// Condensed view of a workout for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub id: Id,
    pub name: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub exercise_count: usize,
    pub exercises: Vec<ExerciseSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSummary {
    pub name: String,
    pub description: String,
    pub order: u32,
}

impl From<&Workout> for WorkoutSummary {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id.clone(),
            name: workout.name.clone(),
            date: workout.date,
            exercise_count: workout.exercises.len(),
            exercises: workout
                .exercises
                .iter()
                .map(|e| ExerciseSummary {
                    name: e.name.clone(),
                    description: e.description.clone(),
                    order: e.order,
                })
                .collect(),
        }
    }
}

/// What a delete removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub deleted_workout: DeletedWorkout,
    pub deleted_exercise_logs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletedWorkout {
    pub id: Id,
    pub name: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
}

// =============================================================================
// Service
// =============================================================================

/// Workout operations backed by a database.
///
/// Generic over `D: Database` so handlers stay statically dispatched.
pub struct WorkoutService<D: Database> {
    db: Arc<D>,
    today: Option<NaiveDate>,
}

impl<D: Database> Clone for WorkoutService<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            today: self.today,
        }
    }
}

impl<D: Database> WorkoutService<D> {
    pub fn new(db: impl Into<Arc<D>>) -> Self {
        Self {
            db: db.into(),
            today: None,
        }
    }

    /// Pin the date used for date-plausibility warnings.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn db(&self) -> &D {
        &self.db
    }

    fn validator(&self) -> Validator {
        self.today.map_or_else(Validator::new, Validator::at)
    }

    /// Validate a candidate workout without saving it.
    pub fn validate(&self, candidate: &Value) -> ValidationResult {
        self.validator().validate(candidate)
    }

    /// Validate and persist a new workout.
    #[instrument(skip(self, candidate))]
    pub async fn create(&self, candidate: &Value) -> Result<Created, OperationError> {
        self.create_workout(candidate)
            .await
            .during(Operation::CreateWorkout)
    }

    async fn create_workout(&self, candidate: &Value) -> WorkoutResult<Created> {
        let Validated { workout, warnings } = self
            .validator()
            .check(candidate)
            .map_err(|result| WorkoutError::Validation(result.errors))?;

        let workouts = self.db.workouts();
        if !workouts.find_by_date(workout.date).await?.is_empty() {
            return Err(WorkoutError::DateConflict(workout.date));
        }

        let draft = Workout {
            id: String::new(),
            name: workout.name,
            date: workout.date,
            exercises: workout
                .exercises
                .into_iter()
                .map(|e| incoming_exercise(e, String::new()))
                .collect(),
        };

        let created = workouts.create(&draft).await?;
        info!(id = %created.id, date = %created.date, "Created workout");

        Ok(Created {
            workout: created,
            warnings,
        })
    }

    /// Fetch a workout by id, or by date when the identifier is `YYYY-MM-DD`.
    #[instrument(skip(self))]
    pub async fn get(&self, identifier: &str) -> Result<Workout, OperationError> {
        self.resolve(identifier).await.during(Operation::GetWorkout)
    }

    async fn resolve(&self, identifier: &str) -> WorkoutResult<Workout> {
        if is_iso_date(identifier) {
            let Some(date) = parse_iso_date(identifier) else {
                return Err(WorkoutError::NoWorkoutOnDate(identifier.to_string()));
            };

            let mut found = self.db.workouts().find_by_date(date).await?;
            return match found.len() {
                0 => Err(WorkoutError::NoWorkoutOnDate(identifier.to_string())),
                1 => Ok(found.remove(0)),
                _ => Err(WorkoutError::AmbiguousDate(date)),
            };
        }

        self.db
            .workouts()
            .get(identifier)
            .await
            .map_err(|e| match e {
                DbError::NotFound { .. } => WorkoutError::NotFound(identifier.to_string()),
                other => other.into(),
            })
    }

    /// Summaries of workouts between two inclusive `YYYY-MM-DD` bounds,
    /// newest first. Empty bounds are ignored.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<WorkoutSummary>, OperationError> {
        self.list_workouts(start, end)
            .await
            .during(Operation::ListWorkouts)
    }

    async fn list_workouts(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> WorkoutResult<Vec<WorkoutSummary>> {
        let mut errors = Vec::new();
        let query = WorkoutQuery {
            start: parse_bound("startDate", start, &mut errors),
            end: parse_bound("endDate", end, &mut errors),
        };
        if !errors.is_empty() {
            return Err(WorkoutError::Validation(errors));
        }

        let workouts = self.db.workouts().list(&query).await?;
        debug!(count = workouts.len(), "Listed workouts");
        Ok(workouts.iter().map(WorkoutSummary::from).collect())
    }

    /// Apply `update` to the workout named by `identifier`.
    ///
    /// The composed workout is validated as a whole; nothing is written if
    /// it fails. An empty update returns the stored workout untouched.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        identifier: &str,
        update: WorkoutUpdate,
        mode: ExerciseUpdate,
    ) -> Result<Workout, OperationError> {
        self.update_workout(identifier, update, mode)
            .await
            .during(Operation::UpdateWorkout)
    }

    async fn update_workout(
        &self,
        identifier: &str,
        update: WorkoutUpdate,
        mode: ExerciseUpdate,
    ) -> WorkoutResult<Workout> {
        let existing = self.resolve(identifier).await?;
        if update.is_empty() {
            return Ok(existing);
        }

        let workouts = self.db.workouts();

        if let Some(date) = update.date.as_deref().and_then(parse_iso_date) {
            let on_date = workouts.find_by_date(date).await?;
            if on_date.iter().any(|w| w.id != existing.id) {
                return Err(WorkoutError::DateConflict(date));
            }
        }

        let slots = compose_exercises(&existing, update.exercises, mode);
        let candidate = json!({
            "name": update.name.unwrap_or_else(|| existing.name.clone()),
            "date": update
                .date
                .unwrap_or_else(|| existing.date.format(calendar_date::FORMAT).to_string()),
            "exercises": slots.iter().map(|s| &s.value).collect::<Vec<_>>(),
        });

        let Validated { workout, warnings } = self
            .validator()
            .check(&candidate)
            .map_err(|result| WorkoutError::Validation(result.errors))?;
        if !warnings.is_empty() {
            debug!(?warnings, "Update accepted with warnings");
        }

        let mut next_seq = existing.next_exercise_seq();
        let exercises = workout
            .exercises
            .into_iter()
            .zip(slots)
            .enumerate()
            .map(|(index, (exercise, slot))| {
                let id = match (mode, slot.kept_id) {
                    (ExerciseUpdate::Replace, _) => exercise_id(&existing.id, index + 1),
                    (ExerciseUpdate::Merge, Some(id)) => id,
                    (ExerciseUpdate::Merge, None) => {
                        let id = exercise_id(&existing.id, next_seq);
                        next_seq += 1;
                        id
                    }
                };
                if slot.incoming {
                    incoming_exercise(exercise, id)
                } else {
                    stored_exercise(exercise, id)
                }
            })
            .map(|mut exercise| {
                exercise.workout_id = existing.id.clone();
                exercise
            })
            .collect();

        let updated = Workout {
            id: existing.id.clone(),
            name: workout.name,
            date: workout.date,
            exercises,
        };

        workouts.update(&updated).await?;
        info!(id = %updated.id, "Updated workout");

        Ok(workouts.get(&updated.id).await?)
    }

    /// Delete a workout and all of its exercise logs in one batch.
    #[instrument(skip(self))]
    pub async fn delete(&self, identifier: &str) -> Result<Deleted, OperationError> {
        self.delete_workout(identifier)
            .await
            .during(Operation::DeleteWorkout)
    }

    async fn delete_workout(&self, identifier: &str) -> WorkoutResult<Deleted> {
        let workout = self.resolve(identifier).await?;
        let deleted_exercise_logs = self.db.workouts().delete_cascade(&workout.id).await?;
        info!(id = %workout.id, deleted_exercise_logs, "Deleted workout");

        Ok(Deleted {
            deleted_workout: DeletedWorkout {
                id: workout.id,
                name: workout.name,
                date: workout.date,
            },
            deleted_exercise_logs,
        })
    }

    /// Parse CSV text and store every workout it describes in one batch.
    ///
    /// Imports are not run through the validator or the duplicate-date
    /// guard; any malformed row aborts the whole import.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub async fn import_csv(&self, text: &str) -> Result<ImportSummary, OperationError> {
        self.import_workouts(text)
            .await
            .during(Operation::ImportWorkouts)
    }

    async fn import_workouts(&self, text: &str) -> WorkoutResult<ImportSummary> {
        let rows = import::parse_rows(text)?;
        let drafts = import::group_rows(&rows)?;
        let created = self.db.workouts().create_many(&drafts).await?;

        let summary = ImportSummary::new(rows.len(), &created);
        info!(
            rows = summary.rows,
            workouts = summary.workouts_created,
            "Imported workouts"
        );
        Ok(summary)
    }

    /// Record what was actually performed for one exercise.
    #[instrument(
        skip(self, log),
        fields(workout_id = %log.workout_id, exercise_id = %log.exercise_id)
    )]
    pub async fn log_exercise(&self, log: NewLog) -> Result<ExerciseLog, OperationError> {
        self.log(log).await.during(Operation::LogExercise)
    }

    async fn log(&self, log: NewLog) -> WorkoutResult<ExerciseLog> {
        let errors = validate_log(&log.sets, &log.comments);
        if !errors.is_empty() {
            return Err(WorkoutError::Validation(errors));
        }

        let workout = self
            .db
            .workouts()
            .get(&log.workout_id)
            .await
            .map_err(|e| match e {
                DbError::NotFound { .. } => WorkoutError::NotFound(log.workout_id.clone()),
                other => other.into(),
            })?;

        if !workout.exercises.iter().any(|e| e.id == log.exercise_id) {
            return Err(WorkoutError::ExerciseNotFound {
                workout_id: log.workout_id,
                exercise_id: log.exercise_id,
            });
        }

        let entry = ExerciseLog {
            id: String::new(),
            workout_id: log.workout_id,
            exercise_id: log.exercise_id,
            logged_at: log.logged_at.unwrap_or_else(Utc::now),
            actual: Actual { sets: log.sets },
            comments: log.comments,
        };

        let created = self.db.exercise_logs().create(&entry).await?;
        info!(id = %created.id, "Logged exercise");
        Ok(created)
    }

    /// Exercise logs for a workout, oldest first.
    #[instrument(skip(self))]
    pub async fn list_exercise_logs(
        &self,
        workout_id: &str,
    ) -> Result<Vec<ExerciseLog>, OperationError> {
        self.db
            .exercise_logs()
            .list_by_workout(workout_id)
            .await
            .during(Operation::ListExerciseLogs)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// One exercise of an update-in-progress.
struct Slot {
    value: Value,
    kept_id: Option<Id>,
    incoming: bool,
}

fn compose_exercises(
    existing: &Workout,
    incoming: Option<Vec<Value>>,
    mode: ExerciseUpdate,
) -> Vec<Slot> {
    let stored = || {
        existing.exercises.iter().map(|e| Slot {
            value: exercise_value(e),
            kept_id: Some(e.id.clone()),
            incoming: false,
        })
    };

    let Some(incoming) = incoming else {
        return stored().collect();
    };

    match mode {
        ExerciseUpdate::Replace => incoming
            .into_iter()
            .map(|value| Slot {
                value,
                kept_id: None,
                incoming: true,
            })
            .collect(),
        ExerciseUpdate::Merge => {
            let mut slots: Vec<Slot> = stored().collect();
            for (index, value) in incoming.into_iter().enumerate() {
                match slots.get_mut(index) {
                    Some(slot) => {
                        slot.value = value;
                        slot.incoming = true;
                    }
                    None => slots.push(Slot {
                        value,
                        kept_id: None,
                        incoming: true,
                    }),
                }
            }
            slots
        }
    }
}

fn exercise_value(exercise: &Exercise) -> Value {
    json!({
        "name": exercise.name,
        "description": exercise.description,
        "order": exercise.order,
        "planned": exercise.planned,
    })
}

/// Exercise from client input, with unilateral detection applied.
fn incoming_exercise(exercise: NewExercise, id: Id) -> Exercise {
    let mut planned = exercise.planned;
    unilateral::apply(&mut planned, &exercise.name, &exercise.description);
    Exercise {
        id,
        workout_id: String::new(),
        name: exercise.name,
        description: exercise.description,
        planned,
        order: exercise.order,
    }
}

fn stored_exercise(exercise: NewExercise, id: Id) -> Exercise {
    Exercise {
        id,
        workout_id: String::new(),
        name: exercise.name,
        description: exercise.description,
        planned: exercise.planned,
        order: exercise.order,
    }
}

fn parse_bound(field: &str, value: Option<&str>, errors: &mut Vec<String>) -> Option<NaiveDate> {
    let value = value.filter(|v| !v.is_empty())?;
    let date = parse_iso_date(value);
    if date.is_none() {
        errors.push(format!(
            "{}: Date must be in YYYY-MM-DD format, received '{}'",
            field, value
        ));
    }
    date
}
