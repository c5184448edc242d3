//! Schema and business-rule validation for workout documents.
//!
//! Candidates are untyped JSON so that shape problems (a string `order`,
//! a missing `planned` block) come back as validation errors with a field
//! path rather than as deserialization failures.
//!
//! Validation runs in two phases. The structural check reports every
//! violated field as `"<path>: <message>"` and stops there. Only a
//! structurally sound workout reaches the business rules, which add
//! blocking errors (duplicate `order`, empty sets) and advisory warnings
//! (duplicate names, extreme set counts or magnitudes, implausible dates).

use chrono::{Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::{Planned, SetUnit, Weight, WeightUnit};
use crate::workout::units::{is_iso_date, parse_iso_date};

/// Sets above this count draw a warning.
const MAX_SETS: usize = 10;
/// Rep counts above this draw a warning.
const MAX_REPS: f64 = 100.0;
/// Durations above this many seconds draw a warning.
const MAX_SECONDS: f64 = 600.0;
/// Dates further back than this draw a warning.
const PAST_WINDOW_DAYS: u64 = 7;

/// Outcome of validating a workout candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl ValidationResult {
    fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings: (!warnings.is_empty()).then_some(warnings),
        }
    }

    /// Warnings as a slice, empty when there are none.
    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or_default()
    }
}

/// A structurally valid workout, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub name: String,
    pub date: NaiveDate,
    pub exercises: Vec<NewExercise>,
}

/// A structurally valid exercise, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub name: String,
    pub description: String,
    pub order: u32,
    pub planned: Planned,
}

/// A workout that passed validation, with its advisory warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub workout: NewWorkout,
    pub warnings: Vec<String>,
}

/// Workout validator. Date plausibility is judged against `today`.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    today: NaiveDate,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Validator using the local calendar date.
    pub fn new() -> Self {
        Self::at(Local::now().date_naive())
    }

    /// Validator with a fixed "today".
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Validate a candidate. Never fails; problems are reported in the result.
    pub fn validate(&self, candidate: &Value) -> ValidationResult {
        match self.check(candidate) {
            Ok(validated) => ValidationResult::new(Vec::new(), validated.warnings),
            Err(result) => result,
        }
    }

    /// Validate a candidate, returning the typed workout when it passes.
    pub fn check(&self, candidate: &Value) -> Result<Validated, ValidationResult> {
        let mut schema = SchemaCheck::default();
        let workout = schema.workout(candidate);

        let workout = match workout {
            Some(workout) if schema.errors.is_empty() => workout,
            _ => return Err(ValidationResult::new(schema.errors, Vec::new())),
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        check_duplicate_names(&workout, &mut warnings);
        check_duplicate_orders(&workout, &mut errors);
        check_sets(&workout, &mut errors, &mut warnings);
        self.check_date(workout.date, &mut warnings);

        if errors.is_empty() {
            Ok(Validated { workout, warnings })
        } else {
            Err(ValidationResult::new(errors, warnings))
        }
    }

    fn check_date(&self, date: NaiveDate, warnings: &mut Vec<String>) {
        if let Some(week_ago) = self.today.checked_sub_days(Days::new(PAST_WINDOW_DAYS))
            && date < week_ago
        {
            warnings.push("Workout date is more than a week in the past".to_string());
        }

        if let Some(year_ahead) = self.today.checked_add_months(Months::new(12))
            && date > year_ahead
        {
            warnings.push("Workout date is more than a year in the future".to_string());
        }
    }
}

// =============================================================================
// Business rules
// =============================================================================

fn check_duplicate_names(workout: &NewWorkout, warnings: &mut Vec<String>) {
    let names: Vec<String> = workout
        .exercises
        .iter()
        .map(|e| e.name.to_lowercase())
        .collect();

    let mut duplicates: Vec<&str> = Vec::new();
    for (index, name) in names.iter().enumerate() {
        let first = names.iter().position(|n| n == name);
        if first != Some(index) && !duplicates.contains(&name.as_str()) {
            duplicates.push(name);
        }
    }

    if !duplicates.is_empty() {
        warnings.push(format!(
            "Duplicate exercise names found: {}",
            duplicates.join(", ")
        ));
    }
}

fn check_duplicate_orders(workout: &NewWorkout, errors: &mut Vec<String>) {
    let mut orders: Vec<u32> = workout.exercises.iter().map(|e| e.order).collect();
    orders.sort_unstable();

    for pair in orders.windows(2) {
        if pair[0] == pair[1] {
            errors.push(format!("Duplicate exercise order found: {}", pair[0]));
        }
    }
}

fn check_sets(workout: &NewWorkout, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    for (index, exercise) in workout.exercises.iter().enumerate() {
        let label = format!("Exercise {} ({})", index + 1, exercise.name);
        let sets = &exercise.planned.sets;

        if sets.is_empty() {
            errors.push(format!("{} has no sets planned", label));
        }
        if sets.len() > MAX_SETS {
            warnings.push(format!(
                "{} has unusually high number of sets ({})",
                label,
                sets.len()
            ));
        }

        // Minutes are deliberately unchecked
        for (set_index, &count) in sets.iter().enumerate() {
            match exercise.planned.unit {
                SetUnit::Reps if count > MAX_REPS => warnings.push(format!(
                    "{} set {} has unusually high reps ({})",
                    label,
                    set_index + 1,
                    count
                )),
                SetUnit::Seconds if count > MAX_SECONDS => warnings.push(format!(
                    "{} set {} has unusually long duration ({} seconds)",
                    label,
                    set_index + 1,
                    count
                )),
                _ => {}
            }
        }
    }
}

// =============================================================================
// Structural check
// =============================================================================

#[derive(Default)]
struct SchemaCheck {
    errors: Vec<String>,
}

fn join_path(path: &str, key: impl std::fmt::Display) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// JSON type name as used in `Expected X, received Y` messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl SchemaCheck {
    fn fail(&mut self, path: &str, message: impl Into<String>) {
        let path = if path.is_empty() { "(root)" } else { path };
        self.errors.push(format!("{}: {}", path, message.into()));
    }

    fn expected(&mut self, path: &str, expected: &str, found: &Value) {
        self.fail(
            path,
            format!("Expected {}, received {}", expected, type_name(found)),
        );
    }

    /// Look up a required field, reporting it when absent.
    fn required<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'v Value> {
        let value = obj.get(key).filter(|v| !v.is_null());
        if value.is_none() {
            self.fail(&join_path(path, key), "Required");
        }
        value
    }

    fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.expected(path, "object", other);
                None
            }
        }
    }

    fn non_empty_string(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
        message: &str,
    ) -> Option<String> {
        let field = join_path(path, key);
        match self.required(obj, path, key)? {
            Value::String(s) if s.is_empty() => {
                self.fail(&field, message);
                None
            }
            Value::String(s) => Some(s.clone()),
            other => {
                self.expected(&field, "string", other);
                None
            }
        }
    }

    fn positive_number(&mut self, value: &Value, path: &str, allow_zero: bool) -> Option<f64> {
        let Some(n) = value.as_f64() else {
            self.expected(path, "number", value);
            return None;
        };
        if n > 0.0 || (allow_zero && n == 0.0) {
            Some(n)
        } else {
            let bound = if allow_zero {
                "greater than or equal to 0"
            } else {
                "greater than 0"
            };
            self.fail(path, format!("Number must be {}", bound));
            None
        }
    }

    fn workout(&mut self, candidate: &Value) -> Option<NewWorkout> {
        let obj = self.object(candidate, "")?;

        let name = self.non_empty_string(obj, "", "name", "Workout name is required");
        let date = self.date(obj);
        let exercises = self.exercises(obj);

        Some(NewWorkout {
            name: name?,
            date: date?,
            exercises: exercises?,
        })
    }

    fn date(&mut self, obj: &Map<String, Value>) -> Option<NaiveDate> {
        match self.required(obj, "", "date")? {
            Value::String(s) if !is_iso_date(s) => {
                self.fail("date", "Date must be in YYYY-MM-DD format");
                None
            }
            Value::String(s) => {
                let date = parse_iso_date(s);
                if date.is_none() {
                    self.fail("date", "Invalid calendar date");
                }
                date
            }
            other => {
                self.expected("date", "string", other);
                None
            }
        }
    }

    fn exercises(&mut self, obj: &Map<String, Value>) -> Option<Vec<NewExercise>> {
        let items = match self.required(obj, "", "exercises")? {
            Value::Array(items) => items,
            other => {
                self.expected("exercises", "array", other);
                return None;
            }
        };

        if items.is_empty() {
            self.fail("exercises", "At least one exercise is required");
            return None;
        }

        // Visit every exercise so all errors are reported
        let parsed: Vec<Option<NewExercise>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.exercise(item, &join_path("exercises", index)))
            .collect();

        parsed.into_iter().collect()
    }

    fn exercise(&mut self, value: &Value, path: &str) -> Option<NewExercise> {
        let obj = self.object(value, path)?;

        let name = self.non_empty_string(obj, path, "name", "Exercise name is required");
        let description =
            self.non_empty_string(obj, path, "description", "Exercise description is required");
        let order = self.order(obj, path);
        let planned = self.planned(obj, path);

        Some(NewExercise {
            name: name?,
            description: description?,
            order: order?,
            planned: planned?,
        })
    }

    fn order(&mut self, obj: &Map<String, Value>, path: &str) -> Option<u32> {
        let field = join_path(path, "order");
        let value = self.required(obj, path, "order")?;

        let Some(n) = value.as_f64() else {
            self.expected(&field, "number", value);
            return None;
        };
        if n.fract() != 0.0 {
            self.fail(&field, "Expected integer, received float");
            return None;
        }
        if n <= 0.0 {
            self.fail(&field, "Number must be greater than 0");
            return None;
        }
        if n > f64::from(u32::MAX) {
            self.fail(&field, "Number is too large");
            return None;
        }
        Some(n as u32)
    }

    fn planned(&mut self, obj: &Map<String, Value>, path: &str) -> Option<Planned> {
        let path = join_path(path, "planned");
        let value = obj.get("planned").filter(|v| !v.is_null());
        let Some(value) = value else {
            self.fail(&path, "Required");
            return None;
        };
        let obj = self.object(value, &path)?;

        let sets = self.sets(obj, &path);
        let unit = self.set_unit(obj, &path);
        let weight = self.weight(obj, &path);
        let equipment = self.optional_string(obj, &path, "equipment");
        let is_unilateral = self.optional_bool(obj, &path, "isUnilateral");

        Some(Planned {
            sets: sets?,
            unit: unit?,
            weight: weight?,
            equipment: equipment?,
            is_unilateral: is_unilateral?,
        })
    }

    fn sets(&mut self, obj: &Map<String, Value>, path: &str) -> Option<Vec<f64>> {
        let field = join_path(path, "sets");
        let items = match self.required(obj, path, "sets")? {
            Value::Array(items) => items,
            other => {
                self.expected(&field, "array", other);
                return None;
            }
        };

        // Emptiness is a business rule, reported with the exercise name
        let parsed: Vec<Option<f64>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.positive_number(item, &join_path(&field, index), false))
            .collect();

        parsed.into_iter().collect()
    }

    fn set_unit(&mut self, obj: &Map<String, Value>, path: &str) -> Option<SetUnit> {
        let field = join_path(path, "unit");
        match self.required(obj, path, "unit")? {
            Value::String(s) => match s.parse::<SetUnit>() {
                Ok(unit) => Some(unit),
                Err(_) => {
                    self.fail(
                        &field,
                        format!(
                            "Invalid enum value. Expected 'reps' | 'seconds' | 'minutes', received '{}'",
                            s
                        ),
                    );
                    None
                }
            },
            other => {
                self.expected(&field, "string", other);
                None
            }
        }
    }

    /// Outer `None` means the field was invalid; inner `None` means absent.
    fn weight(&mut self, obj: &Map<String, Value>, path: &str) -> Option<Option<Weight>> {
        let Some(value) = obj.get("weight").filter(|v| !v.is_null()) else {
            return Some(None);
        };

        let path = join_path(path, "weight");
        let obj = self.object(value, &path)?;

        let unit_field = join_path(&path, "unit");
        let unit = match self.required(obj, &path, "unit") {
            Some(Value::String(s)) => match s.parse::<WeightUnit>() {
                Ok(unit) => Some(unit),
                Err(_) => {
                    self.fail(
                        &unit_field,
                        format!(
                            "Invalid enum value. Expected 'lb' | 'kg' | 'bodyweight', received '{}'",
                            s
                        ),
                    );
                    None
                }
            },
            Some(other) => {
                self.expected(&unit_field, "string", other);
                None
            }
            None => None,
        };

        // Bodyweight loads are recorded as zero
        let allow_zero = unit == Some(WeightUnit::Bodyweight);
        let amount = self
            .required(obj, &path, "amount")
            .and_then(|v| self.positive_number(v, &join_path(&path, "amount"), allow_zero));

        Some(Some(Weight {
            amount: amount?,
            unit: unit?,
        }))
    }

    fn optional_string(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<Option<String>> {
        match obj.get(key) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                self.expected(&join_path(path, key), "string", other);
                None
            }
        }
    }

    fn optional_bool(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<Option<bool>> {
        match obj.get(key) {
            None | Some(Value::Null) => Some(None),
            Some(Value::Bool(b)) => Some(Some(*b)),
            Some(other) => {
                self.expected(&join_path(path, key), "boolean", other);
                None
            }
        }
    }
}
