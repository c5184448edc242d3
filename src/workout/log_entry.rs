//! Checks for logged set entries.

use serde::Serialize;

use crate::db::{SetEntry, WeightUnit};
use crate::workout::units::{
    is_duration_text, is_weight_text, parse_duration_text, parse_weight_text,
};

const MAX_REPS: i64 = 999;
const MAX_COMMENT_CHARS: usize = 500;

/// Validate logged sets and comments, returning every problem found.
///
/// Each entry reads `"<field>: <message>"` where the field is `set<i>.reps`,
/// `set<i>.weight`, `set<i>.duration`, `comments` or `form`.
pub fn validate_log(sets: &[SetEntry], comments: &str) -> Vec<String> {
    let mut errors = Vec::new();

    for (index, set) in sets.iter().enumerate() {
        validate_set(set, index, &mut errors);
    }

    if comments.chars().count() > MAX_COMMENT_CHARS {
        errors.push(format!(
            "comments: Comments cannot exceed {} characters",
            MAX_COMMENT_CHARS
        ));
    }

    if !sets.iter().any(SetEntry::has_data) && comments.trim().is_empty() {
        errors.push("form: Please enter at least one set or add comments".to_string());
    }

    errors
}

fn validate_set(set: &SetEntry, index: usize, errors: &mut Vec<String>) {
    if let Some(reps) = set.reps {
        if reps < 0 {
            errors.push(format!("set{}.reps: Reps cannot be negative", index));
        }
        if reps > MAX_REPS {
            errors.push(format!("set{}.reps: Reps cannot exceed {}", index, MAX_REPS));
        }
    }

    if let Some(weight) = non_blank(&set.weight)
        && !is_weight_text(weight)
    {
        errors.push(format!(
            "set{}.weight: Weight must be a number optionally followed by lbs/kg",
            index
        ));
    }

    if let Some(duration) = non_blank(&set.duration)
        && !is_duration_text(duration)
    {
        errors.push(format!(
            "set{}.duration: Duration must be in format MM:SS, HH:MM:SS, or number with unit (e.g., 30s, 5min)",
            index
        ));
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// A logged set with its free-text fields interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<WeightUnit>,
}

impl SetSummary {
    pub fn of(set: &SetEntry) -> Self {
        let weight = non_blank(&set.weight).and_then(parse_weight_text);
        Self {
            reps: set.reps,
            duration_seconds: non_blank(&set.duration).and_then(parse_duration_text),
            weight_amount: weight.map(|w| w.amount),
            weight_unit: weight.and_then(|w| w.unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(reps: Option<i64>, weight: Option<&str>, duration: Option<&str>) -> SetEntry {
        SetEntry {
            reps,
            weight: weight.map(String::from),
            duration: duration.map(String::from),
            notes: None,
        }
    }

    #[test]
    fn accepts_well_formed_sets() {
        let sets = [set(Some(10), Some("135 lbs"), None), set(None, None, Some("1:30"))];
        assert!(validate_log(&sets, "").is_empty());
    }

    #[test]
    fn reports_each_bad_field_with_its_set_index() {
        let sets = [
            set(Some(-1), None, None),
            set(Some(1000), Some("heavy"), Some("a while")),
        ];
        let errors = validate_log(&sets, "");
        assert_eq!(errors.len(), 4);
        assert!(errors[0].starts_with("set0.reps: Reps cannot be negative"));
        assert!(errors[1].starts_with("set1.reps: Reps cannot exceed 999"));
        assert!(errors[2].starts_with("set1.weight:"));
        assert!(errors[3].starts_with("set1.duration:"));
    }

    #[test]
    fn requires_some_data_or_comments() {
        let empty = [set(None, Some("  "), None)];
        assert_eq!(
            validate_log(&empty, " "),
            vec!["form: Please enter at least one set or add comments"]
        );
        assert!(validate_log(&empty, "skipped, knee sore").is_empty());
        assert!(validate_log(&[], "rest day").is_empty());
    }

    #[test]
    fn limits_comment_length() {
        let comments = "x".repeat(501);
        let errors = validate_log(&[set(Some(5), None, None)], &comments);
        assert_eq!(errors, vec!["comments: Comments cannot exceed 500 characters"]);
    }

    #[test]
    fn summary_interprets_text_fields() {
        let summary = SetSummary::of(&set(Some(8), Some("60kg"), Some("2 min")));
        assert_eq!(summary.reps, Some(8));
        assert_eq!(summary.weight_amount, Some(60.0));
        assert_eq!(summary.weight_unit, Some(WeightUnit::Kg));
        assert_eq!(summary.duration_seconds, Some(120));
    }
}
