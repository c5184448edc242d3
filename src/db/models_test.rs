//! Tests for domain models.

use chrono::NaiveDate;

use crate::db::models::*;

fn make_exercise(name: &str, order: u32) -> Exercise {
    Exercise {
        id: String::new(),
        workout_id: String::new(),
        name: name.to_string(),
        description: format!("{} description", name),
        planned: Planned {
            sets: vec![10.0, 10.0],
            unit: SetUnit::Reps,
            weight: None,
            equipment: None,
            is_unilateral: None,
        },
        order,
    }
}

#[test]
fn set_unit_deserializes_from_lowercase() {
    let seconds: SetUnit = serde_json::from_str("\"seconds\"").unwrap();
    assert_eq!(seconds, SetUnit::Seconds);
    assert_eq!("minutes".parse::<SetUnit>().unwrap(), SetUnit::Minutes);
    assert!("hours".parse::<SetUnit>().is_err());
}

#[test]
fn weight_unit_display_matches_serde() {
    for unit in [WeightUnit::Lb, WeightUnit::Kg, WeightUnit::Bodyweight] {
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, format!("\"{}\"", unit));
    }
}

#[test]
fn workout_serializes_camel_case_with_plain_date() {
    let mut workout = Workout {
        id: String::new(),
        name: "Push Day".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        exercises: vec![make_exercise("Bench Press", 1)],
    };
    workout.assign_id("w1");

    let json = serde_json::to_value(&workout).unwrap();
    assert_eq!(json["date"], "2024-01-15");
    assert_eq!(json["exercises"][0]["workoutId"], "w1");
    assert_eq!(json["exercises"][0]["id"], "w1_exercise_1");
    // Absent optional fields are omitted, not null
    assert!(json["exercises"][0]["planned"].get("isUnilateral").is_none());
}

#[test]
fn assign_id_keys_exercises_by_position() {
    let mut workout = Workout {
        id: String::new(),
        name: "Legs".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        exercises: vec![make_exercise("Squat", 3), make_exercise("Lunge", 1)],
    };
    workout.assign_id("abc");

    assert_eq!(workout.exercises[0].id, "abc_exercise_1");
    assert_eq!(workout.exercises[1].id, "abc_exercise_2");
    assert!(workout.exercises.iter().all(|e| e.workout_id == "abc"));
}

#[test]
fn next_exercise_seq_continues_after_highest() {
    let mut workout = Workout {
        id: String::new(),
        name: "Legs".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        exercises: vec![make_exercise("Squat", 1), make_exercise("Lunge", 2)],
    };
    workout.assign_id("abc");
    assert_eq!(workout.next_exercise_seq(), 3);

    workout.exercises.remove(0);
    // Removing the first exercise must not let a new one reuse "_exercise_2"
    assert_eq!(workout.next_exercise_seq(), 3);
}

#[test]
fn exercise_seq_rejects_foreign_ids() {
    assert_eq!(exercise_seq("w1", "w1_exercise_4"), Some(4));
    assert_eq!(exercise_seq("w1", "w2_exercise_4"), None);
    assert_eq!(exercise_seq("w1", "temp-123"), None);
}

#[test]
fn set_entry_has_data_ignores_blank_text() {
    let blank = SetEntry {
        weight: Some("  ".to_string()),
        ..Default::default()
    };
    assert!(!blank.has_data());

    let reps = SetEntry {
        reps: Some(0),
        ..Default::default()
    };
    assert!(reps.has_data());
}
