//! Tests for grouping parsed rows into workouts.

use chrono::NaiveDate;

use crate::db::Workout;
use crate::import::{CsvError, ImportSummary, group_rows, parse_rows};

const HEADER: &str = "workoutName,date,exerciseName,description,order,Weight,Weight Unit,Equipment,Exercise Measure,Set 1 Count,Set 2 Count,Set 3 Count,Set 4 Count,Set 5 Count";

fn grouped(lines: &[&str]) -> Result<Vec<Workout>, CsvError> {
    let text = format!("{}\n{}", HEADER, lines.join("\n"));
    group_rows(&parse_rows(&text)?)
}

#[test]
fn groups_by_date_and_name_in_first_seen_order() {
    let workouts = grouped(&[
        "Legs,2024-03-02,Squat,Back,1,,,,Reps,5,,,,",
        "Arms,2024-03-01,Curl,Standing,1,,,,Reps,10,,,,",
        "Legs,03/02/2024,Lunge,Walking,2,,,,Reps,12,,,,",
        "Legs,2024-03-03,Squat,Front,1,,,,Reps,5,,,,",
    ])
    .unwrap();

    let keys: Vec<(String, usize)> = workouts
        .iter()
        .map(|w| (format!("{} {}", w.date, w.name), w.exercises.len()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("2024-03-02 Legs".to_string(), 2),
            ("2024-03-01 Arms".to_string(), 1),
            ("2024-03-03 Legs".to_string(), 1),
        ]
    );
}

#[test]
fn same_date_different_names_are_separate_workouts() {
    let workouts = grouped(&[
        "AM Run,2024-03-01,Run,Easy,1,,,,Minutes,30,,,,",
        "PM Lift,2024-03-01,Deadlift,Conventional,1,225,lb,Barbell,Reps,5,5,,,",
    ])
    .unwrap();

    assert_eq!(workouts.len(), 2);
    assert!(workouts.iter().all(|w| w.date == NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
}

#[test]
fn exercises_are_stably_sorted_by_order() {
    let workouts = grouped(&[
        "Legs,2024-03-02,Calf raise,Standing,3,,,,Reps,15,,,,",
        "Legs,2024-03-02,Squat,Back,1,,,,Reps,5,,,,",
        "Legs,2024-03-02,Lunge,Walking,2,,,,Reps,12,,,,",
        "Legs,2024-03-02,Step up,Box,2,,,,Reps,10,,,,",
    ])
    .unwrap();

    let names: Vec<&str> = workouts[0]
        .exercises
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Squat", "Lunge", "Step up", "Calf raise"]);
    assert!(workouts[0].exercises.iter().all(|e| e.id.is_empty()));
}

#[test]
fn unparseable_date_fails_at_grouping() {
    let err = grouped(&[
        "Legs,2024-03-02,Squat,Back,1,,,,Reps,5,,,,",
        "Legs,next week,Squat,Back,1,,,,Reps,5,,,,",
    ])
    .unwrap_err();

    assert_eq!(
        err,
        CsvError::InvalidDate {
            line: 3,
            value: "next week".to_string()
        }
    );
}

#[test]
fn summary_counts_workouts_and_exercises() {
    let workouts = grouped(&[
        "Legs,2024-03-02,Squat,Back,1,,,,Reps,5,,,,",
        "Legs,2024-03-02,Lunge,Walking,2,,,,Reps,12,,,,",
        "Arms,2024-03-01,Curl,Standing,1,,,,Reps,10,,,,",
    ])
    .unwrap();

    let summary = ImportSummary::new(3, &workouts);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.workouts_created, 2);
    assert_eq!(summary.exercises_created, 3);
    assert_eq!(summary.workouts[0].exercise_count, 2);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["workoutsCreated"], 2);
    assert_eq!(json["workouts"][1]["date"], "2024-03-01");
}
