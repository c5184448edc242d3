use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::cli::commands::logs::*;
use crate::db::{Database, SetEntry, SqliteDatabase};
use crate::workout::{NewLog, WorkoutService};

async fn setup() -> (WorkoutService<SqliteDatabase>, String, String) {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Failed to run migrations");
    let service = WorkoutService::new(db);

    let created = service
        .create(&json!({
            "name": "Pull Day",
            "date": "2030-01-01",
            "exercises": [{
                "name": "Row",
                "description": "Barbell row",
                "order": 1,
                "planned": { "sets": [8, 8], "unit": "reps" }
            }]
        }))
        .await
        .unwrap();
    let workout_id = created.workout.id.clone();
    let exercise_id = created.workout.exercises[0].id.clone();
    (service, workout_id, exercise_id)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_logs_empty() {
    let (service, workout_id, _) = setup().await;

    let output = list_logs(&service, &workout_id, "table").await.unwrap();
    assert_eq!(output, "No exercise logs found.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_logs_table() {
    let (service, workout_id, exercise_id) = setup().await;

    service
        .log_exercise(NewLog {
            workout_id: workout_id.clone(),
            exercise_id: exercise_id.clone(),
            sets: vec![
                SetEntry {
                    reps: Some(8),
                    weight: Some("135 lbs".to_string()),
                    ..Default::default()
                },
                SetEntry {
                    duration: Some("1:30".to_string()),
                    ..Default::default()
                },
            ],
            comments: "felt strong".to_string(),
            logged_at: Some(Utc.with_ymd_and_hms(2030, 1, 1, 18, 0, 0).unwrap()),
        })
        .await
        .unwrap();

    let output = list_logs(&service, &workout_id, "table").await.unwrap();
    assert!(output.contains("2030-01-01 18:00"));
    assert!(output.contains("8 @ 135 lbs, 1:30"));
    assert!(output.contains("felt strong"));

    let json = list_logs(&service, &workout_id, "json").await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["exerciseId"], exercise_id.as_str());
}
