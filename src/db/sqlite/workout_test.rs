//! Tests for SqliteWorkoutRepository.

use chrono::NaiveDate;

use crate::db::{
    Actual, Database, DbError, Exercise, ExerciseLog, ExerciseLogRepository, Planned, SetUnit,
    SqliteDatabase, Workout, WorkoutQuery, WorkoutRepository,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn make_exercise(name: &str, order: u32) -> Exercise {
    Exercise {
        id: String::new(),
        workout_id: String::new(),
        name: name.to_string(),
        description: "Controlled tempo".to_string(),
        planned: Planned {
            sets: vec![8.0, 8.0, 8.0],
            unit: SetUnit::Reps,
            weight: None,
            equipment: None,
            is_unilateral: None,
        },
        order,
    }
}

fn make_workout(name: &str, day: &str) -> Workout {
    Workout {
        id: String::new(),
        name: name.to_string(),
        date: date(day),
        exercises: vec![make_exercise("Squat", 1), make_exercise("Lunge", 2)],
    }
}

fn make_log(workout_id: &str, exercise_id: &str) -> ExerciseLog {
    ExerciseLog {
        id: String::new(),
        workout_id: workout_id.to_string(),
        exercise_id: exercise_id.to_string(),
        logged_at: chrono::Utc::now(),
        actual: Actual::default(),
        comments: "felt good".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_create_generates_id_and_exercise_ids() {
    let db = setup_db().await;
    let workouts = db.workouts();

    let created = workouts
        .create(&make_workout("Leg Day", "2024-03-01"))
        .await
        .expect("Create should succeed");

    assert!(!created.id.is_empty());
    assert_eq!(
        created.exercises[0].id,
        format!("{}_exercise_1", created.id)
    );
    assert_eq!(
        created.exercises[1].id,
        format!("{}_exercise_2", created.id)
    );

    let fetched = workouts.get(&created.id).await.expect("Get should succeed");
    assert_eq!(fetched, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_create_keeps_provided_id() {
    let db = setup_db().await;
    let mut workout = make_workout("Leg Day", "2024-03-01");
    workout.assign_id("fixedid1");

    let created = db.workouts().create(&workout).await.unwrap();
    assert_eq!(created.id, "fixedid1");
    assert_eq!(created.exercises[0].id, "fixedid1_exercise_1");
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_get_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let result = db.workouts().get("missing").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_find_by_date_returns_exact_matches() {
    let db = setup_db().await;
    let workouts = db.workouts();

    workouts
        .create(&make_workout("A", "2024-03-01"))
        .await
        .unwrap();
    workouts
        .create(&make_workout("B", "2024-03-02"))
        .await
        .unwrap();

    let found = workouts.find_by_date(date("2024-03-01")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "A");

    let none = workouts.find_by_date(date("2024-03-03")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_list_orders_newest_first_with_inclusive_bounds() {
    let db = setup_db().await;
    let workouts = db.workouts();

    for (name, day) in [
        ("Jan", "2024-01-31"),
        ("Feb1", "2024-02-01"),
        ("Feb15", "2024-02-15"),
        ("Feb29", "2024-02-29"),
        ("Mar", "2024-03-01"),
    ] {
        workouts.create(&make_workout(name, day)).await.unwrap();
    }

    let all = workouts.list(&WorkoutQuery::default()).await.unwrap();
    let names: Vec<&str> = all.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Mar", "Feb29", "Feb15", "Feb1", "Jan"]);

    let february = workouts
        .list(&WorkoutQuery {
            start: Some(date("2024-02-01")),
            end: Some(date("2024-02-29")),
        })
        .await
        .unwrap();
    let names: Vec<&str> = february.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Feb29", "Feb15", "Feb1"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_update_overwrites_document() {
    let db = setup_db().await;
    let workouts = db.workouts();

    let mut created = workouts
        .create(&make_workout("Leg Day", "2024-03-01"))
        .await
        .unwrap();

    created.name = "Heavy Leg Day".to_string();
    created.date = date("2024-03-05");
    created.exercises.truncate(1);
    workouts.update(&created).await.expect("Update should succeed");

    let fetched = workouts.get(&created.id).await.unwrap();
    assert_eq!(fetched.name, "Heavy Leg Day");
    assert_eq!(fetched.date, date("2024-03-05"));
    assert_eq!(fetched.exercises.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_update_nonexistent_returns_not_found() {
    let db = setup_db().await;
    let mut workout = make_workout("Ghost", "2024-03-01");
    workout.assign_id("ghost");

    let result = db.workouts().update(&workout).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_create_many_is_all_or_nothing() {
    let db = setup_db().await;
    let workouts = db.workouts();

    let mut first = make_workout("A", "2024-03-01");
    first.assign_id("dup");
    let mut second = make_workout("B", "2024-03-02");
    second.assign_id("dup");

    // Second insert violates the primary key, so the first must roll back
    let result = workouts.create_many(&[first, second]).await;
    assert!(result.is_err());

    let all = workouts.list(&WorkoutQuery::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_delete_cascade_removes_logs() {
    let db = setup_db().await;

    let keep = db
        .workouts()
        .create(&make_workout("Keep", "2024-03-02"))
        .await
        .unwrap();
    let doomed = db
        .workouts()
        .create(&make_workout("Doomed", "2024-03-01"))
        .await
        .unwrap();

    for _ in 0..3 {
        db.exercise_logs()
            .create(&make_log(&doomed.id, &doomed.exercises[0].id))
            .await
            .unwrap();
    }
    db.exercise_logs()
        .create(&make_log(&keep.id, &keep.exercises[0].id))
        .await
        .unwrap();

    let removed = db
        .workouts()
        .delete_cascade(&doomed.id)
        .await
        .expect("Delete should succeed");
    assert_eq!(removed, 3);

    assert!(matches!(
        db.workouts().get(&doomed.id).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(
        db.exercise_logs()
            .list_by_workout(&doomed.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        db.exercise_logs()
            .list_by_workout(&keep.id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn workout_delete_cascade_nonexistent_keeps_orphan_logs() {
    let db = setup_db().await;

    db.exercise_logs()
        .create(&make_log("ghost", "ghost_exercise_1"))
        .await
        .unwrap();

    let result = db.workouts().delete_cascade("ghost").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    // The failed batch must not have deleted anything
    let logs = db.exercise_logs().list_by_workout("ghost").await.unwrap();
    assert_eq!(logs.len(), 1);
}
