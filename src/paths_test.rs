use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
fn test_get_data_dir_ends_with_app_dir() {
    let path = get_data_dir();
    assert!(path.ends_with("liftlog"));
}

#[test]
fn test_get_db_path_ends_with_workouts_db() {
    let path = get_db_path();
    assert!(path.ends_with("liftlog/workouts.db"));
}

#[test]
#[serial]
fn test_data_dir_respects_xdg_data_home() {
    let previous = env::var_os("XDG_DATA_HOME");
    unsafe {
        env::set_var("XDG_DATA_HOME", "/tmp/liftlog-xdg-test");
    }

    assert_eq!(get_data_dir(), PathBuf::from("/tmp/liftlog-xdg-test/liftlog"));

    // Cleanup
    unsafe {
        match previous {
            Some(v) => env::set_var("XDG_DATA_HOME", v),
            None => env::remove_var("XDG_DATA_HOME"),
        }
    }
}

#[test]
#[serial]
fn test_resolve_db_path_precedence() {
    unsafe {
        env::set_var(DB_ENV, "/tmp/env-workouts.db");
    }

    let explicit = PathBuf::from("/tmp/cli-workouts.db");
    assert_eq!(
        resolve_db_path(Some(explicit.clone())),
        explicit,
        "explicit path should override env var"
    );
    assert_eq!(
        resolve_db_path(None),
        PathBuf::from("/tmp/env-workouts.db")
    );

    unsafe {
        env::remove_var(DB_ENV);
    }
    assert_eq!(resolve_db_path(None), get_db_path());
}
