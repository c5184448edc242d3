//! Path resolution for liftlog data.
//!
//! Follows the XDG base directory layout, with `LIFTLOG_DB` and the `--db`
//! flag taking precedence over the default database location.

use std::env;
use std::path::PathBuf;

/// Application directory name under the XDG data home.
pub const APP_DIR: &str = "liftlog";

/// Environment variable overriding the database file path.
pub const DB_ENV: &str = "LIFTLOG_DB";

/// Get XDG-compliant data directory for liftlog.
///
/// `$XDG_DATA_HOME/liftlog`, else `$HOME/.local/share/liftlog`. With neither
/// variable set the directory is relative to the working directory.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var_os("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/workouts.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("workouts.db")
}

/// Resolve the database path.
///
/// Precedence: explicit path > `LIFTLOG_DB` > XDG default.
pub fn resolve_db_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| {
            env::var_os(DB_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(get_db_path)
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod paths_test;
