mod commands;
pub mod error;
pub mod utils;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::db::{Database, SqliteDatabase};
use crate::paths::resolve_db_path;
use crate::workout::WorkoutService;
use error::{CliError, CliResult};

#[cfg(test)]
#[path = "utils_test.rs"]
mod utils_test;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(author, version, about = "Workout planning CLI", long_about = None)]
pub struct Cli {
    /// Database file path (default: LIFTLOG_DB env or ~/.local/share/liftlog/workouts.db)
    #[arg(long, global = true, env = "LIFTLOG_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import workouts from a CSV file
    Import {
        /// CSV file with one row per exercise
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate a workout JSON file without saving it
    Validate {
        /// JSON file containing one workout
        file: PathBuf,
    },
    /// List workouts, newest first
    List {
        /// Earliest date to include (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Latest date to include (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show a workout by ID or date
    Show {
        /// Workout ID or date (YYYY-MM-DD)
        identifier: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Delete a workout and its exercise logs
    Delete {
        /// Workout ID or date (YYYY-MM-DD)
        identifier: String,
    },
    /// List exercise logs for a workout
    Logs {
        /// Workout ID
        workout_id: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// Open the database at `path`, creating its directory and schema as needed.
pub async fn open_database(path: &Path) -> CliResult<SqliteDatabase> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| CliError::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let db = SqliteDatabase::open(path).await?;
    db.migrate().await?;
    Ok(db)
}

pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["liftlog", "--help"]);
        return Ok(());
    };

    let db = open_database(&resolve_db_path(cli.db)).await?;
    let service = WorkoutService::new(db);

    let output = match command {
        Commands::Import { file, format } => {
            commands::import::import_file(&service, &file, &format).await?
        }
        Commands::Validate { file } => commands::workout::validate_file(&service, &file)?,
        Commands::List { start, end, format } => {
            commands::workout::list_workouts(&service, start.as_deref(), end.as_deref(), &format)
                .await?
        }
        Commands::Show { identifier, format } => {
            commands::workout::show_workout(&service, &identifier, &format).await?
        }
        Commands::Delete { identifier } => {
            commands::workout::delete_workout(&service, &identifier).await?
        }
        Commands::Logs { workout_id, format } => {
            commands::logs::list_logs(&service, &workout_id, &format).await?
        }
    };

    println!("{}", output);
    Ok(())
}
