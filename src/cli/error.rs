use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;
use crate::workout::OperationError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(liftlog::cli::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    #[diagnostic(
        code(liftlog::cli::invalid_json),
        help("The file must contain a single workout object with name, date and exercises.")
    )]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create data directory {}", path.display())]
    #[diagnostic(
        code(liftlog::cli::data_dir),
        help("Pass --db or set LIFTLOG_DB to a writable location.")
    )]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(liftlog::cli::render_failed))]
    Render(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Operation(#[from] OperationError),
}

pub type CliResult<T> = Result<T, CliError>;
