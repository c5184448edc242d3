use miette::Diagnostic;
use thiserror::Error;

/// Minimum number of columns in a data row (`Set 5 Count` may be omitted).
pub const MIN_COLUMNS: usize = 13;

/// A CSV import problem. Any of these aborts the whole import.
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum CsvError {
    #[error("CSV contains no workout rows")]
    #[diagnostic(
        code(liftlog::import::empty),
        help("The first line is treated as a header; add at least one data row below it.")
    )]
    Empty,

    #[error("Line {line} could not be read: {message}")]
    #[diagnostic(code(liftlog::import::unreadable))]
    Unreadable { line: u64, message: String },

    #[error("Line {line} has invalid format: expected at least {expected} columns, found {found}")]
    #[diagnostic(
        code(liftlog::import::too_few_columns),
        help(
            "Columns: workoutName, date, exerciseName, description, order, Weight, Weight Unit, Equipment, Exercise Measure, Set 1 Count .. Set 5 Count"
        )
    )]
    TooFewColumns {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("Line {line}: {column} must be a number, found '{value}'")]
    #[diagnostic(code(liftlog::import::invalid_number))]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: invalid date '{value}'")]
    #[diagnostic(
        code(liftlog::import::invalid_date),
        help("Use YYYY-MM-DD, MM/DD/YYYY or YYYY/MM/DD.")
    )]
    InvalidDate { line: u64, value: String },
}

impl From<csv::Error> for CsvError {
    fn from(e: csv::Error) -> Self {
        CsvError::Unreadable {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        }
    }
}
