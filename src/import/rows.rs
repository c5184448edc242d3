//! CSV text to typed rows.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::db::Planned;
use crate::import::error::{CsvError, MIN_COLUMNS};
use crate::workout::unilateral;
use crate::workout::units::{normalize_date, parse_finite, parse_measure, parse_planned_weight};

const WORKOUT_NAME: usize = 0;
const DATE: usize = 1;
const EXERCISE_NAME: usize = 2;
const DESCRIPTION: usize = 3;
const ORDER: usize = 4;
const WEIGHT: usize = 5;
const WEIGHT_UNIT: usize = 6;
const EQUIPMENT: usize = 7;
const MEASURE: usize = 8;
const FIRST_SET: usize = 9;
const SET_COLUMNS: usize = 5;

const SET_COLUMN_NAMES: [&str; SET_COLUMNS] = [
    "Set 1 Count",
    "Set 2 Count",
    "Set 3 Count",
    "Set 4 Count",
    "Set 5 Count",
];

/// One exercise line of an import file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    /// 1-based line in the source text.
    pub line: u64,
    pub workout_name: String,
    /// Normalized towards `YYYY-MM-DD`; left as written when unrecognized.
    pub date: String,
    pub exercise_name: String,
    pub description: String,
    pub order: u32,
    pub planned: Planned,
}

/// Parse CSV text into rows. The first line is a header and is discarded.
///
/// Quoted fields, `\r\n` line endings and blank lines are handled; fields
/// are trimmed. The first malformed row aborts with its line number.
pub fn parse_rows(text: &str) -> Result<Vec<CsvRow>, CsvError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(parse_record(&record, line, rows.len())?);
    }

    if rows.is_empty() {
        return Err(CsvError::Empty);
    }
    Ok(rows)
}

fn parse_record(record: &StringRecord, line: u64, index: usize) -> Result<CsvRow, CsvError> {
    if record.len() < MIN_COLUMNS {
        return Err(CsvError::TooFewColumns {
            line,
            found: record.len(),
            expected: MIN_COLUMNS,
        });
    }

    let field = |i: usize| record.get(i).unwrap_or_default();

    // Missing, unparseable or zero order falls back to the row position
    let order = field(ORDER)
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(index as u32);

    let mut sets = Vec::new();
    for (offset, &column) in SET_COLUMN_NAMES.iter().enumerate() {
        let raw = field(FIRST_SET + offset);
        if raw.is_empty() {
            continue;
        }
        let count = parse_finite(raw).ok_or_else(|| CsvError::InvalidNumber {
            line,
            column,
            value: raw.to_string(),
        })?;
        sets.push(count);
    }

    let weight = parse_planned_weight(field(WEIGHT), field(WEIGHT_UNIT)).map_err(|value| {
        CsvError::InvalidNumber {
            line,
            column: "Weight",
            value,
        }
    })?;

    let equipment = field(EQUIPMENT);
    let exercise_name = field(EXERCISE_NAME).to_string();
    let description = field(DESCRIPTION).to_string();

    let mut planned = Planned {
        sets,
        unit: parse_measure(field(MEASURE)),
        weight,
        equipment: (!equipment.is_empty()).then(|| equipment.to_string()),
        is_unilateral: None,
    };
    unilateral::apply(&mut planned, &exercise_name, &description);

    Ok(CsvRow {
        line,
        workout_name: field(WORKOUT_NAME).to_string(),
        date: normalize_date(field(DATE)),
        exercise_name,
        description,
        order,
        planned,
    })
}
