//! Parsing of dates, measures, weights and durations entered as text.
//!
//! Everything here is pure and infallible in the sense that unparseable
//! input yields `None` (or is passed through unchanged, for CSV dates);
//! callers decide whether that is an error.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::db::{SetUnit, Weight, WeightUnit, calendar_date};

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex")
});

static WEIGHT_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([\d.]+)\s*(lbs?|kg|pounds?)?$").expect("valid regex")
});

static CLOCK_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+):)?(\d{1,2}):(\d{2})$").expect("valid regex")
});

static UNIT_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(s|sec|seconds?|m|min|minutes?|h|hr|hours?)$")
        .expect("valid regex")
});

// =============================================================================
// Dates
// =============================================================================

/// Whether `s` has the `YYYY-MM-DD` shape (not necessarily a real date).
pub fn is_iso_date(s: &str) -> bool {
    ISO_DATE.is_match(s)
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if !is_iso_date(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, calendar_date::FORMAT).ok()
}

/// Rewrite `MM/DD/YYYY` or `YYYY/MM/DD` (either separator) as `YYYY-MM-DD`.
///
/// Input already in ISO shape, or that matches neither layout, is returned
/// unchanged.
pub fn normalize_date(s: &str) -> String {
    if is_iso_date(s) {
        return s.to_string();
    }

    let parts: Vec<&str> = s.split(['/', '-']).collect();
    if parts.len() != 3 {
        return s.to_string();
    }

    let Ok(first) = parts[0].parse::<u32>() else {
        return s.to_string();
    };

    if first <= 12 && parts[2].len() == 4 {
        format!("{}-{:0>2}-{:0>2}", parts[2], parts[0], parts[1])
    } else if first > 12 && parts[0].len() == 4 {
        format!("{}-{:0>2}-{:0>2}", parts[0], parts[1], parts[2])
    } else {
        s.to_string()
    }
}

// =============================================================================
// Planned measures and weights
// =============================================================================

/// Infer the set unit from a free-text measure such as "Seconds" or "reps".
pub fn parse_measure(measure: &str) -> SetUnit {
    let lower = measure.to_lowercase();
    if lower.contains("second") {
        SetUnit::Seconds
    } else if lower.contains("minute") {
        SetUnit::Minutes
    } else {
        SetUnit::Reps
    }
}

/// Parse a finite number; `NaN` and infinities are rejected.
pub fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Infer a planned weight from the CSV `Weight` and `Weight Unit` columns.
///
/// An explicit amount wins; a missing unit defaults to `lb`, and an amount
/// whose unit is neither lb nor kg yields no weight. Without an amount the
/// exercise is bodyweight, whatever the equipment column says. Returns
/// `Err` with the offending text when the amount is not a finite number.
pub fn parse_planned_weight(amount: &str, unit: &str) -> Result<Option<Weight>, String> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Ok(Some(Weight::bodyweight()));
    }

    let value = parse_finite(amount).ok_or_else(|| amount.to_string())?;

    let unit = if unit.trim().is_empty() {
        "lb".to_string()
    } else {
        unit.to_lowercase()
    };

    if unit.contains("lb") {
        Ok(Some(Weight {
            amount: value,
            unit: WeightUnit::Lb,
        }))
    } else if unit.contains("kg") {
        Ok(Some(Weight {
            amount: value,
            unit: WeightUnit::Kg,
        }))
    } else {
        Ok(None)
    }
}

// =============================================================================
// Logged set values
// =============================================================================

/// A weight typed into a log entry, e.g. "135 lbs" or "60kg".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggedWeight {
    pub amount: f64,
    /// `None` when the entry had no unit suffix.
    pub unit: Option<WeightUnit>,
}

/// Whether `text` looks like a logged weight ("135", "135 lbs", "60kg").
pub fn is_weight_text(text: &str) -> bool {
    WEIGHT_TEXT.is_match(text.trim())
}

/// Whether `text` looks like a logged duration ("1:30", "30s", "5 min").
pub fn is_duration_text(text: &str) -> bool {
    let text = text.trim();
    CLOCK_DURATION.is_match(text) || UNIT_DURATION.is_match(text)
}

/// Parse a logged weight: a number optionally followed by lb/lbs/kg/pound(s).
pub fn parse_weight_text(text: &str) -> Option<LoggedWeight> {
    let caps = WEIGHT_TEXT.captures(text.trim())?;
    let amount: f64 = caps[1].parse().ok()?;

    let unit = caps.get(2).map(|m| {
        if m.as_str().eq_ignore_ascii_case("kg") {
            WeightUnit::Kg
        } else {
            WeightUnit::Lb
        }
    });

    Some(LoggedWeight { amount, unit })
}

/// Parse a logged duration into seconds.
///
/// Accepts `MM:SS`, `HH:MM:SS`, or a whole number with a unit
/// (`30s`, `5 min`, `1h`).
pub fn parse_duration_text(text: &str) -> Option<u32> {
    let text = text.trim();

    if let Some(caps) = CLOCK_DURATION.captures(text) {
        let hours: u32 = caps.get(1).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        let seconds: u32 = caps[3].parse().ok()?;
        return hours
            .checked_mul(3600)?
            .checked_add(minutes * 60)?
            .checked_add(seconds);
    }

    let caps = UNIT_DURATION.captures(text)?;
    let value: u32 = caps[1].parse().ok()?;
    let factor = match caps[2].to_lowercase().chars().next()? {
        's' => 1,
        'm' => 60,
        _ => 3600,
    };
    value.checked_mul(factor)
}
