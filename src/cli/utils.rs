//! Shared utilities for CLI commands

use tabled::{Table, settings::Style};

use crate::db::{Planned, WeightUnit};

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Render a number without a trailing `.0` when it is whole.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Planned sets as `5/5/5 reps`, with `(each side)` for unilateral work.
pub fn format_sets(planned: &Planned) -> String {
    if planned.sets.is_empty() {
        return "-".to_string();
    }

    let counts: Vec<String> = planned.sets.iter().map(|&c| format_number(c)).collect();
    let mut out = format!("{} {}", counts.join("/"), planned.unit);
    if planned.is_unilateral == Some(true) {
        out.push_str(" (each side)");
    }
    out
}

/// Planned weight as `135 lb`, `bodyweight`, or `-`.
pub fn format_weight(planned: &Planned) -> String {
    match planned.weight {
        Some(w) if w.unit == WeightUnit::Bodyweight && w.amount == 0.0 => "bodyweight".to_string(),
        Some(w) => format!("{} {}", format_number(w.amount), w.unit),
        None => "-".to_string(),
    }
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}
