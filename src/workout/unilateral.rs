//! Keyword heuristic for exercises that need left/right tracking.

use crate::db::Planned;

const UNILATERAL_KEYWORDS: &[&str] = &[
    "single-arm",
    "single arm",
    "single-leg",
    "single leg",
    "one-arm",
    "one arm",
    "one-leg",
    "one leg",
    "unilateral",
    "alternating",
    "each arm",
    "each leg",
    "per arm",
    "per leg",
    "each side",
    "per side",
];

/// Whether the name or description mentions a one-side-at-a-time movement.
pub fn detect(name: &str, description: &str) -> bool {
    let text = format!("{} {}", name, description).to_lowercase();
    UNILATERAL_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Fill `planned.is_unilateral` when the caller left it unset.
///
/// Only a positive detection is recorded; an explicit `Some(false)` or
/// `Some(true)` is never overridden.
pub fn apply(planned: &mut Planned, name: &str, description: &str) {
    if planned.is_unilateral.is_none() && detect(name, description) {
        planned.is_unilateral = Some(true);
    }
}
