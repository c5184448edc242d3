//! Database utility functions.

use chrono::Utc;

/// Generate a 20-character hex ID for stored documents.
pub fn generate_entity_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    uuid[..20].to_string()
}

/// Get current datetime as string in SQLite format
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
