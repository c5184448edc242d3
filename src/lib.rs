//! Liftlog: workout planning with validation, CSV import and MCP tools.
//!
//! - `db`: storage traits and the SQLite backend
//! - `workout`: validation rules and workout operations
//! - `import`: CSV parsing and grouping into workouts
//! - `mcp`: MCP server exposing the operations as tools
//! - `cli`: local command-line interface
//! - `paths`: data directory and database location

pub mod cli;
pub mod db;
pub mod import;
pub mod mcp;
pub mod paths;
pub mod workout;
