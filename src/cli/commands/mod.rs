pub mod import;
pub mod logs;
pub mod workout;


#[cfg(test)]
#[path = "logs_test.rs"]
mod logs_test;
