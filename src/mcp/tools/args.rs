//! Typed reads of loosely-typed tool arguments.
//!
//! Tool parameters are declared as `serde_json::Value` so that a wrong type
//! never fails argument decoding. Handlers read them through [`Args`], which
//! collects `path: Expected X, received Y` messages and turns them into a
//! validation failure.

use serde_json::{Map, Value};

use crate::workout::{WorkoutError, type_name};

#[derive(Debug, Default)]
pub(crate) struct Args {
    errors: Vec<String>,
}

impl Args {
    fn expected(&mut self, path: &str, expected: &str, found: &Value) {
        self.errors.push(format!(
            "{}: Expected {}, received {}",
            path,
            expected,
            type_name(found)
        ));
    }

    /// Optional string; `null` and absent are `None`.
    pub(crate) fn string(&mut self, path: &str, value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => {
                self.expected(path, "string", other);
                None
            }
        }
    }

    /// Required string. Returns an empty string after recording the error.
    pub(crate) fn required_string(&mut self, path: &str, value: &Value) -> String {
        if value.is_null() {
            self.errors.push(format!("{}: Required", path));
            return String::new();
        }
        self.string(path, value).unwrap_or_default()
    }

    pub(crate) fn bool(&mut self, path: &str, value: &Value) -> Option<bool> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(*b),
            other => {
                self.expected(path, "boolean", other);
                None
            }
        }
    }

    pub(crate) fn integer(&mut self, path: &str, value: &Value) -> Option<i64> {
        match value {
            Value::Null => None,
            Value::Number(n) => {
                let integer = n.as_i64();
                if integer.is_none() {
                    self.errors
                        .push(format!("{}: Expected integer, received float", path));
                }
                integer
            }
            other => {
                self.expected(path, "integer", other);
                None
            }
        }
    }

    pub(crate) fn array<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v [Value]> {
        match value {
            Value::Null => None,
            Value::Array(items) => Some(items),
            other => {
                self.expected(path, "array", other);
                None
            }
        }
    }

    pub(crate) fn object<'v>(
        &mut self,
        path: &str,
        value: &'v Value,
    ) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Null => None,
            Value::Object(map) => Some(map),
            other => {
                self.expected(path, "object", other);
                None
            }
        }
    }

    /// `Ok` when every read succeeded.
    pub(crate) fn finish(self) -> Result<(), WorkoutError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(WorkoutError::Validation(self.errors))
        }
    }
}

static NULL: Value = Value::Null;

/// Field of an object argument, `null` when absent.
pub(crate) fn field<'v>(obj: &'v Map<String, Value>, key: &str) -> &'v Value {
    obj.get(key).unwrap_or(&NULL)
}
