//! Success/failure envelope returned by every query-layer operation.
//!
//! Serialized as `{"success": true, "data": ...}` or
//! `{"success": false, "errors": ["..."]}`.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
        }
    }

    /// Build an envelope from a result, keeping the error's display message.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failure(vec![e.to_string()]),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
