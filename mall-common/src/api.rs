//! Wire error envelope and JSON Schema export.
//!
//! Every non-2xx response from the backend carries an [`ErrorBody`].
//! Scenarios never branch on its contents (the negative-path helper
//! asserts rejection only), but the client decodes it so that a call
//! expected to succeed fails with a diagnosable message.

use schemars::{JsonSchema, schema::RootSchema, schema_for};
use serde::{Deserialize, Serialize};

use crate::page::Pagination;

/// Error payload returned by the backend on any rejected request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
    /// Stable machine-readable code, e.g. `unauthorized`, `not_found`,
    /// `duplicate_email`, `forbidden`.
    pub code: String,
    /// Human-readable description of the rejection.
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Generate the JSON Schema for the error envelope.
#[must_use]
pub fn generate_error_body_schema() -> RootSchema {
    schema_for!(ErrorBody)
}

/// Generate the JSON Schema for pagination metadata.
#[must_use]
pub fn generate_pagination_schema() -> RootSchema {
    schema_for!(Pagination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_round_trips() {
        let body = ErrorBody::new("not_found", "no such comment");
        let json = serde_json::to_string(&body).unwrap();
        let back: ErrorBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, "not_found");
        assert_eq!(back.message, "no such comment");
    }

    #[test]
    fn schemas_name_their_types() {
        let schema = generate_error_body_schema();
        assert_eq!(
            schema.schema.metadata.as_ref().unwrap().title.as_deref(),
            Some("ErrorBody")
        );

        let schema = generate_pagination_schema();
        assert_eq!(
            schema.schema.metadata.as_ref().unwrap().title.as_deref(),
            Some("Pagination")
        );
    }
}
