//! Harness error type.

use mall_client::ClientError;
use thiserror::Error;

/// Failure of a scenario step or assertion.
///
/// Scenarios are fail-fast: the first error aborts the scenario and is
/// reported with the titles/step names along the way, so a suite failure
/// reads as "which scenario, which step, which assertion".
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A titled assertion did not hold.
    #[error("assertion '{title}' failed: {detail}")]
    Assertion { title: String, detail: String },

    /// A response did not satisfy its structural invariants.
    #[error("structural validation of {type_name} failed: {detail}")]
    Validation {
        type_name: &'static str,
        detail: String,
    },

    /// A chain step failed; wraps the underlying error.
    #[error("chain step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<HarnessError>,
    },

    /// Two chain steps share a name.
    #[error("chain step '{0}' is declared twice")]
    DuplicateStep(String),

    /// A lookup named a step the chain never ran.
    #[error("no chain step named '{0}'")]
    UnknownStep(String),

    /// A remote call that was expected to succeed was rejected.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A handle could not be stored or re-typed.
    #[error("handle (de)serialization failed: {0}")]
    Handle(#[from] serde_json::Error),

    /// Scenario preconditions could not be established.
    #[error("setup failed: {0}")]
    Setup(String),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
