//! Negative-path helper.
//!
//! Some scenario steps exist to prove an operation is refused: foreign
//! ownership, duplicate registration, repeated erase. The helper awaits
//! the call and inverts the outcome. Deliberately, neither the status
//! code nor the error payload is inspected - the backend's exact error
//! contract is not this suite's to pin down, only that the call fails.

use std::fmt::Display;
use std::future::Future;

use crate::error::{HarnessError, HarnessResult};

/// Await `operation`; its rejection is the passing outcome.
///
/// A resolving operation fails the scenario under the given title.
pub async fn expect_rejection<T, E, F>(title: &str, operation: F) -> HarnessResult<()>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match operation.await {
        Ok(_) => Err(HarnessError::Assertion {
            title: title.to_string(),
            detail: "operation succeeded but was expected to be rejected".to_string(),
        }),
        Err(error) => {
            tracing::debug!(title, %error, "rejected as expected");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn succeeds() -> Result<u32, String> {
        Ok(1)
    }

    async fn fails() -> Result<u32, String> {
        Err("refused".to_string())
    }

    #[tokio::test]
    async fn rejection_passes() {
        expect_rejection("call is refused", fails()).await.unwrap();
    }

    #[tokio::test]
    async fn resolution_fails_with_the_title() {
        let err = expect_rejection("call is refused", succeeds())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("call is refused"));
    }
}
