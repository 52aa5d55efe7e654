//! Scenario toolkit and E2E suite for the mall backend.
//!
//! The toolkit is four small pieces, composed by every scenario:
//! - [`actor`] - register/login an actor and switch the connection's
//!   active session (last login wins)
//! - [`chain`] - declare the ordered resource-creation steps a scenario
//!   needs before its operation under test, and run them fail-fast
//! - [`check`] - structural validation of responses plus titled,
//!   fail-fast value assertions
//! - [`negative`] - await an operation whose rejection is the passing
//!   outcome
//!
//! Concrete flows live in [`scenarios`]; [`scenario`] holds the registry
//! and the sequential runner the CLI and tests share.

pub mod actor;
pub mod chain;
pub mod check;
pub mod error;
pub mod logging;
pub mod negative;
pub mod scenario;
pub mod scenarios;

pub use chain::{Chain, ChainOutput};
pub use check::{Validate, assert_valid, ensure, ensure_eq};
pub use error::{HarnessError, HarnessResult};
pub use negative::expect_rejection;
pub use scenario::{RunReport, Runner, Scenario, ScenarioContext, registry};
