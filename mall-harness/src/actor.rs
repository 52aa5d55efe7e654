//! Actor bootstrap: registration, login, and session switching.
//!
//! A connection carries one active session; every join/login replaces it
//! (last login wins). Multi-actor scenarios either switch identities on
//! one connection or hold a second connection - see
//! [`crate::scenario::ScenarioContext::extra_connection`].

use mall_client::{Connection, functional};
use mall_common::model::{AuthorizedActor, JoinRequest, LoginRequest, Role};
use mall_common::{HarnessConfig, random};

use crate::check::assert_valid;
use crate::error::HarnessResult;

/// Credentials for one actor, kept so scenarios can log the same
/// identity back in after switching away.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Credentials {
    /// Fresh valid-format credentials under the configured email domain.
    pub fn random(config: &HarnessConfig) -> Self {
        Self {
            email: random::email(&config.email_domain),
            password: random::password(),
            name: random::display_name(),
        }
    }

    fn join_request(&self) -> JoinRequest {
        JoinRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
        }
    }

    fn login_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Register an actor and make it the connection's active identity.
///
/// Rejections (duplicate email, weak password) propagate; the helper
/// never suppresses them.
pub async fn join(
    conn: &mut Connection,
    role: Role,
    credentials: &Credentials,
) -> HarnessResult<AuthorizedActor> {
    let actor = functional::auth::join(conn, role, &credentials.join_request()).await?;
    assert_valid(&actor)?;
    tracing::debug!(%role, actor_id = %actor.id, "joined");
    Ok(actor)
}

/// Register an actor under fresh random credentials, returning them
/// alongside the identity for later re-login.
pub async fn join_random(
    conn: &mut Connection,
    role: Role,
    config: &HarnessConfig,
) -> HarnessResult<(Credentials, AuthorizedActor)> {
    let credentials = Credentials::random(config);
    let actor = join(conn, role, &credentials).await?;
    Ok((credentials, actor))
}

/// Re-authenticate existing credentials, replacing the active session.
pub async fn login(
    conn: &mut Connection,
    role: Role,
    credentials: &Credentials,
) -> HarnessResult<AuthorizedActor> {
    let actor = functional::auth::login(conn, role, &credentials.login_request()).await?;
    assert_valid(&actor)?;
    tracing::debug!(%role, actor_id = %actor.id, "logged in");
    Ok(actor)
}
