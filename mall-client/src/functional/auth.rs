//! Registration and login, per role family.
//!
//! Both calls adopt the returned token into the connection, so the
//! connection acts as the new actor from the next call on. This is the
//! only place the client mutates session state.

use mall_common::{AuthorizedActor, JoinRequest, LoginRequest, Role};

use crate::{ClientResult, Connection};

/// Register a new actor and make its session the connection's active one.
pub async fn join(
    conn: &mut Connection,
    role: Role,
    request: &JoinRequest,
) -> ClientResult<AuthorizedActor> {
    let path = format!("/auth/{}/join", role.path_segment());
    let actor: AuthorizedActor = conn.post(&path, request).await?;
    conn.adopt_session(actor.token.clone());
    Ok(actor)
}

/// Re-authenticate an existing actor; replaces the active session.
pub async fn login(
    conn: &mut Connection,
    role: Role,
    request: &LoginRequest,
) -> ClientResult<AuthorizedActor> {
    let path = format!("/auth/{}/login", role.path_segment());
    let actor: AuthorizedActor = conn.post(&path, request).await?;
    conn.adopt_session(actor.token.clone());
    Ok(actor)
}
