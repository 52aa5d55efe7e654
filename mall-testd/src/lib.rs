//! In-memory reference backend for the mall E2E suite.
//!
//! Implements just enough of the commerce semantics for the scenario
//! suite to run hermetically: per-role registration and login, bearer
//! sessions, products, inquiries, comments (with ownership-scoped reads
//! and paginated seller listings), coupons with grants and once-only
//! coupon-use erasure, and single-line orders.
//!
//! Not a deployable store: state lives in process memory and passwords
//! are kept in the clear.

pub mod routes;
pub mod state;

use std::net::SocketAddr;

pub use routes::{SharedState, router, router_with_state};
pub use state::{MallState, StoreError};

/// Bind the backend on an OS-assigned loopback port.
///
/// Returns the bound address and the serve task's handle. Used by the
/// integration tests and the CLI's embedded mode; each caller gets a
/// fully isolated store.
pub async fn spawn_ephemeral() -> std::io::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await?;
    let addr = listener.local_addr()?;
    let app = router();

    let handle = tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, app).await {
            tracing::error!(%error, "reference backend exited");
        }
    });

    tracing::debug!(%addr, "reference backend listening");
    Ok((addr, handle))
}
