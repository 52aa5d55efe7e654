//! Endpoint families, one module per domain.
//!
//! Functions are thin: build the path, delegate to [`crate::Connection`],
//! return the typed response. Ownership and role checks live on the
//! backend; the client never pre-filters.

pub mod auth;
pub mod comments;
pub mod coupons;
pub mod inquiries;
pub mod orders;
pub mod products;
