//! Typed REST client for the mall backend.
//!
//! [`Connection`] owns the HTTP client and the active session token;
//! the [`functional`] modules mirror the backend's endpoint families
//! (`auth`, `products`, `inquiries`, `comments`, `coupons`, `orders`),
//! one async function per endpoint.
//!
//! Session semantics: a connection carries at most one session, and every
//! join/login replaces it. Scenarios that need two simultaneous actors
//! use two connections.

mod connection;
mod error;
pub mod functional;

pub use connection::Connection;
pub use error::ClientError;

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
