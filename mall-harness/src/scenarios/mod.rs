//! Concrete E2E flows, grouped by domain.
//!
//! Every scenario follows the same shape: bootstrap actors, build the
//! dependency chain, exercise the operation under test, assert - with
//! negative steps where the point is that a call is refused.

pub mod comment_flow;
pub mod coupon_flow;
pub mod order_flow;
pub mod pagination;
pub mod session;
