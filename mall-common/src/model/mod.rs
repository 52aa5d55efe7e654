//! Entity and request/response DTOs for the mall backend's REST surface.
//!
//! One submodule per domain, mirroring the endpoint families the client
//! exposes: actors/auth, product catalog, inquiry board, coupons, orders.

pub mod actor;
pub mod board;
pub mod catalog;
pub mod coupon;
pub mod order;

pub use actor::{AuthorizedActor, JoinRequest, LoginRequest, Role, SessionToken};
pub use board::{Comment, CommentCreate, CommentStatus, Inquiry, InquiryCreate, Visibility};
pub use catalog::{Product, ProductCreate, ProductStatus};
pub use coupon::{Coupon, CouponCreate, CouponGrant, CouponIssueRequest, CouponRedeemRequest, CouponUse};
pub use order::{Order, OrderCreate, OrderStatus};
