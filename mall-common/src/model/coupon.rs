//! Coupon types: admin-created discounts, grants to users, and
//! per-redemption coupon-use records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, CouponId, CouponUseId};

/// An admin-created discount coupon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    /// Human-entered redemption code; unique across live coupons.
    pub code: String,
    /// Discount amount in minor currency units.
    pub discount_cents: u64,
    /// Admin account that created the coupon.
    pub issued_by: ActorId,
    pub created_at: DateTime<Utc>,
}

/// Admin request to create a coupon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub discount_cents: u64,
}

/// Admin request to grant a coupon to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponIssueRequest {
    pub user_id: ActorId,
}

/// Record of a coupon being granted to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponGrant {
    pub coupon_id: CouponId,
    pub user_id: ActorId,
    pub granted_at: DateTime<Utc>,
}

/// Admin request to redeem a granted coupon on behalf of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponRedeemRequest {
    pub user_id: ActorId,
}

/// One redemption of a coupon. Erasing the record is a hard delete;
/// a second erase of the same id is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponUse {
    pub id: CouponUseId,
    pub coupon_id: CouponId,
    pub user_id: ActorId,
    pub redeemed_at: DateTime<Utc>,
}
