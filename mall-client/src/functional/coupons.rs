//! Coupon endpoints (admin side).

use mall_common::{
    Coupon, CouponCreate, CouponGrant, CouponId, CouponIssueRequest, CouponRedeemRequest,
    CouponUse, CouponUseId,
};

use crate::{ClientResult, Connection};

/// Create a coupon. Admin session required.
pub async fn create(conn: &Connection, request: &CouponCreate) -> ClientResult<Coupon> {
    conn.post("/admin/coupons", request).await
}

/// Grant a coupon to a user. Admin session required.
pub async fn issue(
    conn: &Connection,
    coupon_id: CouponId,
    request: &CouponIssueRequest,
) -> ClientResult<CouponGrant> {
    conn.post(&format!("/admin/coupons/{coupon_id}/grants"), request)
        .await
}

/// Redeem a granted coupon, creating a coupon-use record.
pub async fn redeem(
    conn: &Connection,
    coupon_id: CouponId,
    request: &CouponRedeemRequest,
) -> ClientResult<CouponUse> {
    conn.post(&format!("/admin/coupons/{coupon_id}/uses"), request)
        .await
}

/// Erase a coupon-use record. Succeeds once; repeating the erase for the
/// same id is rejected.
pub async fn erase_use(conn: &Connection, coupon_use_id: CouponUseId) -> ClientResult<()> {
    conn.delete(&format!("/admin/coupon-uses/{coupon_use_id}"))
        .await
}
