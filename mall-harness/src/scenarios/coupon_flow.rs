//! Coupon lifecycle: create, grant, redeem, erase.

use mall_client::functional;
use mall_common::model::{CouponCreate, CouponIssueRequest, CouponRedeemRequest, Role};
use mall_common::random;

use crate::actor;
use crate::check::{assert_valid, ensure_eq};
use crate::negative::expect_rejection;
use crate::scenario::{ScenarioContext, ScenarioFuture};

/// Full coupon lifecycle; the erase succeeds once and the repeat is
/// refused.
pub fn coupon_use_erase_once_only(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();

        // The recipient lives on a side connection so the admin session
        // on the primary stays active throughout.
        let mut buyer_conn = ctx.extra_connection()?;
        let (_, buyer) = actor::join_random(&mut buyer_conn, Role::Buyer, &config).await?;

        actor::join_random(ctx.connection(), Role::Admin, &config).await?;

        let create = CouponCreate {
            code: random::coupon_code(),
            discount_cents: 2_500,
        };
        let coupon = functional::coupons::create(ctx.connection(), &create).await?;
        assert_valid(&coupon)?;
        ensure_eq("coupon keeps its code", &create.code, &coupon.code)?;

        let issue = CouponIssueRequest { user_id: buyer.id };
        let grant = functional::coupons::issue(ctx.connection(), coupon.id, &issue).await?;
        assert_valid(&grant)?;
        ensure_eq("grant names the recipient", &buyer.id, &grant.user_id)?;

        let redeem = CouponRedeemRequest { user_id: buyer.id };
        let coupon_use = functional::coupons::redeem(ctx.connection(), coupon.id, &redeem).await?;
        assert_valid(&coupon_use)?;
        ensure_eq("use references the coupon", &coupon.id, &coupon_use.coupon_id)?;
        ensure_eq("use names the redeemer", &buyer.id, &coupon_use.user_id)?;

        functional::coupons::erase_use(ctx.connection(), coupon_use.id).await?;

        expect_rejection(
            "second erase of the same coupon-use",
            functional::coupons::erase_use(ctx.connection(), coupon_use.id),
        )
        .await
    })
}

/// Creating a second coupon with a live code is refused.
pub fn duplicate_coupon_code_rejected(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();
        actor::join_random(ctx.connection(), Role::Admin, &config).await?;

        let code = random::coupon_code();
        let first = CouponCreate {
            code: code.clone(),
            discount_cents: 1_000,
        };
        let coupon = functional::coupons::create(ctx.connection(), &first).await?;
        assert_valid(&coupon)?;

        let second = CouponCreate {
            code,
            discount_cents: 500,
        };
        expect_rejection(
            "re-creating a live coupon code",
            functional::coupons::create(ctx.connection(), &second),
        )
        .await
    })
}
