//! Order placement and owner-scoped reads.

use mall_client::functional;
use mall_common::model::{OrderCreate, OrderStatus, ProductCreate, Role};
use mall_common::random;

use crate::actor;
use crate::check::{assert_valid, ensure_eq};
use crate::negative::expect_rejection;
use crate::scenario::{ScenarioContext, ScenarioFuture};

/// Buyer places an order: the total is price times quantity, the fetch
/// round-trips, invalid quantity is refused, and a foreign buyer cannot
/// read it.
pub fn order_round_trip(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();

        actor::join_random(ctx.connection(), Role::Seller, &config).await?;
        let product_request = ProductCreate {
            name: random::product_name(),
            price_cents: 4_500,
        };
        let product = functional::products::create(ctx.connection(), &product_request).await?;
        assert_valid(&product)?;

        let (_, buyer) = actor::join_random(ctx.connection(), Role::Buyer, &config).await?;
        let request = OrderCreate {
            product_id: product.id,
            quantity: 3,
        };
        let order = functional::orders::create(ctx.connection(), &request).await?;
        assert_valid(&order)?;
        ensure_eq("order belongs to the buyer", &buyer.id, &order.buyer_id)?;
        ensure_eq(
            "order total is price times quantity",
            &(product.price_cents * 3),
            &order.total_cents,
        )?;
        ensure_eq("new order starts placed", &OrderStatus::Placed, &order.status)?;

        let fetched = functional::orders::get(ctx.connection(), order.id).await?;
        assert_valid(&fetched)?;
        ensure_eq("fetched order id", &order.id, &fetched.id)?;
        ensure_eq("fetched order total", &order.total_cents, &fetched.total_cents)?;

        let invalid = OrderCreate {
            product_id: product.id,
            quantity: 0,
        };
        expect_rejection(
            "zero-quantity order",
            functional::orders::create(ctx.connection(), &invalid),
        )
        .await?;

        let mut other = ctx.extra_connection()?;
        actor::join_random(&mut other, Role::Buyer, &config).await?;
        expect_rejection(
            "foreign buyer reads another buyer's order",
            functional::orders::get(&other, order.id),
        )
        .await
    })
}
