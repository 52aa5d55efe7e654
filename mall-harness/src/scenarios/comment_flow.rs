//! Comment creation and ownership-scoped reads.

use rand::Rng;

use mall_client::functional;
use mall_common::HarnessConfig;
use mall_common::model::{
    AuthorizedActor, Comment, CommentCreate, CommentStatus, Inquiry, InquiryCreate, Product,
    ProductCreate, Role, Visibility,
};
use mall_common::random;

use crate::actor;
use crate::chain::{self, Chain};
use crate::check::{assert_valid, ensure_eq};
use crate::negative::expect_rejection;
use crate::scenario::{ScenarioContext, ScenarioFuture};

/// Shared prefix for the comment scenarios:
/// seller -> product -> buyer -> inquiry -> comment.
///
/// Leaves the buyer as the connection's active identity.
fn board_chain(config: &HarnessConfig) -> Chain {
    let seller_config = config.clone();
    let buyer_config = config.clone();

    Chain::new()
        .step("seller", move |mut ctx| {
            Box::pin(async move {
                let (_, seller) = actor::join_random(&mut ctx.conn, Role::Seller, &seller_config).await?;
                let value = chain::handle(&seller)?;
                Ok((ctx, value))
            })
        })
        .step("product", |ctx| {
            Box::pin(async move {
                let seller: AuthorizedActor = ctx.handles.get("seller")?;
                let request = ProductCreate {
                    name: random::product_name(),
                    price_cents: rand::rng().random_range(1_000..50_000),
                };
                let product = functional::products::create(&ctx.conn, &request).await?;
                assert_valid(&product)?;
                ensure_eq("product is owned by its seller", &seller.id, &product.seller_id)?;
                let value = chain::handle(&product)?;
                Ok((ctx, value))
            })
        })
        .step("buyer", move |mut ctx| {
            Box::pin(async move {
                let (_, buyer) = actor::join_random(&mut ctx.conn, Role::Buyer, &buyer_config).await?;
                let value = chain::handle(&buyer)?;
                Ok((ctx, value))
            })
        })
        .step("inquiry", |ctx| {
            Box::pin(async move {
                let product: Product = ctx.handles.get("product")?;
                let request = InquiryCreate {
                    product_id: product.id,
                    question: random::paragraph(),
                };
                let inquiry = functional::inquiries::create(&ctx.conn, &request).await?;
                assert_valid(&inquiry)?;
                ensure_eq("inquiry references its product", &product.id, &inquiry.product_id)?;
                let value = chain::handle(&inquiry)?;
                Ok((ctx, value))
            })
        })
        .step("comment", |ctx| {
            Box::pin(async move {
                let inquiry: Inquiry = ctx.handles.get("inquiry")?;
                let request = CommentCreate {
                    body: random::paragraph(),
                    visibility: Visibility::Public,
                    status: CommentStatus::Published,
                };
                let comment = functional::comments::create(&ctx.conn, inquiry.id, &request).await?;
                assert_valid(&comment)?;
                ensure_eq("comment is threaded under its inquiry", &inquiry.id, &comment.inquiry_id)?;
                let value = chain::handle(&comment)?;
                Ok((ctx, value))
            })
        })
}

/// A created comment reads back field-for-field through its
/// `(inquiry, comment)` address.
pub fn comment_round_trip(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();
        let output = board_chain(&config).run(ctx.connection()).await?;
        let inquiry: Inquiry = output.get("inquiry")?;
        let created: Comment = output.get("comment")?;

        let fetched = functional::comments::get(ctx.connection(), inquiry.id, created.id).await?;
        assert_valid(&fetched)?;
        ensure_eq("fetched comment id", &created.id, &fetched.id)?;
        ensure_eq("fetched comment inquiry", &inquiry.id, &fetched.inquiry_id)?;
        ensure_eq("fetched comment body", &created.body, &fetched.body)?;
        ensure_eq("fetched comment status", &created.status, &fetched.status)?;
        ensure_eq("fetched comment visibility", &created.visibility, &fetched.visibility)?;
        Ok(())
    })
}

/// A valid comment id addressed through a different inquiry the same
/// buyer owns is refused.
pub fn comment_fetch_wrong_inquiry_rejected(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();
        let output = board_chain(&config).run(ctx.connection()).await?;
        let product: Product = output.get("product")?;
        let comment: Comment = output.get("comment")?;

        let request = InquiryCreate {
            product_id: product.id,
            question: random::paragraph(),
        };
        let unrelated = functional::inquiries::create(ctx.connection(), &request).await?;
        assert_valid(&unrelated)?;

        expect_rejection(
            "comment fetch through an unrelated inquiry",
            functional::comments::get(ctx.connection(), unrelated.id, comment.id),
        )
        .await
    })
}

/// A second, freshly registered buyer cannot read the first buyer's
/// comment even with the correct address.
pub fn comment_fetch_foreign_buyer_rejected(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();
        let output = board_chain(&config).run(ctx.connection()).await?;
        let inquiry: Inquiry = output.get("inquiry")?;
        let comment: Comment = output.get("comment")?;

        let mut other = ctx.extra_connection()?;
        actor::join_random(&mut other, Role::Buyer, &config).await?;

        expect_rejection(
            "foreign buyer reads another buyer's comment",
            functional::comments::get(&other, inquiry.id, comment.id),
        )
        .await
    })
}
