//! Session semantics on a single connection.

use mall_client::functional;
use mall_common::model::{InquiryCreate, ProductCreate, Role};
use mall_common::random;

use crate::actor::{self, Credentials};
use crate::check::{assert_valid, ensure_eq};
use crate::negative::expect_rejection;
use crate::scenario::{ScenarioContext, ScenarioFuture};

/// Switching roles on one connection fully replaces the identity: the
/// previous actor's permissions do not bleed through, and logging back
/// in restores them.
pub fn session_switch_replaces_identity(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();

        let seller_credentials = Credentials::random(&config);
        actor::join(ctx.connection(), Role::Seller, &seller_credentials).await?;
        let product_request = ProductCreate {
            name: random::product_name(),
            price_cents: 3_000,
        };
        let product = functional::products::create(ctx.connection(), &product_request).await?;
        assert_valid(&product)?;

        let buyer_credentials = Credentials::random(&config);
        let buyer = actor::join(ctx.connection(), Role::Buyer, &buyer_credentials).await?;
        let request = InquiryCreate {
            product_id: product.id,
            question: random::paragraph(),
        };
        let inquiry = functional::inquiries::create(ctx.connection(), &request).await?;
        assert_valid(&inquiry)?;

        // Now the seller. The buyer-only call must be refused: no
        // residue of the buyer session remains.
        actor::login(ctx.connection(), Role::Seller, &seller_credentials).await?;
        let request = InquiryCreate {
            product_id: product.id,
            question: random::paragraph(),
        };
        expect_rejection(
            "buyer-only call under a seller session",
            functional::inquiries::create(ctx.connection(), &request),
        )
        .await?;

        // And back: the buyer identity works again in full.
        let buyer_again = actor::login(ctx.connection(), Role::Buyer, &buyer_credentials).await?;
        ensure_eq("re-login resolves the same account", &buyer.id, &buyer_again.id)?;
        let request = InquiryCreate {
            product_id: product.id,
            question: random::paragraph(),
        };
        let inquiry = functional::inquiries::create(ctx.connection(), &request).await?;
        assert_valid(&inquiry)?;
        ensure_eq("restored buyer owns the new inquiry", &buyer.id, &inquiry.author_id)?;
        Ok(())
    })
}

/// Registration is exclusive per email within a role family; login
/// still works for the original credentials and refuses wrong ones.
pub fn duplicate_join_rejected(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();
        let credentials = Credentials::random(&config);
        let original = actor::join(ctx.connection(), Role::Buyer, &credentials).await?;

        expect_rejection(
            "second join with the same email",
            actor::join(ctx.connection(), Role::Buyer, &credentials),
        )
        .await?;

        let logged_in = actor::login(ctx.connection(), Role::Buyer, &credentials).await?;
        ensure_eq("login resolves the original account", &original.id, &logged_in.id)?;

        let mut wrong = credentials.clone();
        wrong.password = random::password();
        expect_rejection(
            "login with the wrong password",
            actor::login(ctx.connection(), Role::Buyer, &wrong),
        )
        .await
    })
}
