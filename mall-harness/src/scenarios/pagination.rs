//! Pagination window and union properties over the seller's comment
//! listing.

use mall_client::functional;
use mall_common::model::{
    CommentCreate, CommentStatus, InquiryCreate, ProductCreate, Role, Visibility,
};
use mall_common::page::PageRequest;
use mall_common::random;

use crate::actor::{self, Credentials};
use crate::check::{assert_valid, ensure_eq, ensure_page_window, ensure_pages_cover};
use crate::scenario::{ScenarioContext, ScenarioFuture};

/// Six comments listed at limit 4: page 1 holds exactly 4, page 2 the
/// remaining 2, ids disjoint, union complete, records metadata correct.
pub fn comment_pagination_window(ctx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let config = ctx.config().clone();

        // Seller credentials are kept: the listing at the end runs
        // under the seller again.
        let seller_credentials = Credentials::random(&config);
        let seller = actor::join(ctx.connection(), Role::Seller, &seller_credentials).await?;

        let product_request = ProductCreate {
            name: random::product_name(),
            price_cents: 9_900,
        };
        let product = functional::products::create(ctx.connection(), &product_request).await?;
        assert_valid(&product)?;
        ensure_eq("product belongs to the listing seller", &seller.id, &product.seller_id)?;

        actor::join_random(ctx.connection(), Role::Buyer, &config).await?;
        let inquiry_request = InquiryCreate {
            product_id: product.id,
            question: random::paragraph(),
        };
        let inquiry = functional::inquiries::create(ctx.connection(), &inquiry_request).await?;
        assert_valid(&inquiry)?;

        // Sequential creation fixes the listing order.
        let mut created_ids = Vec::new();
        for i in 0..6 {
            let request = CommentCreate {
                body: format!("update {i}: {}", random::paragraph()),
                visibility: Visibility::Public,
                status: CommentStatus::Published,
            };
            let comment = functional::comments::create(ctx.connection(), inquiry.id, &request).await?;
            assert_valid(&comment)?;
            created_ids.push(comment.id);
        }

        actor::login(ctx.connection(), Role::Seller, &seller_credentials).await?;

        let first =
            functional::comments::list_for_seller(ctx.connection(), inquiry.id, PageRequest::new(1, 4))
                .await?;
        assert_valid(&first)?;
        ensure_page_window("page 1", &first)?;
        ensure_eq("page 1 item count", &4usize, &first.data.len())?;
        ensure_eq("records across the listing", &6u64, &first.pagination.records)?;
        ensure_eq("page count at limit 4", &2u64, &first.pagination.pages)?;

        let second =
            functional::comments::list_for_seller(ctx.connection(), inquiry.id, PageRequest::new(2, 4))
                .await?;
        assert_valid(&second)?;
        ensure_page_window("page 2", &second)?;
        ensure_eq("page 2 item count", &2usize, &second.data.len())?;

        ensure_pages_cover("paged union", &[&first, &second], |c| c.id, &created_ids)
    })
}
