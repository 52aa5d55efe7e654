//! In-memory store and business rules for the reference backend.
//!
//! State is a plain set of maps behind one lock; every operation takes
//! `&mut self`, runs synchronously, and returns either the created/read
//! DTO or a [`StoreError`] that the route layer maps onto an HTTP status
//! and error envelope.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use mall_common::model::{
    AuthorizedActor, Comment, CommentCreate, Coupon, CouponCreate, CouponGrant, CouponUse,
    Inquiry, InquiryCreate, JoinRequest, LoginRequest, Order, OrderCreate, OrderStatus, Product,
    ProductCreate, ProductStatus, Role, SessionToken,
};
use mall_common::page::{MAX_LIMIT, Page, PageRequest, Pagination};
use mall_common::{ActorId, CommentId, CouponId, CouponUseId, InquiryId, OrderId, ProductId};

/// Rejection raised by a store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No token, or a token the session table does not know.
    #[error("missing or unknown session token")]
    Unauthorized,

    /// Authenticated, but the actor's role or ownership does not permit
    /// the operation.
    #[error("{0}")]
    Forbidden(&'static str),

    /// The addressed resource does not exist (or is not visible through
    /// the addressed parent).
    #[error("{0}")]
    NotFound(&'static str),

    /// An account with this email already exists in the role family.
    #[error("email is already registered")]
    DuplicateEmail,

    /// A live coupon already uses this code.
    #[error("coupon code is already in use")]
    DuplicateCode,

    /// Request is well-formed but semantically invalid.
    #[error("{0}")]
    Invalid(&'static str),
}

impl StoreError {
    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::DuplicateEmail => "duplicate_email",
            Self::DuplicateCode => "duplicate_code",
            Self::Invalid(_) => "invalid_request",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A registered account. Passwords are kept in the clear; this backend
/// exists to give scenarios deterministic semantics, not to be deployed.
#[derive(Debug, Clone)]
struct Account {
    id: ActorId,
    role: Role,
    email: String,
    password: String,
    name: String,
}

/// The whole backend: entity maps plus the token table.
#[derive(Debug, Default)]
pub struct MallState {
    accounts: HashMap<ActorId, Account>,
    emails: HashMap<(Role, String), ActorId>,
    sessions: HashMap<String, ActorId>,
    products: HashMap<ProductId, Product>,
    product_order: Vec<ProductId>,
    inquiries: HashMap<InquiryId, Inquiry>,
    comments: HashMap<CommentId, Comment>,
    comment_order: Vec<CommentId>,
    coupons: HashMap<CouponId, Coupon>,
    grants: Vec<CouponGrant>,
    coupon_uses: HashMap<CouponUseId, CouponUse>,
    orders: HashMap<OrderId, Order>,
}

impl MallState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- auth ----

    pub fn join(&mut self, role: Role, request: &JoinRequest) -> StoreResult<AuthorizedActor> {
        if request.email.trim().is_empty() || !request.email.contains('@') {
            return Err(StoreError::Invalid("email must be a valid address"));
        }
        if request.password.len() < 8 {
            return Err(StoreError::Invalid("password must be at least 8 characters"));
        }

        let key = (role, request.email.clone());
        if self.emails.contains_key(&key) {
            return Err(StoreError::DuplicateEmail);
        }

        let account = Account {
            id: ActorId::random(),
            role,
            email: request.email.clone(),
            password: request.password.clone(),
            name: request.name.clone(),
        };
        self.emails.insert(key, account.id);
        self.accounts.insert(account.id, account.clone());

        Ok(self.open_session(&account))
    }

    pub fn login(&mut self, role: Role, request: &LoginRequest) -> StoreResult<AuthorizedActor> {
        let id = self
            .emails
            .get(&(role, request.email.clone()))
            .copied()
            .ok_or(StoreError::Unauthorized)?;
        let account = self.accounts.get(&id).ok_or(StoreError::Unauthorized)?.clone();
        if account.password != request.password {
            return Err(StoreError::Unauthorized);
        }
        Ok(self.open_session(&account))
    }

    fn open_session(&mut self, account: &Account) -> AuthorizedActor {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), account.id);
        AuthorizedActor {
            id: account.id,
            role: account.role,
            email: account.email.clone(),
            name: account.name.clone(),
            token: SessionToken(token),
            created_at: Utc::now(),
        }
    }

    /// Resolve a bearer token to the acting account.
    pub fn authenticate(&self, token: Option<&str>) -> StoreResult<(ActorId, Role)> {
        let token = token.ok_or(StoreError::Unauthorized)?;
        let id = self.sessions.get(token).copied().ok_or(StoreError::Unauthorized)?;
        let account = self.accounts.get(&id).ok_or(StoreError::Unauthorized)?;
        Ok((account.id, account.role))
    }

    fn require(actual: Role, required: Role) -> StoreResult<()> {
        if actual == required {
            Ok(())
        } else {
            Err(StoreError::Forbidden("role does not permit this operation"))
        }
    }

    // ---- products ----

    pub fn create_product(
        &mut self,
        actor: (ActorId, Role),
        request: &ProductCreate,
    ) -> StoreResult<Product> {
        Self::require(actor.1, Role::Seller)?;
        if request.name.trim().is_empty() {
            return Err(StoreError::Invalid("product name must not be empty"));
        }

        let product = Product {
            id: ProductId::random(),
            seller_id: actor.0,
            name: request.name.clone(),
            price_cents: request.price_cents,
            status: ProductStatus::Active,
            created_at: Utc::now(),
        };
        self.product_order.push(product.id);
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    pub fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        self.products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("no such product"))
    }

    pub fn list_products(&self, page: PageRequest) -> StoreResult<Page<Product>> {
        let items: Vec<Product> = self
            .product_order
            .iter()
            .filter_map(|id| self.products.get(id).cloned())
            .collect();
        paginate(items, page)
    }

    // ---- inquiries ----

    pub fn create_inquiry(
        &mut self,
        actor: (ActorId, Role),
        request: &InquiryCreate,
    ) -> StoreResult<Inquiry> {
        Self::require(actor.1, Role::Buyer)?;
        if !self.products.contains_key(&request.product_id) {
            return Err(StoreError::NotFound("no such product"));
        }
        if request.question.trim().is_empty() {
            return Err(StoreError::Invalid("question must not be empty"));
        }

        let inquiry = Inquiry {
            id: InquiryId::random(),
            product_id: request.product_id,
            author_id: actor.0,
            question: request.question.clone(),
            created_at: Utc::now(),
        };
        self.inquiries.insert(inquiry.id, inquiry.clone());
        Ok(inquiry)
    }

    pub fn get_inquiry(&self, actor: (ActorId, Role), id: InquiryId) -> StoreResult<Inquiry> {
        Self::require(actor.1, Role::Buyer)?;
        let inquiry = self
            .inquiries
            .get(&id)
            .ok_or(StoreError::NotFound("no such inquiry"))?;
        if inquiry.author_id != actor.0 {
            return Err(StoreError::Forbidden("inquiry belongs to another buyer"));
        }
        Ok(inquiry.clone())
    }

    // ---- comments ----

    pub fn create_comment(
        &mut self,
        actor: (ActorId, Role),
        inquiry_id: InquiryId,
        request: &CommentCreate,
    ) -> StoreResult<Comment> {
        Self::require(actor.1, Role::Buyer)?;
        let inquiry = self
            .inquiries
            .get(&inquiry_id)
            .ok_or(StoreError::NotFound("no such inquiry"))?;
        if inquiry.author_id != actor.0 {
            return Err(StoreError::Forbidden("inquiry belongs to another buyer"));
        }
        if request.body.trim().is_empty() {
            return Err(StoreError::Invalid("comment body must not be empty"));
        }

        let comment = Comment {
            id: CommentId::random(),
            inquiry_id,
            author_id: actor.0,
            body: request.body.clone(),
            visibility: request.visibility,
            status: request.status,
            created_at: Utc::now(),
        };
        self.comment_order.push(comment.id);
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    /// Buyer fetch of one comment. The comment must exist under the
    /// addressed inquiry, and the inquiry must belong to the caller.
    pub fn get_comment(
        &self,
        actor: (ActorId, Role),
        inquiry_id: InquiryId,
        comment_id: CommentId,
    ) -> StoreResult<Comment> {
        Self::require(actor.1, Role::Buyer)?;
        let comment = self
            .comments
            .get(&comment_id)
            .ok_or(StoreError::NotFound("no such comment"))?;
        if comment.inquiry_id != inquiry_id {
            return Err(StoreError::NotFound("comment does not belong to this inquiry"));
        }
        let inquiry = self
            .inquiries
            .get(&inquiry_id)
            .ok_or(StoreError::NotFound("no such inquiry"))?;
        if inquiry.author_id != actor.0 {
            return Err(StoreError::Forbidden("inquiry belongs to another buyer"));
        }
        Ok(comment.clone())
    }

    /// Seller listing of an inquiry's comments, creation order.
    pub fn list_comments_for_seller(
        &self,
        actor: (ActorId, Role),
        inquiry_id: InquiryId,
        page: PageRequest,
    ) -> StoreResult<Page<Comment>> {
        Self::require(actor.1, Role::Seller)?;
        let inquiry = self
            .inquiries
            .get(&inquiry_id)
            .ok_or(StoreError::NotFound("no such inquiry"))?;
        let product = self
            .products
            .get(&inquiry.product_id)
            .ok_or(StoreError::NotFound("no such product"))?;
        if product.seller_id != actor.0 {
            return Err(StoreError::Forbidden("inquiry is not about this seller's product"));
        }

        let items: Vec<Comment> = self
            .comment_order
            .iter()
            .filter_map(|id| self.comments.get(id))
            .filter(|c| c.inquiry_id == inquiry_id)
            .cloned()
            .collect();
        paginate(items, page)
    }

    // ---- coupons ----

    pub fn create_coupon(
        &mut self,
        actor: (ActorId, Role),
        request: &CouponCreate,
    ) -> StoreResult<Coupon> {
        Self::require(actor.1, Role::Admin)?;
        if self.coupons.values().any(|c| c.code == request.code) {
            return Err(StoreError::DuplicateCode);
        }

        let coupon = Coupon {
            id: CouponId::random(),
            code: request.code.clone(),
            discount_cents: request.discount_cents,
            issued_by: actor.0,
            created_at: Utc::now(),
        };
        self.coupons.insert(coupon.id, coupon.clone());
        Ok(coupon)
    }

    pub fn issue_coupon(
        &mut self,
        actor: (ActorId, Role),
        coupon_id: CouponId,
        user_id: ActorId,
    ) -> StoreResult<CouponGrant> {
        Self::require(actor.1, Role::Admin)?;
        if !self.coupons.contains_key(&coupon_id) {
            return Err(StoreError::NotFound("no such coupon"));
        }
        if !self.accounts.contains_key(&user_id) {
            return Err(StoreError::NotFound("no such user"));
        }

        let grant = CouponGrant {
            coupon_id,
            user_id,
            granted_at: Utc::now(),
        };
        self.grants.push(grant.clone());
        Ok(grant)
    }

    pub fn redeem_coupon(
        &mut self,
        actor: (ActorId, Role),
        coupon_id: CouponId,
        user_id: ActorId,
    ) -> StoreResult<CouponUse> {
        Self::require(actor.1, Role::Admin)?;
        if !self.coupons.contains_key(&coupon_id) {
            return Err(StoreError::NotFound("no such coupon"));
        }
        let granted = self
            .grants
            .iter()
            .any(|g| g.coupon_id == coupon_id && g.user_id == user_id);
        if !granted {
            return Err(StoreError::Forbidden("coupon was not granted to this user"));
        }

        let coupon_use = CouponUse {
            id: CouponUseId::random(),
            coupon_id,
            user_id,
            redeemed_at: Utc::now(),
        };
        self.coupon_uses.insert(coupon_use.id, coupon_use.clone());
        Ok(coupon_use)
    }

    /// Hard delete of a coupon-use. Once erased, the id is gone; a second
    /// erase reports not-found.
    pub fn erase_coupon_use(
        &mut self,
        actor: (ActorId, Role),
        coupon_use_id: CouponUseId,
    ) -> StoreResult<()> {
        Self::require(actor.1, Role::Admin)?;
        self.coupon_uses
            .remove(&coupon_use_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("no such coupon use"))
    }

    // ---- orders ----

    pub fn create_order(
        &mut self,
        actor: (ActorId, Role),
        request: &OrderCreate,
    ) -> StoreResult<Order> {
        Self::require(actor.1, Role::Buyer)?;
        let product = self
            .products
            .get(&request.product_id)
            .ok_or(StoreError::NotFound("no such product"))?;
        if product.status != ProductStatus::Active {
            return Err(StoreError::Invalid("product is not orderable"));
        }
        if request.quantity == 0 {
            return Err(StoreError::Invalid("quantity must be at least 1"));
        }

        let order = Order {
            id: OrderId::random(),
            buyer_id: actor.0,
            product_id: product.id,
            quantity: request.quantity,
            total_cents: product.price_cents * u64::from(request.quantity),
            status: OrderStatus::Placed,
            created_at: Utc::now(),
        };
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    pub fn get_order(&self, actor: (ActorId, Role), id: OrderId) -> StoreResult<Order> {
        Self::require(actor.1, Role::Buyer)?;
        let order = self
            .orders
            .get(&id)
            .ok_or(StoreError::NotFound("no such order"))?;
        if order.buyer_id != actor.0 {
            return Err(StoreError::Forbidden("order belongs to another buyer"));
        }
        Ok(order.clone())
    }
}

/// Slice an in-order item list into the requested page.
fn paginate<T>(items: Vec<T>, page: PageRequest) -> StoreResult<Page<T>> {
    if page.page == 0 {
        return Err(StoreError::Invalid("page numbers start at 1"));
    }
    if page.limit == 0 {
        return Err(StoreError::Invalid("limit must be at least 1"));
    }
    let limit = page.limit.min(MAX_LIMIT);

    let records = items.len() as u64;
    let start = (page.page as usize - 1).saturating_mul(limit as usize);
    let data: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    Ok(Page {
        pagination: Pagination {
            current: page.page,
            limit,
            records,
            pages: Pagination::pages_for(records, limit),
        },
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mall_common::model::{CommentStatus, Visibility};

    fn join_as(state: &mut MallState, role: Role, email: &str) -> AuthorizedActor {
        state
            .join(
                role,
                &JoinRequest {
                    email: email.to_string(),
                    password: "hunter2hunter2".to_string(),
                    name: "test actor".to_string(),
                },
            )
            .unwrap()
    }

    fn seeded_inquiry(state: &mut MallState) -> (AuthorizedActor, AuthorizedActor, Inquiry) {
        let seller = join_as(state, Role::Seller, "seller@mall.test");
        let buyer = join_as(state, Role::Buyer, "buyer@mall.test");
        let product = state
            .create_product(
                (seller.id, Role::Seller),
                &ProductCreate {
                    name: "copper kettle".to_string(),
                    price_cents: 4500,
                },
            )
            .unwrap();
        let inquiry = state
            .create_inquiry(
                (buyer.id, Role::Buyer),
                &InquiryCreate {
                    product_id: product.id,
                    question: "does it whistle?".to_string(),
                },
            )
            .unwrap();
        (seller, buyer, inquiry)
    }

    #[test]
    fn duplicate_email_in_same_role_family_is_rejected() {
        let mut state = MallState::new();
        join_as(&mut state, Role::Buyer, "dup@mall.test");
        let err = state
            .join(
                Role::Buyer,
                &JoinRequest {
                    email: "dup@mall.test".to_string(),
                    password: "hunter2hunter2".to_string(),
                    name: "again".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));

        // Same email under a different role family is a different account.
        join_as(&mut state, Role::Seller, "dup@mall.test");
    }

    #[test]
    fn login_issues_a_fresh_token() {
        let mut state = MallState::new();
        let joined = join_as(&mut state, Role::Buyer, "fresh@mall.test");
        let logged_in = state
            .login(
                Role::Buyer,
                &LoginRequest {
                    email: "fresh@mall.test".to_string(),
                    password: "hunter2hunter2".to_string(),
                },
            )
            .unwrap();
        assert_eq!(joined.id, logged_in.id);
        assert_ne!(joined.token, logged_in.token);
        // Both tokens resolve to the same account.
        let (id, _) = state.authenticate(Some(joined.token.as_str())).unwrap();
        assert_eq!(id, joined.id);
    }

    #[test]
    fn comment_fetch_is_scoped_to_inquiry_and_owner() {
        let mut state = MallState::new();
        let (_seller, buyer, inquiry) = seeded_inquiry(&mut state);
        let comment = state
            .create_comment(
                (buyer.id, Role::Buyer),
                inquiry.id,
                &CommentCreate {
                    body: "any update?".to_string(),
                    visibility: Visibility::Public,
                    status: CommentStatus::Published,
                },
            )
            .unwrap();

        // Correct pair resolves.
        let fetched = state
            .get_comment((buyer.id, Role::Buyer), inquiry.id, comment.id)
            .unwrap();
        assert_eq!(fetched.id, comment.id);

        // Wrong inquiry id is a not-found even though the comment exists.
        let err = state
            .get_comment((buyer.id, Role::Buyer), InquiryId::random(), comment.id)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // Another buyer is refused.
        let stranger = join_as(&mut state, Role::Buyer, "stranger@mall.test");
        let err = state
            .get_comment((stranger.id, Role::Buyer), inquiry.id, comment.id)
            .unwrap_err();
        assert!(matches!(err, StoreError::Forbidden(_)));
    }

    #[test]
    fn seller_listing_pages_in_creation_order() {
        let mut state = MallState::new();
        let (seller, buyer, inquiry) = seeded_inquiry(&mut state);
        for i in 0..6 {
            state
                .create_comment(
                    (buyer.id, Role::Buyer),
                    inquiry.id,
                    &CommentCreate {
                        body: format!("comment {i}"),
                        visibility: Visibility::Public,
                        status: CommentStatus::Published,
                    },
                )
                .unwrap();
        }

        let first = state
            .list_comments_for_seller((seller.id, Role::Seller), inquiry.id, PageRequest::new(1, 4))
            .unwrap();
        assert_eq!(first.data.len(), 4);
        assert_eq!(first.pagination.records, 6);
        assert_eq!(first.pagination.pages, 2);
        assert_eq!(first.data[0].body, "comment 0");

        let second = state
            .list_comments_for_seller((seller.id, Role::Seller), inquiry.id, PageRequest::new(2, 4))
            .unwrap();
        assert_eq!(second.data.len(), 2);
        assert!(second.data.iter().all(|c| !first.data.iter().any(|f| f.id == c.id)));
    }

    #[test]
    fn coupon_use_erase_is_once_only() {
        let mut state = MallState::new();
        let admin = join_as(&mut state, Role::Admin, "admin@mall.test");
        let buyer = join_as(&mut state, Role::Buyer, "buyer@mall.test");
        let admin_ctx = (admin.id, Role::Admin);

        let coupon = state
            .create_coupon(
                admin_ctx,
                &CouponCreate {
                    code: "SAVE-ABCDEF".to_string(),
                    discount_cents: 1000,
                },
            )
            .unwrap();
        state.issue_coupon(admin_ctx, coupon.id, buyer.id).unwrap();
        let coupon_use = state.redeem_coupon(admin_ctx, coupon.id, buyer.id).unwrap();

        state.erase_coupon_use(admin_ctx, coupon_use.id).unwrap();
        let err = state.erase_coupon_use(admin_ctx, coupon_use.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn redeem_requires_a_grant() {
        let mut state = MallState::new();
        let admin = join_as(&mut state, Role::Admin, "admin@mall.test");
        let buyer = join_as(&mut state, Role::Buyer, "buyer@mall.test");
        let admin_ctx = (admin.id, Role::Admin);

        let coupon = state
            .create_coupon(
                admin_ctx,
                &CouponCreate {
                    code: "SAVE-ZZZZZZ".to_string(),
                    discount_cents: 500,
                },
            )
            .unwrap();
        let err = state.redeem_coupon(admin_ctx, coupon.id, buyer.id).unwrap_err();
        assert!(matches!(err, StoreError::Forbidden(_)));
    }

    #[test]
    fn order_total_is_price_times_quantity() {
        let mut state = MallState::new();
        let (_seller, buyer, inquiry) = seeded_inquiry(&mut state);
        let order = state
            .create_order(
                (buyer.id, Role::Buyer),
                &OrderCreate {
                    product_id: inquiry.product_id,
                    quantity: 3,
                },
            )
            .unwrap();
        assert_eq!(order.total_cents, 13_500);
        assert_eq!(order.status, OrderStatus::Placed);
    }

    #[test]
    fn role_checks_guard_each_family() {
        let mut state = MallState::new();
        let buyer = join_as(&mut state, Role::Buyer, "buyer@mall.test");
        let err = state
            .create_product(
                (buyer.id, Role::Buyer),
                &ProductCreate {
                    name: "not yours".to_string(),
                    price_cents: 100,
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Forbidden(_)));

        let err = state
            .create_coupon(
                (buyer.id, Role::Buyer),
                &CouponCreate {
                    code: "SAVE-NOPE".to_string(),
                    discount_cents: 1,
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Forbidden(_)));
    }

    #[test]
    fn pagination_rejects_zero_page_and_limit() {
        assert!(matches!(
            paginate(vec![1, 2, 3], PageRequest::new(0, 4)),
            Err(StoreError::Invalid(_))
        ));
        assert!(matches!(
            paginate(vec![1, 2, 3], PageRequest::new(1, 0)),
            Err(StoreError::Invalid(_))
        ));
    }
}
