//! HTTP surface of the reference backend.
//!
//! Thin handlers: pull the bearer token, resolve the acting account,
//! delegate to [`MallState`], and map the result onto a JSON body or the
//! error envelope. All business rules live in the state layer.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use uuid::Uuid;

use mall_common::model::{
    CommentCreate, CouponCreate, CouponIssueRequest, CouponRedeemRequest, InquiryCreate,
    JoinRequest, LoginRequest, OrderCreate, ProductCreate, Role,
};
use mall_common::page::PageRequest;
use mall_common::ErrorBody;

use crate::state::{MallState, StoreError};

/// Shared handler state.
pub type SharedState = Arc<Mutex<MallState>>;

/// Build the full router over a fresh in-memory store.
pub fn router() -> Router {
    router_with_state(Arc::new(Mutex::new(MallState::new())))
}

/// Build the router over an existing store (tests inspect it afterwards).
pub fn router_with_state(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/{role}/join", post(join))
        .route("/auth/{role}/login", post(login))
        .route("/seller/products", post(create_product))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/buyer/inquiries", post(create_inquiry))
        .route("/buyer/inquiries/{id}", get(get_inquiry))
        .route("/buyer/inquiries/{id}/comments", post(create_comment))
        .route("/buyer/inquiries/{id}/comments/{comment_id}", get(get_comment))
        .route("/seller/inquiries/{id}/comments", get(list_comments))
        .route("/admin/coupons", post(create_coupon))
        .route("/admin/coupons/{id}/grants", post(issue_coupon))
        .route("/admin/coupons/{id}/uses", post(redeem_coupon))
        .route("/admin/coupon-uses/{id}", delete(erase_coupon_use))
        .route("/buyer/orders", post(create_order))
        .route("/buyer/orders/{id}", get(get_order))
        .with_state(state)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn parse_role(segment: &str) -> Result<Role, Response> {
    match segment {
        "admins" => Ok(Role::Admin),
        "sellers" => Ok(Role::Seller),
        "buyers" => Ok(Role::Buyer),
        _ => Err(reject_with(
            StatusCode::NOT_FOUND,
            ErrorBody::new("not_found", "unknown role family"),
        )),
    }
}

fn ok_json<T: Serialize>(value: T) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

fn created_json<T: Serialize>(value: T) -> Response {
    (StatusCode::CREATED, Json(value)).into_response()
}

fn reject(err: StoreError) -> Response {
    let status = match &err {
        StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
        StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::DuplicateEmail | StoreError::DuplicateCode => StatusCode::CONFLICT,
        StoreError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    reject_with(status, ErrorBody::new(err.code(), err.to_string()))
}

fn reject_with(status: StatusCode, body: ErrorBody) -> Response {
    (status, Json(body)).into_response()
}

/// Resolve the acting account or bail with 401.
macro_rules! actor {
    ($state:expr, $headers:expr) => {
        match $state.authenticate(bearer($headers).as_deref()) {
            Ok(actor) => actor,
            Err(err) => return reject(err),
        }
    };
}

async fn health() -> Response {
    ok_json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn join(
    State(state): State<SharedState>,
    Path(role): Path<String>,
    Json(request): Json<JoinRequest>,
) -> Response {
    let role = match parse_role(&role) {
        Ok(role) => role,
        Err(response) => return response,
    };
    let mut state = state.lock().expect("state lock");
    match state.join(role, &request) {
        Ok(actor) => created_json(actor),
        Err(err) => reject(err),
    }
}

async fn login(
    State(state): State<SharedState>,
    Path(role): Path<String>,
    Json(request): Json<LoginRequest>,
) -> Response {
    let role = match parse_role(&role) {
        Ok(role) => role,
        Err(response) => return response,
    };
    let mut state = state.lock().expect("state lock");
    match state.login(role, &request) {
        Ok(actor) => ok_json(actor),
        Err(err) => reject(err),
    }
}

async fn create_product(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<ProductCreate>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.create_product(actor, &request) {
        Ok(product) => created_json(product),
        Err(err) => reject(err),
    }
}

async fn get_product(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let state = state.lock().expect("state lock");
    let _actor = actor!(state, &headers);
    match state.get_product(id.into()) {
        Ok(product) => ok_json(product),
        Err(err) => reject(err),
    }
}

async fn list_products(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(page): Query<PageRequest>,
) -> Response {
    let state = state.lock().expect("state lock");
    let _actor = actor!(state, &headers);
    match state.list_products(page) {
        Ok(page) => ok_json(page),
        Err(err) => reject(err),
    }
}

async fn create_inquiry(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<InquiryCreate>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.create_inquiry(actor, &request) {
        Ok(inquiry) => created_json(inquiry),
        Err(err) => reject(err),
    }
}

async fn get_inquiry(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.get_inquiry(actor, id.into()) {
        Ok(inquiry) => ok_json(inquiry),
        Err(err) => reject(err),
    }
}

async fn create_comment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<CommentCreate>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.create_comment(actor, id.into(), &request) {
        Ok(comment) => created_json(comment),
        Err(err) => reject(err),
    }
}

async fn get_comment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((inquiry_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Response {
    let state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.get_comment(actor, inquiry_id.into(), comment_id.into()) {
        Ok(comment) => ok_json(comment),
        Err(err) => reject(err),
    }
}

async fn list_comments(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Response {
    let state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.list_comments_for_seller(actor, id.into(), page) {
        Ok(page) => ok_json(page),
        Err(err) => reject(err),
    }
}

async fn create_coupon(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<CouponCreate>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.create_coupon(actor, &request) {
        Ok(coupon) => created_json(coupon),
        Err(err) => reject(err),
    }
}

async fn issue_coupon(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<CouponIssueRequest>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.issue_coupon(actor, id.into(), request.user_id) {
        Ok(grant) => created_json(grant),
        Err(err) => reject(err),
    }
}

async fn redeem_coupon(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<CouponRedeemRequest>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.redeem_coupon(actor, id.into(), request.user_id) {
        Ok(coupon_use) => created_json(coupon_use),
        Err(err) => reject(err),
    }
}

async fn erase_coupon_use(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.erase_coupon_use(actor, id.into()) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => reject(err),
    }
}

async fn create_order(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<OrderCreate>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.create_order(actor, &request) {
        Ok(order) => created_json(order),
        Err(err) => reject(err),
    }
}

async fn get_order(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let state = state.lock().expect("state lock");
    let actor = actor!(state, &headers);
    match state.get_order(actor, id.into()) {
        Ok(order) => ok_json(order),
        Err(err) => reject(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_version() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn join_returns_identity_and_token() {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/buyers/join")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "email": "router@mall.test",
                    "password": "hunter2hunter2",
                    "name": "router test",
                })
                .to_string(),
            ))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["role"], "buyer");
        assert!(!json["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_role_family_is_not_found() {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/wizards/join")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unauthenticated_calls_are_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/seller/products")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({"name": "kettle", "price_cents": 100}).to_string(),
            ))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["code"], "unauthorized");
    }
}
