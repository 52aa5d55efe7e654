//! Order endpoints (buyer side).

use mall_common::{Order, OrderCreate, OrderId};

use crate::{ClientResult, Connection};

/// Place an order. Buyer session required.
pub async fn create(conn: &Connection, request: &OrderCreate) -> ClientResult<Order> {
    conn.post("/buyer/orders", request).await
}

/// Fetch one of the calling buyer's orders. Owner only.
pub async fn get(conn: &Connection, id: OrderId) -> ClientResult<Order> {
    conn.get(&format!("/buyer/orders/{id}")).await
}
