//! Order types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, OrderId, ProductId};

/// Progression state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, awaiting payment.
    Placed,
    /// Payment confirmed.
    Paid,
    /// Cancelled before payment.
    Cancelled,
}

/// A buyer order for a single product line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Buyer account that placed the order.
    pub buyer_id: ActorId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Total in minor currency units: unit price times quantity.
    pub total_cents: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Buyer request to place an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub product_id: ProductId,
    pub quantity: u32,
}
