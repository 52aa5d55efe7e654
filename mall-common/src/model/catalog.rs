//! Product catalog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, ProductId};

/// Listing state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Visible and orderable.
    Active,
    /// Temporarily hidden by the seller.
    Paused,
}

impl Default for ProductStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// A product listed by a seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Seller account that owns the listing.
    pub seller_id: ActorId,
    pub name: String,
    /// Unit price in minor currency units.
    pub price_cents: u64,
    #[serde(default)]
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

/// Seller request to create a product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price_cents: u64,
}
