//! Inquiry board types: buyer questions on products and the comments
//! threaded under them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, CommentId, InquiryId, ProductId};

/// A buyer question attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    /// Product the question is about.
    pub product_id: ProductId,
    /// Buyer who asked.
    pub author_id: ActorId,
    pub question: String,
    pub created_at: DateTime<Utc>,
}

/// Buyer request to open an inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryCreate {
    pub product_id: ProductId,
    pub question: String,
}

/// Who can see a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    /// Visible only to the author and the product's seller.
    Private,
}

/// Moderation state of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    Published,
    Hidden,
}

/// A comment threaded under an inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    /// Inquiry the comment belongs to. Fetches through a different
    /// inquiry id are rejected even when the comment id is valid.
    pub inquiry_id: InquiryId,
    /// Author of the comment.
    pub author_id: ActorId,
    pub body: String,
    pub visibility: Visibility,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

/// Request to add a comment to an inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub body: String,
    pub visibility: Visibility,
    pub status: CommentStatus,
}
