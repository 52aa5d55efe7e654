//! Comment endpoints.
//!
//! Buyer reads are scoped by ownership: the `(inquiry_id, comment_id)`
//! pair must belong to the calling buyer, so a valid comment id fetched
//! through a foreign inquiry id is rejected, as is any fetch by a buyer
//! who does not own the inquiry.

use mall_common::{Comment, CommentCreate, CommentId, InquiryId, Page, PageRequest};

use crate::{ClientResult, Connection};

/// Add a comment under an inquiry. Buyer session owning the inquiry.
pub async fn create(
    conn: &Connection,
    inquiry_id: InquiryId,
    request: &CommentCreate,
) -> ClientResult<Comment> {
    conn.post(&format!("/buyer/inquiries/{inquiry_id}/comments"), request)
        .await
}

/// Fetch one comment by `(inquiry_id, comment_id)`. Owner only.
pub async fn get(
    conn: &Connection,
    inquiry_id: InquiryId,
    comment_id: CommentId,
) -> ClientResult<Comment> {
    conn.get(&format!("/buyer/inquiries/{inquiry_id}/comments/{comment_id}"))
        .await
}

/// List the comments on an inquiry against one of the seller's products,
/// paginated in creation order. Seller session required.
pub async fn list_for_seller(
    conn: &Connection,
    inquiry_id: InquiryId,
    page: PageRequest,
) -> ClientResult<Page<Comment>> {
    conn.get_query(&format!("/seller/inquiries/{inquiry_id}/comments"), &page)
        .await
}
