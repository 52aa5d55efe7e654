//! Inquiry endpoints (buyer side).

use mall_common::{Inquiry, InquiryCreate, InquiryId};

use crate::{ClientResult, Connection};

/// Open an inquiry on a product. Buyer session required.
pub async fn create(conn: &Connection, request: &InquiryCreate) -> ClientResult<Inquiry> {
    conn.post("/buyer/inquiries", request).await
}

/// Fetch one of the calling buyer's inquiries.
pub async fn get(conn: &Connection, id: InquiryId) -> ClientResult<Inquiry> {
    conn.get(&format!("/buyer/inquiries/{id}")).await
}
