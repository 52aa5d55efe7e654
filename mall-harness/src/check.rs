//! Structural validation and titled assertions.
//!
//! Convention: every non-void response is passed through [`assert_valid`]
//! before any field of it is read or compared. Value assertions carry a
//! human-readable title so a red run names exactly what broke.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use mall_common::model::{
    AuthorizedActor, Comment, Coupon, CouponGrant, CouponUse, Inquiry, Order, Product,
};
use mall_common::page::{Page, Pagination};

use crate::error::{HarnessError, HarnessResult};

/// Structural invariants of a response shape, checked before any
/// field-level assertion.
pub trait Validate {
    /// Name reported on failure.
    fn type_name() -> &'static str;

    /// Err holds a short description of the violated invariant.
    fn validate(&self) -> Result<(), String>;
}

/// Run structural validation, converting a violation into a fatal
/// harness error.
pub fn assert_valid<T: Validate>(value: &T) -> HarnessResult<()> {
    value.validate().map_err(|detail| HarnessError::Validation {
        type_name: T::type_name(),
        detail,
    })
}

/// Titled predicate assertion. Fail-fast: the caller `?`s the result.
pub fn ensure(title: &str, condition: bool) -> HarnessResult<()> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::Assertion {
            title: title.to_string(),
            detail: "predicate was false".to_string(),
        })
    }
}

/// Titled equality assertion with rendered operands.
pub fn ensure_eq<T: PartialEq + Debug>(title: &str, expected: &T, actual: &T) -> HarnessResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(HarnessError::Assertion {
            title: title.to_string(),
            detail: format!("expected {expected:?}, got {actual:?}"),
        })
    }
}

/// Assert the window property of one page: at most `limit` items, and
/// metadata arithmetic that agrees with itself.
pub fn ensure_page_window<T>(title: &str, page: &Page<T>) -> HarnessResult<()> {
    ensure(
        &format!("{title}: item count within limit"),
        page.data.len() <= page.pagination.limit as usize,
    )?;
    ensure_eq(
        &format!("{title}: page count arithmetic"),
        &Pagination::pages_for(page.pagination.records, page.pagination.limit),
        &page.pagination.pages,
    )
}

/// Assert that the pages' union equals `expected` exactly, with no id
/// duplicated across pages.
pub fn ensure_pages_cover<T, K: Eq + Hash + Debug>(
    title: &str,
    pages: &[&Page<T>],
    key: impl Fn(&T) -> K,
    expected: &[K],
) -> HarnessResult<()> {
    let mut seen = HashSet::new();
    for page in pages {
        for item in &page.data {
            let k = key(item);
            if !seen.insert(k) {
                return Err(HarnessError::Assertion {
                    title: title.to_string(),
                    detail: "an id appears on more than one page".to_string(),
                });
            }
        }
    }

    ensure_eq(&format!("{title}: union size"), &expected.len(), &seen.len())?;
    for k in expected {
        ensure(&format!("{title}: union contains every created id"), seen.contains(k))?;
    }
    Ok(())
}

impl Validate for AuthorizedActor {
    fn type_name() -> &'static str {
        "AuthorizedActor"
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.as_uuid().is_nil() {
            return Err("id is nil".to_string());
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("email is not a valid address".to_string());
        }
        if self.token.as_str().is_empty() {
            return Err("session token is empty".to_string());
        }
        Ok(())
    }
}

impl Validate for Product {
    fn type_name() -> &'static str {
        "Product"
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.as_uuid().is_nil() || self.seller_id.as_uuid().is_nil() {
            return Err("id is nil".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        Ok(())
    }
}

impl Validate for Inquiry {
    fn type_name() -> &'static str {
        "Inquiry"
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.as_uuid().is_nil()
            || self.product_id.as_uuid().is_nil()
            || self.author_id.as_uuid().is_nil()
        {
            return Err("id is nil".to_string());
        }
        if self.question.trim().is_empty() {
            return Err("question is empty".to_string());
        }
        Ok(())
    }
}

impl Validate for Comment {
    fn type_name() -> &'static str {
        "Comment"
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.as_uuid().is_nil()
            || self.inquiry_id.as_uuid().is_nil()
            || self.author_id.as_uuid().is_nil()
        {
            return Err("id is nil".to_string());
        }
        if self.body.trim().is_empty() {
            return Err("body is empty".to_string());
        }
        Ok(())
    }
}

impl Validate for Coupon {
    fn type_name() -> &'static str {
        "Coupon"
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.as_uuid().is_nil() || self.issued_by.as_uuid().is_nil() {
            return Err("id is nil".to_string());
        }
        if self.code.trim().is_empty() {
            return Err("code is empty".to_string());
        }
        Ok(())
    }
}

impl Validate for CouponGrant {
    fn type_name() -> &'static str {
        "CouponGrant"
    }

    fn validate(&self) -> Result<(), String> {
        if self.coupon_id.as_uuid().is_nil() || self.user_id.as_uuid().is_nil() {
            return Err("id is nil".to_string());
        }
        Ok(())
    }
}

impl Validate for CouponUse {
    fn type_name() -> &'static str {
        "CouponUse"
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.as_uuid().is_nil()
            || self.coupon_id.as_uuid().is_nil()
            || self.user_id.as_uuid().is_nil()
        {
            return Err("id is nil".to_string());
        }
        Ok(())
    }
}

impl Validate for Order {
    fn type_name() -> &'static str {
        "Order"
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.as_uuid().is_nil()
            || self.buyer_id.as_uuid().is_nil()
            || self.product_id.as_uuid().is_nil()
        {
            return Err("id is nil".to_string());
        }
        if self.quantity == 0 {
            return Err("quantity is zero".to_string());
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Page<T> {
    fn type_name() -> &'static str {
        "Page"
    }

    fn validate(&self) -> Result<(), String> {
        if self.data.len() > self.pagination.limit as usize {
            return Err(format!(
                "page holds {} items but limit is {}",
                self.data.len(),
                self.pagination.limit
            ));
        }
        for item in &self.data {
            item.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mall_common::model::{CommentStatus, Visibility};
    use mall_common::{ActorId, CommentId, InquiryId};

    fn comment(limit_body: &str) -> Comment {
        Comment {
            id: CommentId::random(),
            inquiry_id: InquiryId::random(),
            author_id: ActorId::random(),
            body: limit_body.to_string(),
            visibility: Visibility::Public,
            status: CommentStatus::Published,
            created_at: chrono_now(),
        }
    }

    fn chrono_now() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now()
    }

    #[test]
    fn ensure_eq_reports_both_operands() {
        let err = ensure_eq("count matches", &4, &2).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("count matches"));
        assert!(rendered.contains("expected 4"));
        assert!(rendered.contains("got 2"));
    }

    #[test]
    fn empty_comment_body_fails_validation() {
        assert!(assert_valid(&comment("fine")).is_ok());
        assert!(assert_valid(&comment("   ")).is_err());
    }

    #[test]
    fn page_window_checks_limit_and_arithmetic() {
        let page = Page {
            pagination: Pagination {
                current: 1,
                limit: 2,
                records: 3,
                pages: 2,
            },
            data: vec![comment("a"), comment("b")],
        };
        assert!(ensure_page_window("listing", &page).is_ok());

        let overfull = Page {
            pagination: Pagination {
                current: 1,
                limit: 1,
                records: 2,
                pages: 2,
            },
            data: vec![comment("a"), comment("b")],
        };
        assert!(ensure_page_window("listing", &overfull).is_err());
    }

    #[test]
    fn pages_cover_detects_duplicates_and_gaps() {
        let a = comment("a");
        let b = comment("b");
        let page_one = Page {
            pagination: Pagination {
                current: 1,
                limit: 1,
                records: 2,
                pages: 2,
            },
            data: vec![a.clone()],
        };
        let page_two = Page {
            pagination: Pagination {
                current: 2,
                limit: 1,
                records: 2,
                pages: 2,
            },
            data: vec![b.clone()],
        };

        let expected = vec![a.id, b.id];
        assert!(
            ensure_pages_cover("union", &[&page_one, &page_two], |c| c.id, &expected).is_ok()
        );

        // The same page twice duplicates ids.
        assert!(
            ensure_pages_cover("union", &[&page_one, &page_one], |c| c.id, &expected).is_err()
        );

        // A missing page leaves a gap.
        assert!(ensure_pages_cover("union", &[&page_one], |c| c.id, &expected).is_err());
    }
}
