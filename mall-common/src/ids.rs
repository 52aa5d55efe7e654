//! Newtype identifiers for remote resources.
//!
//! Every resource the backend hands out is addressed by a UUID. Wrapping
//! each one keeps a coupon id from being passed where an order id is
//! expected, which is exactly the kind of mix-up cross-actor scenarios
//! are probing for.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! resource_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Mint a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

resource_id!(
    /// Identifier of a registered actor (admin, seller, or buyer).
    ActorId
);
resource_id!(
    /// Identifier of a product listed by a seller.
    ProductId
);
resource_id!(
    /// Identifier of a buyer inquiry attached to a product.
    InquiryId
);
resource_id!(
    /// Identifier of a comment attached to an inquiry.
    CommentId
);
resource_id!(
    /// Identifier of a coupon created by an admin.
    CouponId
);
resource_id!(
    /// Identifier of a single coupon redemption record.
    CouponUseId
);
resource_id!(
    /// Identifier of a buyer order.
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_uuids() {
        let id = ProductId::random();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(ActorId::random(), ActorId::random());
    }
}
