//! Cart Records

use jiff::Timestamp;

use crate::domain::{
    products::records::{ProductRecord, ProductUuid},
    users::records::UserUuid,
};

/// Cart Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart line with the live product attached for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    /// `None` when the product has since been deleted.
    pub product: Option<ProductRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartLine {
    #[must_use]
    pub fn from_record(record: CartLineRecord, product: Option<ProductRecord>) -> Self {
        Self {
            product_uuid: record.product_uuid,
            quantity: record.quantity,
            product,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A user's cart: the set of their cart lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub user_uuid: UserUuid,
    pub lines: Vec<CartLine>,
}
