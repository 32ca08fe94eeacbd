//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        orders::status::OrderStatus,
        products::records::{ProductRecord, ProductUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLine>;

/// Order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    /// Owner; never changes once the order exists.
    pub user_uuid: UserUuid,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Line
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub uuid: OrderLineUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    /// Frozen line total in minor currency units.
    pub price: u64,
    /// Live product detail, attached on read and never stored.
    pub product: Option<ProductRecord>,
    pub created_at: Timestamp,
}

/// An order as it stands after a committed status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub order: Order,
    /// Status the order held immediately before the change.
    pub previous: OrderStatus,
}
