//! Order Data

use crate::domain::{
    orders::{
        records::{OrderLineUuid, OrderUuid},
        status::OrderStatus,
    },
    products::records::ProductUuid,
    users::records::UserUuid,
};

/// A line as submitted by the customer, before pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// A line with its price frozen at placement time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrderLine {
    pub uuid: OrderLineUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    /// Line total: unit price multiplied by quantity.
    pub price: u64,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub status: OrderStatus,
    pub lines: Vec<PricedOrderLine>,
}
