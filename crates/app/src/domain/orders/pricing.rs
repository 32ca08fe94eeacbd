//! Pricing snapshot.

use crate::domain::{
    orders::{
        data::{NewOrderLine, PricedOrderLine},
        errors::OrdersServiceError,
        records::OrderLineUuid,
    },
    products::records::ProductRecord,
};

/// Reject empty orders and non-positive quantities.
///
/// # Errors
///
/// Returns [`OrdersServiceError::InvalidData`] when the request cannot be placed.
pub fn validate_lines(lines: &[NewOrderLine]) -> Result<(), OrdersServiceError> {
    if lines.is_empty() || lines.iter().any(|line| line.quantity == 0) {
        return Err(OrdersServiceError::InvalidData);
    }

    Ok(())
}

/// Freeze a line's price from the product's current unit price.
///
/// # Errors
///
/// Returns [`OrdersServiceError::InvalidData`] if the line total overflows.
pub fn price_line(
    line: &NewOrderLine,
    product: &ProductRecord,
) -> Result<PricedOrderLine, OrdersServiceError> {
    let price = product
        .price
        .checked_mul(u64::from(line.quantity))
        .ok_or(OrdersServiceError::InvalidData)?;

    Ok(PricedOrderLine {
        uuid: OrderLineUuid::new(),
        product_uuid: line.product_uuid,
        quantity: line.quantity,
        price,
    })
}
