//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Line Data
///
/// Adding a product that is already in the cart increments its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Cart Line Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineUpdate {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
