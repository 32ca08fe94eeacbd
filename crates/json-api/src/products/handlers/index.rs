//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PaginationResponse, page_request},
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products, newest first
    pub products: Vec<ProductResponse>,

    /// Pagination metadata
    pub pagination: PaginationResponse,
}

/// Product Index Handler
///
/// Returns a page of products that have not been deleted.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = page_request(page, page_size)?;

    let products = state
        .app
        .products
        .list_products(request)
        .await
        .map_err(into_status_error)?;

    let products = products.map(ProductResponse::from);

    Ok(Json(ProductsResponse {
        pagination: PaginationResponse::from(&products),
        products: products.items,
    }))
}
