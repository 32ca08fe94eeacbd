//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

use super::require_own_cart;

/// Remove Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartLineRequest {
    pub product_uuid: Uuid,
}

/// Remove Cart Line Handler
///
/// Removing a product that is not in the cart succeeds.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line removed"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<RemoveCartLineRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = require_own_cart(depot.user_uuid_or_401()?, user.into_inner())?;
    let product = json.into_inner().product_uuid;

    state
        .app
        .carts
        .remove_line(user, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
