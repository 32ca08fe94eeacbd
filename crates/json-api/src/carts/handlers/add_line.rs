//! Add Cart Line Handler

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

use bazaar_app::domain::carts::data::NewCartLine;

use crate::{
    carts::{errors::into_status_error, get::CartLineResponse},
    extensions::*,
    state::State,
};

use super::require_own_cart;

/// Add Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartLineRequest {
    pub product_uuid: Uuid,

    /// Units to add; added to any quantity already in the cart
    pub quantity: u32,
}

impl From<AddCartLineRequest> for NewCartLine {
    fn from(request: AddCartLineRequest) -> Self {
        NewCartLine {
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Line Handler
#[endpoint(
    tags("carts"),
    summary = "Add Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Line added or incremented"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product or bad quantity"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
    ),
)]
#[tracing::instrument(
    name = "carts.add_line",
    skip(user, json, depot, res),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<AddCartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = require_own_cart(depot.user_uuid_or_401()?, user.into_inner())?;
    let line: NewCartLine = json.into_inner().into();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(line.product_uuid));

    let line = state
        .app
        .carts
        .add_line(user, line)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    tracing::info!(quantity = line.quantity, "added cart line");

    Ok(Json(line.into()))
}
