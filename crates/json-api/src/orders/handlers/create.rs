//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::orders::data::NewOrderLine;

use crate::{
    extensions::*,
    observability::record_order_placed,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Lines to order; prices are taken from the catalog at placement time
    pub lines: Vec<CreateOrderLineRequest>,
}

/// Requested order line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderLineRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
}

impl From<CreateOrderLineRequest> for NewOrderLine {
    fn from(line: CreateOrderLineRequest) -> Self {
        NewOrderLine {
            product_uuid: line.product_uuid.into(),
            quantity: line.quantity,
        }
    }
}

/// Place Order Handler
///
/// Prices each line against the current catalog and stores a `pending` order
/// for the caller.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::NOT_FOUND, description = "A product does not exist"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        line_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let lines: Vec<NewOrderLine> = json.into_inner().lines.into_iter().map(Into::into).collect();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("line_count", lines.len());

    let order = state
        .app
        .orders
        .place_order(user, lines)
        .await
        .map_err(into_status_error)?;

    let uuid = order.uuid;

    span.record("order_uuid", tracing::field::display(uuid));

    res.add_header(LOCATION, format!("/orders/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    record_order_placed();

    tracing::info!(order_uuid = %uuid, user_uuid = %user, "placed order");

    Ok(Json(order.into()))
}
