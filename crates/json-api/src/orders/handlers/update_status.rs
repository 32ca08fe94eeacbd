//! Update Order Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    observability::record_order_transition,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Update Order Status Handler
///
/// Moves one of the caller's orders to `status`. Allowed moves are
/// `pending -> processing | done | canceled` and
/// `processing -> done | canceled`.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, status, depot),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        requested_status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    status: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = order.into_inner();
    let status = status.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(order));
    span.record("requested_status", status.as_str());

    let change = state
        .app
        .orders
        .update_status(order.into(), user, &status)
        .await
        .map_err(into_status_error)?;

    record_order_transition(change.previous, change.order.status);

    tracing::info!(
        order_uuid = %order,
        from = %change.previous,
        to = %change.order.status,
        "updated order status"
    );

    Ok(Json(change.order.into()))
}
