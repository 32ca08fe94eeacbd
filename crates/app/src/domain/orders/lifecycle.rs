//! Order lifecycle guard.
//!
//! Decides whether a requester may move an order to a requested status. The
//! checks run in a fixed order so callers always see the same error for the
//! same situation: ownership, then terminal status, then parsing, then the
//! adjacency table on [`OrderStatus`].

use crate::domain::{
    orders::{errors::OrdersServiceError, records::Order, status::OrderStatus},
    users::records::UserUuid,
};

/// A transition that passed every guard and is ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Validate a status change request against the current order.
///
/// # Errors
///
/// - [`OrdersServiceError::PermissionDenied`] when `requester` does not own the order.
/// - [`OrdersServiceError::TerminalStatus`] when the order is `done` or `canceled`.
/// - [`OrdersServiceError::UnknownStatus`] when `requested` is not a status name.
/// - [`OrdersServiceError::IllegalTransition`] when the adjacency table forbids the move.
pub fn plan_transition(
    order: &Order,
    requester: UserUuid,
    requested: &str,
) -> Result<Transition, OrdersServiceError> {
    if order.user_uuid != requester {
        return Err(OrdersServiceError::PermissionDenied);
    }

    if order.status.is_terminal() {
        return Err(OrdersServiceError::TerminalStatus);
    }

    let target = requested
        .parse::<OrderStatus>()
        .map_err(|_| OrdersServiceError::UnknownStatus)?;

    if !order.status.can_transition_to(target) {
        return Err(OrdersServiceError::IllegalTransition);
    }

    Ok(Transition {
        from: order.status,
        to: target,
    })
}
