//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    auth::require_policy, extensions::*, state::State, users::errors::into_status_error,
};

/// Delete User Handler
///
/// Soft-deletes the user. Requires the `users`/`delete` policy, including
/// for callers deleting themselves.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing users/delete policy"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "users.delete",
    skip(user, depot),
    fields(caller_uuid = tracing::field::Empty, user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_uuid_or_401()?;
    let user = user.into_inner();

    let span = tracing::Span::current();

    span.record("caller_uuid", tracing::field::display(caller));
    span.record("user_uuid", tracing::field::display(user));

    require_policy(state, caller, "users", "delete").await?;

    state
        .app
        .users
        .delete_user(user.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!("deleted user");

    Ok(StatusCode::OK)
}
