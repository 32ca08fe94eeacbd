//! User Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::require_policy,
    extensions::*,
    pagination::{PaginationResponse, page_request},
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    /// Live users, newest first
    pub users: Vec<UserResponse>,

    /// Pagination metadata
    pub pagination: PaginationResponse,
}

/// User Index Handler
///
/// Requires the `users`/`read` policy.
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Page of users"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid page request"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing users/read policy"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_uuid_or_401()?;
    let request = page_request(page, page_size)?;

    require_policy(state, caller, "users", "read").await?;

    let users = state
        .app
        .users
        .list_users(request)
        .await
        .map_err(into_status_error)?
        .map(UserResponse::from);

    Ok(Json(UsersResponse {
        pagination: PaginationResponse::from(&users),
        users: users.items,
    }))
}
