//! Policy checks for handlers.

use bazaar_app::domain::users::records::UserUuid;
use salvo::prelude::StatusError;
use tracing::info;

use crate::{extensions::*, state::State};

/// Resolve to `Ok` only when `caller` holds `(resource, action)`.
pub(crate) async fn require_policy(
    state: &State,
    caller: UserUuid,
    resource: &str,
    action: &str,
) -> Result<(), StatusError> {
    let allowed = state
        .app
        .enforcer
        .allowed(caller, resource, action)
        .await
        .or_500("failed to evaluate policy")?;

    if !allowed {
        info!(user_uuid = %caller, resource, action, "policy denied");

        return Err(StatusError::forbidden());
    }

    Ok(())
}

/// Owners pass without a policy lookup; anyone else needs `(resource, action)`.
pub(crate) async fn require_owner_or_policy(
    state: &State,
    caller: UserUuid,
    owner: UserUuid,
    resource: &str,
    action: &str,
) -> Result<(), StatusError> {
    if caller == owner {
        return Ok(());
    }

    require_policy(state, caller, resource, action).await
}
