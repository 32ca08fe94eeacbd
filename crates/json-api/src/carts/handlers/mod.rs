//! Cart Handlers

use salvo::prelude::StatusError;
use uuid::Uuid;

use bazaar_app::domain::users::records::UserUuid;

pub(crate) mod add_line;
pub(crate) mod get;
pub(crate) mod remove_line;
pub(crate) mod update_line;

/// A cart is only reachable by its owner.
fn require_own_cart(caller: UserUuid, path_user: Uuid) -> Result<UserUuid, StatusError> {
    let owner = UserUuid::from_uuid(path_user);

    if owner != caller {
        tracing::info!(user_uuid = %caller, cart_owner = %owner, "cart access denied");

        return Err(StatusError::forbidden().brief("Cart belongs to another user"));
    }

    Ok(owner)
}
