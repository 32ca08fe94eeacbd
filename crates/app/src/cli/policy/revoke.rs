use bazaar_app::{auth::PgEnforcer, domain::users::records::UserUuid};

use super::PolicyArgs;

pub(crate) async fn run(args: PolicyArgs) -> Result<(), String> {
    let pool = crate::cli::connect(&args.database_url).await?;

    let revoked = PgEnforcer::new(pool)
        .revoke(
            UserUuid::from_uuid(args.user_uuid),
            &args.resource,
            &args.action,
        )
        .await
        .map_err(|error| format!("failed to revoke policy: {error}"))?;

    if revoked {
        println!(
            "revoked {}:{} from {}",
            args.resource, args.action, args.user_uuid
        );
    } else {
        println!(
            "{} had no {}:{} grant",
            args.user_uuid, args.resource, args.action
        );
    }

    Ok(())
}
