use bazaar_app::{auth::PgEnforcer, domain::users::records::UserUuid};

use super::PolicyArgs;

pub(crate) async fn run(args: PolicyArgs) -> Result<(), String> {
    let pool = crate::cli::connect(&args.database_url).await?;

    PgEnforcer::new(pool)
        .grant(
            UserUuid::from_uuid(args.user_uuid),
            &args.resource,
            &args.action,
        )
        .await
        .map_err(|error| format!("failed to grant policy: {error}"))?;

    println!(
        "granted {}:{} to {}",
        args.resource, args.action, args.user_uuid
    );

    Ok(())
}
