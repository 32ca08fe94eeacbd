use clap::{Args, Subcommand};

mod grant;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct PolicyCommand {
    #[command(subcommand)]
    command: PolicySubcommand,
}

#[derive(Debug, Subcommand)]
enum PolicySubcommand {
    Grant(PolicyArgs),
    Revoke(PolicyArgs),
}

/// A `(subject, resource, action)` grant.
#[derive(Debug, Args)]
pub(crate) struct PolicyArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User UUID the grant applies to
    #[arg(long)]
    user_uuid: uuid::Uuid,

    /// Resource name, e.g. `products`
    #[arg(long)]
    resource: String,

    /// Action name, e.g. `write`
    #[arg(long)]
    action: String,
}

pub(crate) async fn run(command: PolicyCommand) -> Result<(), String> {
    match command.command {
        PolicySubcommand::Grant(args) => grant::run(args).await,
        PolicySubcommand::Revoke(args) => revoke::run(args).await,
    }
}
