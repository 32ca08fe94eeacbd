use clap::{Parser, Subcommand};
use sqlx::PgPool;

mod db;
mod policy;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "bazaar-app", about = "Bazaar CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Token(token::TokenCommand),
    Policy(policy::PolicyCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Policy(command) => policy::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<PgPool, String> {
    bazaar_app::database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
