use clap::{Args, Subcommand};

mod setup;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply migrations and seed the catalog when it is empty
    Setup(setup::SetupArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Setup(args) => setup::run(args).await,
    }
}
