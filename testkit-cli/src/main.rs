//! Testkit CLI - Command-line interface for driver adapter test environments.

use clap::Parser;

use testkit_cli::cli::{Cli, Command};
use testkit_cli::commands;
use testkit_cli::error::{CliError, CliResult};
use testkit_cli::logging;
use testkit_cli::output;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        output::error(&e.to_string());
        // `check` lists violations in its own report
        if let CliError::Env(err) = &e {
            commands::check::print_violations(err);
        }
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => commands::check::run(args).await,
        Command::Export(args) => commands::export::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
