//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`health`].

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::ProxyError;

pub async fn dispatch(cli: Cli) -> Result<(), ProxyError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  clash-proxy v{version} \u{2014} Clash Royale API proxy\n\n  \
         No command provided. To get started:\n\n    \
         clash-proxy run                   Start the proxy (reads CLASH_API_KEY)\n    \
         clash-proxy health                Check a running instance\n    \
         clash-proxy --help                See all commands and options\n"
    );
}
