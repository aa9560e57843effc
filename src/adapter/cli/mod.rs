//! CLI module graph and dispatch.

pub mod command;
pub mod optimize;
pub mod output;

use crate::config::Config;
use crate::error::Result;

pub use command::{Cli, Commands};

/// Dispatch a parsed CLI invocation. Returns `true` on success.
pub async fn dispatch(cli: &Cli, config: &Config) -> Result<bool> {
    match &cli.command {
        Commands::Optimize(args) => optimize::run_optimize(args, config, cli.json).await,
        Commands::Validate(args) => optimize::run_validate(args, cli.json),
    }
}
