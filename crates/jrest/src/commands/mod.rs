//! Command dispatch: bridges CLI args -> action layer -> output.

pub mod configure;
pub mod devices;

use jrest_api::Registry;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an inventory-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    registry: &Registry,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Configure(args) => configure::handle(registry, args, global).await,
        Command::Check(args) => configure::handle_check(registry, args, global).await,
        Command::List => devices::handle(registry, global),
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}

/// Emit an API error at its severity tier, then convert it for the CLI.
pub(crate) fn api_err(err: jrest_api::Error) -> CliError {
    err.emit();
    err.into()
}
