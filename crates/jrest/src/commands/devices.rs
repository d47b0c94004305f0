//! Device inventory listing.

use jrest_api::Registry;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// `jrest list`
pub fn handle(registry: &Registry, global: &GlobalOpts) -> Result<(), CliError> {
    output::print_output(
        &output::render_devices(&global.output, registry.devices()),
        global.quiet,
    );
    Ok(())
}
