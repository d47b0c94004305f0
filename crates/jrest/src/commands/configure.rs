//! Configuration push and commit-check handlers.

use jrest_api::{Outcome, Registry, actions};

use crate::cli::{CheckArgs, ConfigureArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::api_err;

/// `jrest configure -d <device> -c <json> | --file <path>`
pub async fn handle(
    registry: &Registry,
    args: ConfigureArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let raw = match (args.config, args.file) {
        (Some(text), None) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        _ => return Err(CliError::MissingPayload),
    };

    let config: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| CliError::InvalidJson {
            reason: e.to_string(),
        })?;

    let outcome = actions::set_config(registry, &args.device, &config)
        .await
        .map_err(api_err)?;

    finish(&outcome, global)
}

/// `jrest check -d <device>`
pub async fn handle_check(
    registry: &Registry,
    args: CheckArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let outcome = actions::commit_check(registry, &args.device)
        .await
        .map_err(api_err)?;

    finish(&outcome, global)
}

/// Print the outcome; non-success statuses terminate with an error so
/// the process exits non-zero.
fn finish(outcome: &Outcome, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    output::print_output(&output::render_outcome(&global.output, outcome, color), global.quiet);

    match outcome {
        Outcome::Success { .. } => Ok(()),
        Outcome::Fail { .. } => Err(CliError::Rejected {
            status: "fail".into(),
        }),
        Outcome::Error { .. } => Err(CliError::Rejected {
            status: "error".into(),
        }),
    }
}
