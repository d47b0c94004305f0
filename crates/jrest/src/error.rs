//! CLI error types with miette diagnostics.
//!
//! Maps `jrest_api::Error` status classes and `ConfigError` variants
//! into user-facing errors with actionable help text and exit codes.

use miette::Diagnostic;
use thiserror::Error;

use jrest_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────
    #[error("invalid JSON configuration: {reason}")]
    #[diagnostic(
        code(jrest::invalid_json),
        help("The -c/--config value (or --file contents) must be a JSON object.")
    )]
    InvalidJson { reason: String },

    #[error("no configuration given")]
    #[diagnostic(
        code(jrest::no_config_payload),
        help("Pass the configuration with -c '<json>' or --file <path>.")
    )]
    MissingPayload,

    #[error("invalid request: {message}")]
    #[diagnostic(code(jrest::validation))]
    Validation { message: String },

    // ── Devices ──────────────────────────────────────────────────────
    #[error("device '{name}' not found in inventory")]
    #[diagnostic(
        code(jrest::device_not_found),
        help("Run: jrest list to see configured devices")
    )]
    DeviceNotFound { name: String },

    #[error("cannot reach device: {message}")]
    #[diagnostic(
        code(jrest::unreachable),
        help("Check that the device's management interface is up and the host/port are correct.")
    )]
    Connection { message: String },

    #[error("device interaction failed (HTTP {status}): {message}")]
    #[diagnostic(code(jrest::api_error))]
    Api { message: String, status: u16 },

    /// The device answered, but the result status was `fail` or `error`.
    /// The rendered outcome has already been printed by this point.
    #[error("device returned status '{status}'")]
    #[diagnostic(code(jrest::push_rejected))]
    Rejected { status: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(jrest::inventory),
        help("Create an inventory file or point at one with --inventory / JREST_INVENTORY.")
    )]
    Config(#[from] ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidJson { .. } | Self::MissingPayload | Self::Validation { .. } => {
                exit_code::USAGE
            }
            Self::DeviceNotFound { .. } => exit_code::NOT_FOUND,
            Self::Connection { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── jrest_api::Error → CliError mapping ──────────────────────────────

impl From<jrest_api::Error> for CliError {
    fn from(err: jrest_api::Error) -> Self {
        use jrest_api::Error;

        match err {
            Error::DeviceNotFound { name } => Self::DeviceNotFound { name },

            Error::Unreachable { .. } => Self::Connection {
                message: err.to_string(),
            },

            Error::Transport(_) => Self::Connection {
                message: err.to_string(),
            },

            Error::InvalidPayload { reason } => Self::InvalidJson { reason },

            Error::DuplicateDevice { .. } | Error::InvalidDevice { .. } => Self::Validation {
                message: err.to_string(),
            },

            Error::Http { .. } | Error::UnexpectedResponse { .. } => Self::Api {
                status: err.status(),
                message: err.to_string(),
            },
        }
    }
}
