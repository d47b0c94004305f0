use thiserror::Error;

/// Top-level error type for the `jrest-api` crate.
///
/// Every failure mode in the pipeline -- inventory validation, device
/// lookup, reachability, HTTP transport, and XML shape mismatches -- is
/// normalized into this one type before it crosses the action-layer
/// boundary. Each variant carries an HTTP-style status in the 400-599
/// range via [`Error::status`], which also drives log severity.
#[derive(Debug, Error)]
pub enum Error {
    // ── Inventory ───────────────────────────────────────────────────
    /// No configured device matches the requested name.
    #[error("no configured device matches '{name}'")]
    DeviceNotFound { name: String },

    /// Two inventory entries share a name.
    #[error("duplicate device name '{name}' in inventory")]
    DuplicateDevice { name: String },

    /// An inventory entry failed validation.
    #[error("invalid device '{name}': {field} {reason}")]
    InvalidDevice {
        name: String,
        field: &'static str,
        reason: String,
    },

    // ── Request construction ────────────────────────────────────────
    /// The caller-supplied configuration payload is unusable.
    #[error("invalid configuration payload: {reason}")]
    InvalidPayload { reason: String },

    // ── Connection / transport ──────────────────────────────────────
    /// The reachability probe failed before any HTTP was attempted.
    #[error("{host}:{port} is unreachable or unresolvable")]
    Unreachable { host: String, port: u16 },

    /// The device answered with a non-200 HTTP status.
    #[error("{reason} - {url}")]
    Http {
        status: u16,
        reason: String,
        url: String,
    },

    /// HTTP transport failure (timeout, connection reset, DNS, TLS).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Response parsing ────────────────────────────────────────────
    /// The device response could not be parsed as XML.
    #[error("unparseable device response: {message}")]
    UnexpectedResponse { message: String },
}

impl Error {
    /// The HTTP-style status code for this failure, always in 400-599.
    pub fn status(&self) -> u16 {
        match self {
            Self::DeviceNotFound { .. } => 404,
            Self::DuplicateDevice { .. }
            | Self::InvalidDevice { .. }
            | Self::InvalidPayload { .. } => 400,
            Self::Unreachable { .. } => 502,
            Self::Http { status, .. } => *status,
            Self::Transport(_) | Self::UnexpectedResponse { .. } => 500,
        }
    }

    /// Returns `true` for client/usage faults (4xx).
    pub fn is_client_fault(&self) -> bool {
        (400..500).contains(&self.status())
    }

    /// Log this error once at the severity tier for its status range.
    ///
    /// 4xx are usage faults (warn), 5xx are transport/infrastructure
    /// faults (error). Called at the boundary where the error becomes
    /// user-visible, not at construction time.
    pub fn emit(&self) {
        let status = self.status();
        match status {
            400..=499 => tracing::warn!(status, "{self}"),
            500..=599 => tracing::error!(status, "{self}"),
            _ => tracing::info!(status, "{self}"),
        }
    }
}
