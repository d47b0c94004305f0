//! Supported interactions with managed devices.
//!
//! Each action is one complete pipeline pass: resolve the device from
//! the registry, build the wire payload, open a fresh connection, send,
//! close, and return the normalized outcome. No retries anywhere --
//! every failure is surfaced to the caller immediately.

use serde_json::Value;
use tracing::debug;

use crate::connection::Connection;
use crate::envelope;
use crate::error::Error;
use crate::inventory::Registry;
use crate::parser::Outcome;

/// Push a new configuration to a device and commit it.
pub async fn set_config(
    registry: &Registry,
    device_name: &str,
    config: &Value,
) -> Result<Outcome, Error> {
    let device = registry.find(device_name)?;
    let payload = envelope::build_config(config)?;

    let conn = Connection::open(device).await?;

    // Surface the running configuration for anyone tailing debug logs.
    // The result is discarded, and a fetch failure must not mask an
    // otherwise pushable config.
    match conn
        .get("/rpc/get-configuration", Some(&[("format", "json")]))
        .await
    {
        Ok(current) => debug!(device = device_name, ?current, "current configuration"),
        Err(e) => debug!(device = device_name, error = %e, "could not fetch current configuration"),
    }

    let result = conn.post(envelope::RPC_POST, None, &payload).await;
    conn.close()?;
    result
}

/// Run a commit check: validate the candidate configuration without
/// applying anything.
pub async fn commit_check(registry: &Registry, device_name: &str) -> Result<Outcome, Error> {
    let device = registry.find(device_name)?;
    let conn = Connection::open(device).await?;

    let result = conn
        .post(envelope::RPC_POST, None, &envelope::commit_check_body())
        .await;
    conn.close()?;
    result
}
