// Device inventory: validated, read-only registry of managed devices.
//
// Entries arrive as raw `DeviceSpec`s from whatever configuration source
// the caller uses (the jrest-config crate loads them from YAML) and are
// validated into `Device`s exactly once, at registry construction.
// Passwords are secrecy-wrapped: Debug and Serialize both redact, and the
// raw value is only exposed at the basic-auth call site.

use secrecy::SecretString;
use serde::{Deserialize, Serialize, Serializer};
use url::Host;

use crate::error::Error;

const DEFAULT_PORT: u16 = 8080;

/// A raw inventory entry, prior to validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSpec {
    pub name: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    #[serde(default)]
    pub ssl: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// A validated managed device.
///
/// Immutable after load; owned by the [`Registry`] for the process
/// lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub name: String,
    #[serde(serialize_with = "serialize_host")]
    pub host: Host<String>,
    pub port: u16,
    pub username: String,
    #[serde(serialize_with = "serialize_redacted")]
    pub password: SecretString,
    pub ssl: bool,
}

fn serialize_host<S: Serializer>(host: &Host<String>, ser: S) -> Result<S::Ok, S::Error> {
    ser.collect_str(host)
}

// The password never leaves the process in plaintext.
fn serialize_redacted<S: Serializer>(_: &SecretString, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str("<redacted>")
}

impl Device {
    /// Validate a raw entry into a `Device`.
    pub fn from_spec(spec: DeviceSpec) -> Result<Self, Error> {
        if spec.name.trim().is_empty() {
            return Err(Error::InvalidDevice {
                name: spec.name,
                field: "name",
                reason: "must be a non-empty string".into(),
            });
        }
        if spec.username.trim().is_empty() {
            return Err(Error::InvalidDevice {
                name: spec.name,
                field: "username",
                reason: "must be a non-empty string".into(),
            });
        }

        let host = Host::parse(&spec.host).map_err(|e| {
            // The scheme comes from the `ssl` flag, not the host string.
            let reason = if spec.host.contains("://") {
                format!(
                    "'{}' includes a URL scheme; give a bare IP address or hostname \
                     and set `ssl: true` for https",
                    spec.host
                )
            } else {
                format!("'{}' is not an IP address or hostname: {e}", spec.host)
            };
            Error::InvalidDevice {
                name: spec.name.clone(),
                field: "host",
                reason,
            }
        })?;

        Ok(Self {
            name: spec.name,
            host,
            port: spec.port,
            username: spec.username,
            password: spec.password,
            ssl: spec.ssl,
        })
    }

    /// The HTTP(S) base URL for this device's management endpoint.
    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

/// The validated, read-only collection of configured devices.
///
/// Ordered as loaded; names are unique within a load. Loaded once at
/// startup and passed by reference into the action layer.
#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    devices: Vec<Device>,
}

impl Registry {
    /// Validate raw entries into a registry.
    ///
    /// Duplicate device names are a configuration error and are rejected
    /// here, at load time, not at lookup time.
    pub fn from_entries(entries: Vec<DeviceSpec>) -> Result<Self, Error> {
        let mut devices = Vec::with_capacity(entries.len());
        let mut seen = std::collections::HashSet::new();

        for spec in entries {
            let device = Device::from_spec(spec)?;
            if !seen.insert(device.name.clone()) {
                return Err(Error::DuplicateDevice { name: device.name });
            }
            devices.push(device);
        }

        Ok(Self { devices })
    }

    /// Exact, case-sensitive lookup by device name.
    pub fn find(&self, name: &str) -> Result<&Device, Error> {
        self.devices
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::DeviceNotFound { name: name.into() })
    }

    /// All configured devices, in load order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
