// jrest-api: async client for the Junos XML-over-HTTP management interface.
//
// The pipeline is: resolve a device from the inventory, wrap a JSON
// configuration in the XML commit envelope, push it over a per-call HTTP
// session, and normalize the device's namespaced XML reply into a flat
// success/fail/error outcome.

pub mod actions;
pub mod connection;
pub mod envelope;
pub mod error;
pub mod inventory;
pub mod parser;
pub mod transport;
pub mod xml;

pub use connection::Connection;
pub use error::Error;
pub use inventory::{Device, DeviceSpec, Registry};
pub use parser::Outcome;
