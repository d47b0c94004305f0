// Shared transport configuration for building reqwest::Client instances.
//
// Every connection speaks the same dialect: XML content type, basic auth
// supplied per request, and certificate verification disabled -- the
// management daemon ships with a self-signed certificate and the wire
// contract does not include trust negotiation.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::Error;

/// Transport settings shared by every device session.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("jrest/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(true)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}
