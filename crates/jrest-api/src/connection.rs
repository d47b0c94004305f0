// Per-call HTTP session against one device.
//
// Lifecycle is unopened -> open -> closed. `open` proves TCP
// reachability before any HTTP is issued, so an unresolvable or dead
// host surfaces as a 502-class error rather than a transport failure
// mid-request. A connection is owned by exactly one action invocation
// and is never reused.

use std::net::IpAddr;

use secrecy::ExposeSecret;
use tokio::net::TcpStream;
use tracing::debug;
use url::Host;

use crate::error::Error;
use crate::inventory::Device;
use crate::parser::{self, Outcome};
use crate::transport::TransportConfig;

/// Query parameters for a request.
pub type Params<'a> = &'a [(&'a str, &'a str)];

/// A live HTTP session bound to one device.
#[derive(Debug)]
pub struct Connection {
    device: Device,
    http: reqwest::Client,
}

impl Connection {
    /// Open a session to a device.
    ///
    /// Probes `host:port` over raw TCP first; only when the device is
    /// reachable is the HTTP session constructed (insecure TLS, XML
    /// content type, basic auth applied per request).
    pub async fn open(device: &Device) -> Result<Self, Error> {
        probe_reachability(device).await?;
        debug!(device = %device.name, "device is reachable");

        let http = TransportConfig::default().build_client()?;
        debug!(host = %device.host, "opened session");

        Ok(Self {
            device: device.clone(),
            http,
        })
    }

    /// The device this session is bound to.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Perform an HTTP GET and parse the response.
    pub async fn get(&self, endpoint: &str, params: Option<Params<'_>>) -> Result<Outcome, Error> {
        let url = self.url(endpoint);
        debug!("GET {url}");

        let mut request = self.http.get(&url).basic_auth(
            &self.device.username,
            Some(self.device.password.expose_secret()),
        );
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await.map_err(Error::Transport)?;
        Self::handle(response).await
    }

    /// Perform an HTTP POST with an XML body and parse the response.
    pub async fn post(
        &self,
        endpoint: &str,
        params: Option<Params<'_>>,
        body: &str,
    ) -> Result<Outcome, Error> {
        let url = self.url(endpoint);
        debug!("POST {url}");

        let mut request = self
            .http
            .post(&url)
            .basic_auth(
                &self.device.username,
                Some(self.device.password.expose_secret()),
            )
            .body(body.to_owned());
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await.map_err(Error::Transport)?;
        Self::handle(response).await
    }

    /// Close the session.
    ///
    /// Consuming `self` is the release point: dropping the client tears
    /// down the underlying pool, and the move makes use-after-close
    /// unrepresentable.
    pub fn close(self) -> Result<(), Error> {
        debug!(host = %self.device.host, "closed session");
        Ok(())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.device.base_url())
    }

    /// Map a non-200 status to a structured error; hand 200 bodies to
    /// the response parser.
    async fn handle(response: reqwest::Response) -> Result<Outcome, Error> {
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            return Err(Error::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_owned(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await.map_err(Error::Transport)?;
        parser::parse(&body, status.as_u16())
    }
}

/// Verify the target host and port are reachable and open.
///
/// Resolution and connect failures are both a 502-class error; the probe
/// connection is released immediately on success.
async fn probe_reachability(device: &Device) -> Result<(), Error> {
    let attempt = match &device.host {
        Host::Ipv4(ip) => TcpStream::connect((IpAddr::from(*ip), device.port)).await,
        Host::Ipv6(ip) => TcpStream::connect((IpAddr::from(*ip), device.port)).await,
        Host::Domain(name) => TcpStream::connect((name.as_str(), device.port)).await,
    };

    match attempt {
        Ok(stream) => {
            drop(stream);
            Ok(())
        }
        Err(_) => Err(Error::Unreachable {
            host: device.host.to_string(),
            port: device.port,
        }),
    }
}
