//! HTTP transport to the manager's XML API endpoint.
//!
//! Every call is one POST of an XML document to `/nuova`; the reply body is
//! returned as text. [`Transport`] is the seam between the session and the
//! network so tests can script replies without a manager.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use ucsm_protocol::wire::ENDPOINT_PATH;

use crate::error::{Error, Result};

/// Boxed future returned by [`Transport::post`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Sends one request document and returns the reply body.
pub trait Transport: Send + Sync {
	fn post(&self, body: String) -> TransportFuture<'_>;
}

/// Where and how to reach a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
	host: String,
	port: Option<u16>,
	secure: bool,
	accept_invalid_certs: bool,
	timeout: Option<Duration>,
}

impl Endpoint {
	/// Plain HTTP on the default port.
	pub fn new(host: impl Into<String>) -> Self {
		Self { host: host.into(), port: None, secure: false, accept_invalid_certs: false, timeout: None }
	}

	pub fn port(mut self, port: u16) -> Self {
		self.port = Some(port);
		self
	}

	/// Use HTTPS instead of HTTP.
	pub fn secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	/// Skip certificate validation. Managers ship self-signed certificates.
	pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
		self.accept_invalid_certs = accept;
		self
	}

	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	pub fn is_secure(&self) -> bool {
		self.secure
	}

	/// Full URL of the API endpoint.
	pub fn url(&self) -> String {
		let scheme = if self.secure { "https" } else { "http" };
		let host = if self.host.contains(':') && !self.host.starts_with('[') {
			format!("[{}]", self.host)
		} else {
			self.host.clone()
		};
		match self.port {
			Some(port) => format!("{scheme}://{host}:{port}{ENDPOINT_PATH}"),
			None => format!("{scheme}://{host}{ENDPOINT_PATH}"),
		}
	}
}

/// [`Transport`] over reqwest.
///
/// Idle connections are never kept, so each call opens and releases its own
/// connection.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	url: String,
}

impl HttpTransport {
	pub fn new(endpoint: &Endpoint) -> Result<Self> {
		let mut builder = reqwest::Client::builder()
			.pool_max_idle_per_host(0)
			.danger_accept_invalid_certs(endpoint.accept_invalid_certs);
		if let Some(timeout) = endpoint.timeout {
			builder = builder.timeout(timeout);
		}
		let client = builder
			.build()
			.map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;
		Ok(Self { client, url: endpoint.url() })
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

impl Transport for HttpTransport {
	fn post(&self, body: String) -> TransportFuture<'_> {
		Box::pin(async move {
			let response = self
				.client
				.post(&self.url)
				.header(CONTENT_TYPE, "text/xml")
				.body(body)
				.send()
				.await
				.map_err(|e| Error::Transport(format!("POST {} failed: {}", self.url, e)))?;

			let status = response.status();
			if !status.is_success() {
				return Err(Error::Transport(format!("unexpected status {} from {}", status, self.url)));
			}

			response
				.text()
				.await
				.map_err(|e| Error::Transport(format!("Failed to read reply body: {}", e)))
		})
	}
}
