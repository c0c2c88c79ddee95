//! [`Client`] with every named XML API operation.

mod configure;
mod objects;
mod resolve;
mod templates;

use std::sync::Arc;

use ucsm_protocol::{Element, ManagedObject};
use ucsm_runtime::rpc::value_list;
use ucsm_runtime::{Endpoint, Error, Reply, Request, Result, Session, SessionInfo, Transport};

pub use configure::ImpactReport;
pub use objects::Placement;

/// A UCS Manager client.
///
/// Holds one [`Session`]. Log in before calling any operation; every
/// operation fails with [`Error::NotLoggedIn`] otherwise.
#[derive(Debug)]
pub struct Client {
	session: Session,
}

impl Client {
	/// Client over HTTP(S) to `endpoint`.
	pub fn connect(endpoint: &Endpoint) -> Result<Self> {
		Ok(Self { session: Session::connect(endpoint)? })
	}

	/// Client over a caller-supplied transport.
	pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
		Self { session: Session::new(transport) }
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	/// See [`Session::login`].
	pub async fn login(&self, name: &str, password: &str) -> Result<String> {
		self.session.login(name, password).await
	}

	/// See [`Session::refresh`].
	pub async fn refresh(&self) -> Result<String> {
		self.session.refresh().await
	}

	/// See [`Session::logout`].
	pub async fn logout(&self) -> Result<String> {
		self.session.logout().await
	}

	pub fn info(&self) -> Option<SessionInfo> {
		self.session.info()
	}

	async fn call(&self, request: Request) -> Result<Reply> {
		self.session.call(request).await
	}
}

impl From<Session> for Client {
	fn from(session: Session) -> Self {
		Self { session }
	}
}

/// `<name><tag value=.../>...</name>` from any list of strings.
fn values<S: AsRef<str>>(name: &str, tag: &str, values: &[S]) -> Element {
	value_list(name, tag, values.iter().map(AsRef::as_ref))
}

/// Unwraps an echoed object that the operation must return.
fn echoed(object: Option<ManagedObject>, method: &str, dn: &str) -> Result<ManagedObject> {
	object.ok_or_else(|| Error::fatal(format!("{method} returned no object for {dn}")))
}
