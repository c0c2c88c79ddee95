//! Authenticated session with a manager.
//!
//! [`Session::login`] obtains a cookie and arms a background task that
//! refreshes it at half the server-declared refresh period. Every other call
//! goes through [`Session::call`], which stamps the current cookie on the
//! request and classifies the reply.
//!
//! The cookie is the only state shared with the background task. It lives
//! behind a lock that is never held across an `.await`; readers always see a
//! single consistent cookie and the latest write wins.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::{Serialize, Serializer};
use ucsm_protocol::wire::{attr, method};

use crate::error::{Error, Result};
use crate::refresh::RefreshTask;
use crate::rpc::{Reply, Request};
use crate::transport::{Endpoint, HttpTransport, Transport};

/// What the manager granted at login, updated by each refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
	#[serde(serialize_with = "serialize_secs")]
	refresh_period: Duration,
	privileges: Vec<String>,
	version: String,
	session_id: String,
}

impl SessionInfo {
	/// Server-declared cookie lifetime. Refresh runs at half of it.
	pub fn refresh_period(&self) -> Duration {
		self.refresh_period
	}

	pub fn privileges(&self) -> &[String] {
		&self.privileges
	}

	/// Manager software version, e.g. `4.2(1d)`.
	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn session_id(&self) -> &str {
		&self.session_id
	}
}

fn serialize_secs<S: Serializer>(period: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	serializer.serialize_f64(period.as_secs_f64())
}

#[derive(Clone)]
struct Credentials {
	name: String,
	password: String,
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials").field("name", &self.name).field("password", &"<redacted>").finish()
	}
}

#[derive(Debug, Default)]
struct State {
	cookie: Option<String>,
	credentials: Option<Credentials>,
	info: Option<SessionInfo>,
	/// Advanced by every login and logout. Refreshes store their grant
	/// only if it is unchanged since they were sent.
	generation: u64,
}

impl State {
	/// Empty state for the next login or logout.
	fn reset(&mut self) -> State {
		let generation = self.generation.wrapping_add(1);
		std::mem::replace(self, State { generation, ..State::default() })
	}
}

/// Cookie, refresh period, and privileges from an `aaaLogin` or
/// `aaaRefresh` reply.
struct Grant {
	cookie: String,
	refresh_period: Duration,
	privileges: Vec<String>,
	version: Option<String>,
	session_id: Option<String>,
}

impl Grant {
	fn from_reply(reply: &Reply) -> Result<Self> {
		reply.expect_response()?;
		let cookie = reply.required_attr(attr::OUT_COOKIE)?.to_owned();
		let refresh_period = parse_period(reply.required_attr(attr::OUT_REFRESH_PERIOD)?)?;
		let privileges = reply
			.required_attr(attr::OUT_PRIV)?
			.split(',')
			.map(str::trim)
			.filter(|p| !p.is_empty())
			.map(str::to_owned)
			.collect();
		Ok(Self {
			cookie,
			refresh_period,
			privileges,
			version: reply.atom().attribute(attr::OUT_VERSION).map(str::to_owned),
			session_id: reply.atom().attribute(attr::OUT_SESSION_ID).map(str::to_owned),
		})
	}
}

fn parse_period(value: &str) -> Result<Duration> {
	value
		.trim()
		.parse::<f64>()
		.ok()
		.and_then(|secs| Duration::try_from_secs_f64(secs).ok())
		.ok_or_else(|| Error::fatal(format!("Wrong reply syntax: outRefreshPeriod {:?}", value)))
}

/// Shared core of a session, reachable from the refresh task.
pub(crate) struct Inner {
	transport: Arc<dyn Transport>,
	state: RwLock<State>,
}

impl Inner {
	/// Sends `request` and classifies the reply. Bodies of requests that
	/// carry a password are never logged.
	async fn post(&self, request: &Request) -> Result<Reply> {
		let body = request.to_xml();
		tracing::debug!(method = request.method(), "Sending request");
		if !method::carries_credentials(request.method()) {
			tracing::trace!(">> {}", body);
		}

		let reply = self.transport.post(body).await?;
		tracing::trace!("<< {}", reply);

		let reply = Reply::parse(&reply);
		if let Err(e) = &reply {
			tracing::debug!(method = request.method(), error = %e, "Request failed");
		}
		reply
	}

	pub(crate) fn refresh_period(&self) -> Option<Duration> {
		self.state.read().info.as_ref().map(SessionInfo::refresh_period)
	}

	/// Re-authenticates with the stored credentials and current cookie.
	pub(crate) async fn refresh(&self) -> Result<String> {
		let (request, generation) = {
			let state = self.state.read();
			let (Some(cookie), Some(credentials)) = (&state.cookie, &state.credentials) else {
				return Err(Error::NotLoggedIn);
			};
			let request = Request::new(method::AAA_REFRESH)
				.attr(attr::IN_NAME, &credentials.name)
				.attr(attr::IN_PASSWORD, &credentials.password)
				.attr(attr::IN_COOKIE, cookie);
			(request, state.generation)
		};

		let reply = self.post(&request).await?;
		let grant = Grant::from_reply(&reply)?;

		let mut state = self.state.write();
		// A logout or new login while the refresh was in flight wins.
		// Overlapping refreshes of the same login all store; the last one wins.
		if state.generation != generation || state.cookie.is_none() {
			return Err(Error::NotLoggedIn);
		}
		state.cookie = Some(grant.cookie.clone());
		if let Some(info) = state.info.as_mut() {
			info.refresh_period = grant.refresh_period;
			info.privileges = grant.privileges;
			if let Some(version) = grant.version {
				info.version = version;
			}
			if let Some(session_id) = grant.session_id {
				info.session_id = session_id;
			}
		}
		tracing::debug!(refresh_period = ?grant.refresh_period, "Session refreshed");
		Ok(grant.cookie)
	}
}

/// A manager session.
///
/// Dropping the session cancels its background refresh. It does not log
/// out; call [`Session::logout`] to end the session server-side.
pub struct Session {
	inner: Arc<Inner>,
	refresh: Mutex<Option<RefreshTask>>,
}

impl Session {
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		Self {
			inner: Arc::new(Inner { transport, state: RwLock::new(State::default()) }),
			refresh: Mutex::new(None),
		}
	}

	/// Session over HTTP(S) to `endpoint`.
	pub fn connect(endpoint: &Endpoint) -> Result<Self> {
		Ok(Self::new(Arc::new(HttpTransport::new(endpoint)?)))
	}

	/// Authenticates and arms the refresh schedule. Returns the cookie.
	///
	/// Any previous session state is discarded first, so a failed login
	/// leaves the session logged out.
	pub async fn login(&self, name: &str, password: &str) -> Result<String> {
		self.cancel_refresh();
		self.inner.state.write().reset();

		let request = Request::new(method::AAA_LOGIN)
			.attr(attr::IN_NAME, name)
			.attr(attr::IN_PASSWORD, password);
		let reply = self.inner.post(&request).await?;
		let grant = Grant::from_reply(&reply)?;
		let info = SessionInfo {
			refresh_period: grant.refresh_period,
			privileges: grant.privileges,
			version: grant
				.version
				.ok_or_else(|| Error::fatal("Wrong reply syntax: aaaLogin has no outVersion"))?,
			session_id: grant
				.session_id
				.ok_or_else(|| Error::fatal("Wrong reply syntax: aaaLogin has no outSessionId"))?,
		};

		tracing::info!(user = name, version = %info.version, session = %info.session_id, "Logged in");
		let period = info.refresh_period;
		{
			let mut state = self.inner.state.write();
			state.cookie = Some(grant.cookie.clone());
			state.credentials = Some(Credentials { name: name.to_owned(), password: password.to_owned() });
			state.info = Some(info);
		}
		self.schedule(period);
		Ok(grant.cookie)
	}

	/// Refreshes the cookie now and restarts the refresh schedule.
	pub async fn refresh(&self) -> Result<String> {
		let cookie = self.inner.refresh().await?;
		if let Some(period) = self.inner.refresh_period() {
			self.schedule(period);
		}
		Ok(cookie)
	}

	/// Ends the session server-side and returns the reported status.
	///
	/// Local state is cleared and the refresh schedule cancelled even when
	/// the server call fails.
	pub async fn logout(&self) -> Result<String> {
		self.cancel_refresh();
		let cookie = self.inner.state.write().reset().cookie.ok_or(Error::NotLoggedIn)?;

		let reply = self.inner.post(&Request::new(method::AAA_LOGOUT).attr(attr::IN_COOKIE, cookie)).await?;
		reply.expect_response()?;
		let status = reply.required_attr(attr::OUT_STATUS)?.to_owned();
		tracing::info!(status = %status, "Logged out");
		Ok(status)
	}

	/// Sends an authenticated request. Fails with [`Error::NotLoggedIn`]
	/// without touching the network when there is no cookie.
	pub async fn call(&self, request: Request) -> Result<Reply> {
		let cookie = self.cookie().ok_or(Error::NotLoggedIn)?;
		self.inner.post(&request.attr(attr::COOKIE, cookie)).await
	}

	pub fn cookie(&self) -> Option<String> {
		self.inner.state.read().cookie.clone()
	}

	pub fn is_logged_in(&self) -> bool {
		self.inner.state.read().cookie.is_some()
	}

	pub fn info(&self) -> Option<SessionInfo> {
		self.inner.state.read().info.clone()
	}

	/// Returns true while a background refresh is armed.
	pub fn refresh_scheduled(&self) -> bool {
		self.refresh.lock().as_ref().is_some_and(RefreshTask::is_active)
	}

	fn schedule(&self, period: Duration) {
		let task = RefreshTask::spawn(Arc::downgrade(&self.inner), period);
		*self.refresh.lock() = task;
	}

	fn cancel_refresh(&self) {
		self.refresh.lock().take();
	}
}

impl fmt::Debug for Session {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Session")
			.field("logged_in", &self.is_logged_in())
			.field("info", &self.info())
			.finish_non_exhaustive()
	}
}
