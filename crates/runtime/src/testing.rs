//! Scripted transport for tests.
//!
//! Replies are queued per method name (the request's root element). The
//! last queued reply for a method is sticky, so a single login reply serves
//! any number of refreshes. Every request body is recorded for assertions.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use ucsm_protocol::Element;

use crate::error::{Error, Result};
use crate::transport::{Transport, TransportFuture};

#[derive(Debug, Clone)]
enum Scripted {
	Body(String),
	Fail(String),
}

#[derive(Default)]
struct Script {
	replies: HashMap<String, VecDeque<Scripted>>,
	requests: Vec<String>,
}

/// In-memory [`Transport`] answering from a script.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
	script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues `body` as the reply to the next `method` call.
	pub fn reply(&self, method: &str, body: impl Into<String>) -> &Self {
		self.push(method, Scripted::Body(body.into()))
	}

	/// Queues a transport failure for the next `method` call.
	pub fn fail(&self, method: &str, message: impl Into<String>) -> &Self {
		self.push(method, Scripted::Fail(message.into()))
	}

	fn push(&self, method: &str, reply: Scripted) -> &Self {
		self.script.lock().replies.entry(method.to_owned()).or_default().push_back(reply);
		self
	}

	/// Raw bodies of every request posted so far.
	pub fn requests(&self) -> Vec<String> {
		self.script.lock().requests.clone()
	}

	/// Parsed requests whose root element is `method`.
	pub fn requests_for(&self, method: &str) -> Vec<Element> {
		self.requests()
			.iter()
			.filter_map(|body| Element::parse(body).ok())
			.filter(|element| element.name() == method)
			.collect()
	}

	/// The most recent request, parsed.
	pub fn last_request(&self) -> Option<Element> {
		self.script.lock().requests.last().and_then(|body| Element::parse(body).ok())
	}

	fn answer(&self, body: String) -> Result<String> {
		let method = Element::parse(&body)
			.map(|element| element.name().to_owned())
			.map_err(|e| Error::Transport(format!("scripted transport got unparsable request: {e}")))?;

		let mut script = self.script.lock();
		script.requests.push(body);
		let queue = script
			.replies
			.get_mut(&method)
			.ok_or_else(|| Error::Transport(format!("no scripted reply for {method}")))?;
		let reply = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
		match reply {
			Some(Scripted::Body(body)) => Ok(body),
			Some(Scripted::Fail(message)) => Err(Error::Transport(message)),
			None => Err(Error::Transport(format!("no scripted reply for {method}"))),
		}
	}
}

impl Transport for ScriptedTransport {
	fn post(&self, body: String) -> TransportFuture<'_> {
		let result = self.answer(body);
		Box::pin(async move { result })
	}
}

/// A successful `aaaLogin`/`aaaRefresh` reply.
pub fn login_reply(method: &str, cookie: &str, refresh_period: u64) -> String {
	format!(
		r#"<{method} cookie="" response="yes" outCookie="{cookie}" outRefreshPeriod="{refresh_period}" outPriv="aaa,admin,read-only" outVersion="4.2(1d)" outSessionId="web_49153_A"/>"#
	)
}

/// A fault reply for `method`.
pub fn fault_reply(method: &str, code: u32, text: &str) -> String {
	format!(r#"<{method} cookie="" response="yes" errorCode="{code}" invocationResult="unidentified-fail" errorDescr="{text}"/>"#)
}
