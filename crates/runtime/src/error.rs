//! Error types for the UCS Manager runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// Reply was unparsable or did not have the expected shape.
	#[error("Fatal: {0}")]
	Fatal(String),

	/// HTTP request could not be completed.
	#[error("Transport error: {0}")]
	Transport(String),

	/// The manager rejected the call with a fault on the response atom.
	#[error("Response error {code}: {text}")]
	Response { code: u32, text: String },

	/// An authenticated call was attempted without a session cookie.
	#[error("Not logged in")]
	NotLoggedIn,

	/// Invalid argument provided to an operation.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// Encoding, filter, or attribute error from the wire types.
	#[error(transparent)]
	Protocol(#[from] ucsm_protocol::Error),
}

/// The three disjoint classes every [`Error`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// No usable answer was obtained; carries no server code.
	Fatal,
	/// Well-formed reply carrying a server fault code.
	Fault,
	/// Caller error detected before or without any server interaction.
	Misuse,
}

impl Error {
	pub fn fatal(message: impl Into<String>) -> Self {
		Error::Fatal(message.into())
	}

	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::Fatal(_) | Error::Transport(_) => ErrorKind::Fatal,
			Error::Protocol(ucsm_protocol::Error::Xml(_)) => ErrorKind::Fatal,
			Error::Response { .. } => ErrorKind::Fault,
			Error::NotLoggedIn | Error::InvalidArgument(_) | Error::Protocol(_) => ErrorKind::Misuse,
		}
	}

	/// Returns true for fatal and transport failures.
	pub fn is_fatal(&self) -> bool {
		self.kind() == ErrorKind::Fatal
	}

	/// Returns the server fault code and text if this is a fault.
	pub fn fault(&self) -> Option<(u32, &str)> {
		match self {
			Error::Response { code, text } => Some((*code, text)),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kinds_are_disjoint() {
		let cases = [
			(Error::fatal("no outConfig"), ErrorKind::Fatal),
			(Error::Transport("connection refused".into()), ErrorKind::Fatal),
			(ucsm_protocol::Error::Xml("eof".into()).into(), ErrorKind::Fatal),
			(Error::Response { code: 552, text: "Authentication failed".into() }, ErrorKind::Fault),
			(Error::NotLoggedIn, ErrorKind::Misuse),
			(Error::InvalidArgument("no dn".into()), ErrorKind::Misuse),
			(ucsm_protocol::Error::TypeMismatch("5".into()).into(), ErrorKind::Misuse),
		];
		for (error, kind) in cases {
			assert_eq!(error.kind(), kind, "{error}");
		}
	}

	#[test]
	fn test_fault_accessor() {
		let error = Error::Response { code: 552, text: "Authentication failed".into() };
		assert_eq!(error.fault(), Some((552, "Authentication failed")));
		assert!(!error.is_fatal());
		assert_eq!(Error::NotLoggedIn.fault(), None);
	}
}
