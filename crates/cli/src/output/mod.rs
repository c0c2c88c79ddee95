//! Result envelope and rendering for CLI commands.
//!
//! With `--format json` every command prints one envelope on stdout:
//!
//! ```json
//! {
//!   "ok": true,
//!   "command": "resolve-dn",
//!   "data": { ... },
//!   "timings": { "durationMs": 84 }
//! }
//! ```
//!
//! On failure `data` is replaced by `error` with a code, message, and
//! optional details. Text format prints only the data, and errors go to
//! stderr in both formats.


use std::fmt;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use serde::Serialize;
use ucsm::{ManagedObject, SessionInfo};

use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// Objects in their pretty form, one attribute per line
	#[default]
	Text,
	/// JSON envelope
	Json,
}

impl fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OutputFormat::Text => write!(f, "text"),
			OutputFormat::Json => write!(f, "json"),
		}
	}
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
	Objects(Vec<ManagedObject>),
	Object(Option<ManagedObject>),
	Dns(Vec<String>),
	Partition { resolved: Vec<ManagedObject>, unresolved: Vec<String> },
	Session(SessionInfo),
	Filter { xml: String },
}

fn write_objects(f: &mut fmt::Formatter<'_>, objects: &[ManagedObject]) -> fmt::Result {
	for (index, object) in objects.iter().enumerate() {
		if index > 0 {
			writeln!(f)?;
		}
		writeln!(f, "{object:#}")?;
	}
	Ok(())
}

impl fmt::Display for Payload {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Payload::Objects(objects) => write_objects(f, objects),
			Payload::Object(Some(object)) => writeln!(f, "{object:#}"),
			Payload::Object(None) => writeln!(f, "(not found)"),
			Payload::Dns(dns) => dns.iter().try_for_each(|dn| writeln!(f, "{dn}")),
			Payload::Partition { resolved, unresolved } => {
				write_objects(f, resolved)?;
				unresolved.iter().try_for_each(|dn| writeln!(f, "unresolved: {dn}"))
			}
			Payload::Session(info) => {
				writeln!(f, "session: {}", info.session_id())?;
				writeln!(f, "version: {}", info.version())?;
				writeln!(f, "privileges: {}", info.privileges().join(","))?;
				writeln!(f, "refresh period: {}s", info.refresh_period().as_secs_f64())
			}
			Payload::Filter { xml } => writeln!(f, "{xml}"),
		}
	}
}

/// The envelope printed for every command in JSON format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub ok: bool,

	pub command: String,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,

	pub message: String,

	/// Server fault code and similar context.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// The manager answered with a fault
	ServerFault,
	/// No usable answer: transport failure or malformed reply
	Fatal,
	/// Bad arguments or a call made in the wrong state
	InvalidInput,
	/// Config file or profile problem
	ConfigError,
	IoError,
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ErrorCode::ServerFault => write!(f, "SERVER_FAULT"),
			ErrorCode::Fatal => write!(f, "FATAL"),
			ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
			ErrorCode::IoError => write!(f, "IO_ERROR"),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

impl From<Duration> for Timings {
	fn from(duration: Duration) -> Self {
		Timings { duration_ms: duration.as_millis() as u64 }
	}
}

/// Builds a [`CommandResult`], timing from construction to [`build`].
///
/// [`build`]: ResultBuilder::build
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self { command: command.into(), data: None, error: None, start_time: Instant::now() }
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error = Some(CommandError { code, message: message.into(), details: None });
		self
	}

	pub fn failure(mut self, error: CommandError) -> Self {
		self.error = Some(error);
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			ok: self.error.is_none() && self.data.is_some(),
			command: self.command,
			data: self.data,
			error: self.error,
			timings: Some(Timings::from(self.start_time.elapsed())),
		}
	}
}

/// Prints a result to stdout in `format`.
pub fn print_result<T: Serialize + fmt::Display>(result: &CommandResult<T>, format: OutputFormat) -> Result<()> {
	match format {
		OutputFormat::Json => print_json(result),
		OutputFormat::Text => {
			if let Some(ref data) = result.data {
				write!(io::stdout().lock(), "{data}")?;
			}
			Ok(())
		}
	}
}

/// Prints the JSON envelope regardless of format.
pub fn print_json<T: Serialize>(result: &CommandResult<T>) -> Result<()> {
	let json = serde_json::to_string_pretty(result)?;
	writeln!(io::stdout().lock(), "{json}")?;
	Ok(())
}

pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}
