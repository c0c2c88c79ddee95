use thiserror::Error;
use ucsm::ErrorKind;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

/// Process exit codes.
pub mod exit {
	pub const FAULT: i32 = 2;
	pub const FATAL: i32 = 3;
	pub const USAGE: i32 = 64;
}

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Ucsm(#[from] ucsm::Error),

	#[error("configuration error: {0:#}")]
	Config(anyhow::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl CliError {
	pub fn config(message: impl Into<String>) -> Self {
		CliError::Config(anyhow::anyhow!(message.into()))
	}

	pub fn exit_code(&self) -> i32 {
		match self {
			CliError::Ucsm(err) => match err.kind() {
				ErrorKind::Fault => exit::FAULT,
				ErrorKind::Fatal => exit::FATAL,
				ErrorKind::Misuse => exit::USAGE,
			},
			CliError::Config(_) => exit::USAGE,
			CliError::Io(_) | CliError::Json(_) => exit::FATAL,
		}
	}

	/// Converts this error for the structured output envelope.
	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::Ucsm(err) => match err.fault() {
				Some((fault, _)) => (ErrorCode::ServerFault, Some(serde_json::json!({ "errorCode": fault }))),
				None if err.is_fatal() => (ErrorCode::Fatal, None),
				None => (ErrorCode::InvalidInput, None),
			},
			CliError::Config(_) => (ErrorCode::ConfigError, None),
			CliError::Io(_) | CliError::Json(_) => (ErrorCode::IoError, None),
		};
		CommandError { code, message: self.to_string(), details }
	}
}
