//! Error types for protocol-level operations.

use thiserror::Error;

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, encoding, or decoding wire data.
///
/// None of these involve the network: they come from malformed XML, from
/// misuse of the filter DSL, or from attribute lookups on a decoded object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// The XML document could not be parsed.
	#[error("malformed XML: {0}")]
	Xml(String),

	/// A boolean filter was combined with something that is not a filter.
	#[error("type mismatch: {0}")]
	TypeMismatch(String),

	/// A textual filter expression could not be parsed.
	#[error("invalid filter expression {input:?}: {reason}")]
	FilterSyntax { input: String, reason: String },

	/// Attribute lookup failed on both fixed fields and the attribute map.
	#[error("{class_id} has no attribute '{name}'")]
	NoSuchAttribute { class_id: String, name: String },
}
