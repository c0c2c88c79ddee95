//! Wire types for the UCS Manager XML API.
//!
//! This crate contains everything that describes the shape of data on the
//! wire, with no I/O:
//!
//! - [`Element`] - a minimal XML element tree used for requests and replies
//! - [`Filter`] - the boolean filter DSL compiled into `<inFilter>` payloads
//! - [`ManagedObject`] - the in-memory form of a configuration tree node
//! - [`dn`] - helpers for distinguished names
//! - [`wire`] - method, section, and attribute names of the protocol
//!
//! Higher-level session handling lives in `ucsm-runtime`.

pub mod dn;
pub mod error;
pub mod filter;
pub mod object;
pub mod wire;
pub mod xml;

pub use error::{Error, Result};
pub use filter::{BitMask, Composite, Filter, Logic, Operand, Operator, Predicate, Property};
pub use object::{ManagedObject, ObjectRef};
pub use xml::Element;
