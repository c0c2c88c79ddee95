//! Async client for the Cisco UCS Manager XML API.
//!
//! ```ignore
//! use ucsm::{Client, Endpoint, Property};
//!
//! let client = Client::connect(&Endpoint::new("ucs-a").secure(true).accept_invalid_certs(true))?;
//! client.login("admin", "password").await?;
//!
//! let power = Property::new("computeBlade", "operPower");
//! let blades = client.resolve_class("computeBlade", Some(&power.equals("off")), false).await?;
//! for blade in &blades {
//!     println!("{}", blade.dn().unwrap_or_default());
//! }
//!
//! client.logout().await?;
//! ```
//!
//! Every operation is a fixed composition of the session's generic call
//! path: a method name, request attributes, optional filter and payload,
//! and the result section to decode. Errors are [`Error`]; use
//! [`Error::kind`] to tell server faults from fatal replies and misuse.

mod client;

pub use client::{Client, ImpactReport, Placement};
pub use ucsm_protocol::{
	BitMask, Composite, Element, Filter, Logic, ManagedObject, ObjectRef, Operand, Operator, Predicate,
	Property, dn, wire,
};
pub use ucsm_runtime::{
	Endpoint, Error, ErrorKind, HttpTransport, Reply, Request, Result, Session, SessionInfo, Transport,
	TransportFuture,
};
