//! UCS Manager runtime - transport, request marshalling, and sessions
//!
//! This crate owns everything that talks to a manager:
//!
//! - **Transport**: the [`Transport`] seam and its reqwest-backed
//!   [`HttpTransport`], one POST per call to `/nuova`
//! - **RPC**: [`Request`] marshalling and [`Reply`] classification into
//!   success, server fault, or fatal reply
//! - **Session**: cookie lifecycle (login, scheduled refresh, logout) and the
//!   generic authenticated call path
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   ucsm-rs   │  Named operations (resolve_dn, conf_mo, ...)
//! └──────┬──────┘
//!        │ Session::call(Request)
//! ┌──────▼───────┐
//! │ ucsm-runtime │  This crate
//! │  ┌────────┐  │
//! │  │Session │  │  Cookie, refresh task
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │  RPC   │  │  Request/Reply marshalling
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ Trans  │  │  HTTP(S) POST
//! │  └────────┘  │
//! └──────────────┘
//! ```

pub mod error;
mod refresh;
pub mod rpc;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;

pub use error::{Error, ErrorKind, Result};
pub use rpc::{Reply, Request};
pub use session::{Session, SessionInfo};
pub use transport::{Endpoint, HttpTransport, Transport, TransportFuture};
