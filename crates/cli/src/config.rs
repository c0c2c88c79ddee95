//! Connection profiles.
//!
//! Profiles live in a JSON file at `$UCSM_CONFIG` or
//! `<config dir>/ucsm/config.json`:
//!
//! ```json
//! {
//!   "defaultProfile": "lab",
//!   "profiles": {
//!     "lab": { "host": "10.0.0.5", "secure": true, "insecure": true, "user": "admin" }
//!   }
//! }
//! ```
//!
//! Command-line flags and `UCSM_*` variables override profile values.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use ucsm::Endpoint;

use crate::cli::ConnectionArgs;
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
	pub default_profile: Option<String>,
	#[serde(default)]
	pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
	pub host: Option<String>,
	pub port: Option<u16>,
	#[serde(default)]
	pub secure: bool,
	/// Accept invalid certificates.
	#[serde(default)]
	pub insecure: bool,
	pub user: Option<String>,
	pub password: Option<String>,
	pub timeout_secs: Option<u64>,
}

/// `<config dir>/ucsm/config.json`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("ucsm").join("config.json"))
}

impl ConfigFile {
	/// Reads `path`. Without an explicit path a missing default file is an
	/// empty config.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let (path, required) = match path {
			Some(path) => (path.to_path_buf(), true),
			None => match default_path() {
				Some(path) => (path, false),
				None => return Ok(Self::default()),
			},
		};
		if !required && !path.exists() {
			return Ok(Self::default());
		}
		tracing::debug!(path = %path.display(), "Loading config");
		Self::read(&path).map_err(CliError::Config)
	}

	fn read(path: &Path) -> anyhow::Result<Self> {
		let text = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
		serde_json::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
	}

	/// Profile `name`, else the default profile, else an empty one. A
	/// profile that is named but absent is an error.
	pub fn profile(&self, name: Option<&str>) -> Result<Profile> {
		match name.or(self.default_profile.as_deref()) {
			Some(name) => self
				.profiles
				.get(name)
				.cloned()
				.ok_or_else(|| CliError::config(format!("no profile named '{name}'"))),
			None => Ok(Profile::default()),
		}
	}
}

/// Everything needed to open and authenticate a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
	pub endpoint: Endpoint,
	pub user: String,
	pub password: String,
}

impl std::fmt::Debug for Settings {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Settings")
			.field("endpoint", &self.endpoint)
			.field("user", &self.user)
			.field("password", &"<redacted>")
			.finish()
	}
}

impl Settings {
	/// Merges flags over `profile`. Host, user, and password must end up set.
	pub fn resolve(profile: Profile, args: &ConnectionArgs) -> Result<Self> {
		let host = args.host.clone().or(profile.host).ok_or_else(|| CliError::config("no host given"))?;
		let user = args.user.clone().or(profile.user).ok_or_else(|| CliError::config("no user given"))?;
		let password = args
			.password
			.clone()
			.or(profile.password)
			.ok_or_else(|| CliError::config("no password given"))?;

		let mut endpoint = Endpoint::new(host)
			.secure(args.secure || profile.secure)
			.accept_invalid_certs(args.insecure || profile.insecure);
		if let Some(port) = args.port.or(profile.port) {
			endpoint = endpoint.port(port);
		}
		if let Some(secs) = args.timeout.or(profile.timeout_secs) {
			endpoint = endpoint.timeout(Duration::from_secs(secs));
		}
		Ok(Self { endpoint, user, password })
	}

	/// Loads the config file and profile named by `args` and merges them.
	pub fn from_args(args: &ConnectionArgs) -> Result<Self> {
		let config = ConfigFile::load(args.config.as_deref())?;
		Self::resolve(config.profile(args.profile.as_deref())?, args)
	}
}
