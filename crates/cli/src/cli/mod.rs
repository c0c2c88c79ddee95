use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Cyan.on_default())
}

#[derive(Parser, Debug)]
#[command(name = "ucsm")]
#[command(about = "Query and inspect a Cisco UCS Manager over its XML API")]
#[command(version)]
#[command(styles = styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv request bodies)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	#[command(flatten)]
	pub connection: ConnectionArgs,

	#[command(subcommand)]
	pub command: Commands,
}

/// Where to connect and as whom. Unset values come from the profile.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
	/// Manager host name or address
	#[arg(long, global = true, env = "UCSM_HOST")]
	pub host: Option<String>,

	/// Manager port (defaults to 80 or 443)
	#[arg(long, global = true)]
	pub port: Option<u16>,

	/// Use HTTPS
	#[arg(long, global = true)]
	pub secure: bool,

	/// Accept self-signed or otherwise invalid certificates
	#[arg(long, global = true)]
	pub insecure: bool,

	/// Login name
	#[arg(short, long, global = true, env = "UCSM_USER")]
	pub user: Option<String>,

	/// Login password
	#[arg(long, global = true, env = "UCSM_PASSWORD", hide_env_values = true)]
	pub password: Option<String>,

	/// Request timeout in seconds
	#[arg(long, global = true, value_name = "SECS")]
	pub timeout: Option<u64>,

	/// Profile to use from the config file
	#[arg(long, global = true, env = "UCSM_PROFILE")]
	pub profile: Option<String>,

	/// Config file (defaults to <config dir>/ucsm/config.json)
	#[arg(long, global = true, env = "UCSM_CONFIG", value_name = "FILE")]
	pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Log in, print what the manager granted, and log out
	Login,

	/// Compile a filter expression to its XML form without connecting
	#[command(after_help = "Example: ucsm filter 'lsServer.name ~= \"web*\" & !lsServer.usrLbl == \"\"'")]
	Filter {
		/// Expression such as `computeBlade.operPower == on`
		expression: String,
	},

	/// Resolve the object at a DN
	ResolveDn {
		dn: String,
		/// Include the whole subtree
		#[arg(long)]
		hierarchical: bool,
	},

	/// Resolve several DNs, reporting the ones that do not exist
	ResolveDns {
		#[arg(required = true)]
		dns: Vec<String>,
		#[arg(long)]
		hierarchical: bool,
	},

	/// Resolve the parent of the object at a DN
	ResolveParent {
		dn: String,
		#[arg(long)]
		hierarchical: bool,
	},

	/// Every object of a class
	ResolveClass {
		class_id: String,
		#[command(flatten)]
		query: QueryArgs,
	},

	/// Children of a DN
	ResolveChildren {
		dn: String,
		/// Only children of this class
		#[arg(long = "class", value_name = "CLASS")]
		class_id: Option<String>,
		#[command(flatten)]
		query: QueryArgs,
	},

	/// DNs of every object of a class
	FindDns {
		class_id: String,
		/// Filter expression
		#[arg(long, value_name = "EXPR")]
		filter: Option<String>,
	},

	/// Objects of a class under a DN
	Scope {
		class_id: String,
		dn: String,
		/// Descend below direct children
		#[arg(long)]
		recursive: bool,
		#[command(flatten)]
		query: QueryArgs,
	},
}

impl Commands {
	/// Name used in the output envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Login => "login",
			Commands::Filter { .. } => "filter",
			Commands::ResolveDn { .. } => "resolve-dn",
			Commands::ResolveDns { .. } => "resolve-dns",
			Commands::ResolveParent { .. } => "resolve-parent",
			Commands::ResolveClass { .. } => "resolve-class",
			Commands::ResolveChildren { .. } => "resolve-children",
			Commands::FindDns { .. } => "find-dns",
			Commands::Scope { .. } => "scope",
		}
	}
}

/// Filter and depth options shared by class queries.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
	/// Filter expression
	#[arg(long, value_name = "EXPR")]
	pub filter: Option<String>,

	/// Include each object's subtree
	#[arg(long)]
	pub hierarchical: bool,
}
