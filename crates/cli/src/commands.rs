//! Command execution.
//!
//! `filter` runs offline. Every other command logs in, runs one operation,
//! and logs out whether or not the operation succeeded.

use std::str::FromStr;

use ucsm::{Client, Filter};

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::output::Payload;

pub async fn dispatch(cli: Cli) -> Result<Payload> {
	if let Commands::Filter { expression } = &cli.command {
		return compile_filter(expression);
	}

	let settings = Settings::from_args(&cli.connection)?;
	tracing::debug!(?settings, command = cli.command.name(), "Resolved connection settings");
	let client = Client::connect(&settings.endpoint)?;
	run(&client, &settings.user, &settings.password, &cli.command).await
}

/// Logs in on `client`, runs `command`, and logs out.
///
/// A failed logout is logged and does not mask the command's own outcome.
/// `filter` needs no session and never touches `client`.
pub async fn run(client: &Client, user: &str, password: &str, command: &Commands) -> Result<Payload> {
	if let Commands::Filter { expression } = command {
		return compile_filter(expression);
	}
	client.login(user, password).await?;
	let outcome = execute(client, command).await;
	if let Err(err) = client.logout().await {
		tracing::warn!(error = %err, "Logout failed");
	}
	outcome
}

fn compile_filter(expression: &str) -> Result<Payload> {
	let filter = Filter::from_str(expression).map_err(ucsm::Error::from)?;
	Ok(Payload::Filter { xml: filter.to_in_filter().to_string() })
}

fn parse_filter(expression: Option<&str>) -> Result<Option<Filter>> {
	let filter = expression.map(Filter::from_str).transpose().map_err(ucsm::Error::from)?;
	Ok(filter)
}

async fn execute(client: &Client, command: &Commands) -> Result<Payload> {
	let payload = match command {
		Commands::Login => match client.info() {
			Some(info) => Payload::Session(info),
			None => return Err(ucsm::Error::NotLoggedIn.into()),
		},
		Commands::Filter { expression } => compile_filter(expression)?,
		Commands::ResolveDn { dn, hierarchical } => Payload::Object(client.resolve_dn(dn, *hierarchical).await?),
		Commands::ResolveDns { dns, hierarchical } => {
			let (resolved, unresolved) = client.resolve_dns(dns, *hierarchical).await?;
			Payload::Partition { resolved, unresolved }
		}
		Commands::ResolveParent { dn, hierarchical } => {
			Payload::Object(client.resolve_parent(dn, *hierarchical).await?)
		}
		Commands::ResolveClass { class_id, query } => {
			let filter = parse_filter(query.filter.as_deref())?;
			Payload::Objects(client.resolve_class(class_id, filter.as_ref(), query.hierarchical).await?)
		}
		Commands::ResolveChildren { dn, class_id, query } => {
			let filter = parse_filter(query.filter.as_deref())?;
			let children = client
				.resolve_children(class_id.as_deref(), dn, filter.as_ref(), query.hierarchical)
				.await?;
			Payload::Objects(children)
		}
		Commands::FindDns { class_id, filter } => {
			let filter = parse_filter(filter.as_deref())?;
			Payload::Dns(client.find_dns_by_class_id(class_id, filter.as_ref()).await?)
		}
		Commands::Scope { class_id, dn, recursive, query } => {
			let filter = parse_filter(query.filter.as_deref())?;
			let found = client
				.scope(class_id, dn, filter.as_ref(), *recursive, query.hierarchical)
				.await?;
			Payload::Objects(found)
		}
	};
	Ok(payload)
}
