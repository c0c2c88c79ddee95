//! Service profile cloning and template instantiation.

use ucsm_protocol::ManagedObject;
use ucsm_protocol::wire::{attr, method, payload, section};
use ucsm_runtime::{Request, Result};

use super::{Client, echoed, values};

/// Org that new profiles land in when none is given.
const ROOT_ORG: &str = "org-root";

impl Client {
	/// Copies the service profile at `src_dn` as `name` in `target_org`.
	pub async fn clone_profile(
		&self,
		src_dn: &str,
		name: &str,
		target_org: Option<&str>,
	) -> Result<ManagedObject> {
		self.instantiate_one(method::LS_CLONE, src_dn, name, target_org).await
	}

	/// Creates profile `name` in `target_org` from the template at `src_dn`.
	pub async fn instantiate_template(
		&self,
		src_dn: &str,
		name: &str,
		target_org: Option<&str>,
	) -> Result<ManagedObject> {
		self.instantiate_one(method::LS_INSTANTIATE_TEMPLATE, src_dn, name, target_org).await
	}

	async fn instantiate_one(
		&self,
		method: &str,
		src_dn: &str,
		name: &str,
		target_org: Option<&str>,
	) -> Result<ManagedObject> {
		let request = Request::new(method)
			.attr(attr::DN, src_dn)
			.attr(attr::IN_TARGET_ORG, target_org.unwrap_or(ROOT_ORG))
			.attr(attr::IN_SERVER_NAME, name)
			.flag(attr::IN_HIERARCHICAL, false);
		let created = self.call(request).await?.single(section::OUT_CONFIG)?;
		echoed(created, method, src_dn)
	}

	/// Creates `number` profiles from the template at `src_dn`, named by
	/// the manager with optional `prefix`.
	pub async fn instantiate_n_template(
		&self,
		src_dn: &str,
		target_org: Option<&str>,
		prefix: Option<&str>,
		number: u32,
	) -> Result<Vec<ManagedObject>> {
		let request = Request::new(method::LS_INSTANTIATE_N_TEMPLATE)
			.attr(attr::DN, src_dn)
			.attr(attr::IN_TARGET_ORG, target_org.unwrap_or(ROOT_ORG))
			.attr(attr::IN_SERVER_NAME_PREFIX, prefix.unwrap_or_default())
			.attr(attr::IN_NUMBER_OF, number)
			.flag(attr::IN_HIERARCHICAL, false);
		self.call(request).await?.objects(section::OUT_CONFIGS)
	}

	/// Creates one profile per entry of `names` from the template at `src_dn`.
	pub async fn instantiate_n_named_template<S: AsRef<str>>(
		&self,
		src_dn: &str,
		names: &[S],
		target_org: Option<&str>,
	) -> Result<Vec<ManagedObject>> {
		let request = Request::new(method::LS_INSTANTIATE_N_NAMED_TEMPLATE)
			.attr(attr::DN, src_dn)
			.attr(attr::IN_TARGET_ORG, target_org.unwrap_or(ROOT_ORG))
			.flag(attr::IN_HIERARCHICAL, false)
			.payload(values(payload::IN_NAME_SET, payload::DN, names));
		self.call(request).await?.objects(section::OUT_CONFIGS)
	}
}
