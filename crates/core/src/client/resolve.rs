//! Read-only lookups: by DN, class, parent, children, scope.

use std::collections::BTreeMap;

use ucsm_protocol::wire::{attr, method, payload, section};
use ucsm_protocol::{Filter, ManagedObject};
use ucsm_runtime::{Request, Result};

use super::{Client, values};

impl Client {
	/// Children of `dn`, optionally restricted to `class_id` and `filter`.
	///
	/// `hierarchical` also returns each child's subtree.
	pub async fn resolve_children(
		&self,
		class_id: Option<&str>,
		dn: &str,
		filter: Option<&Filter>,
		hierarchical: bool,
	) -> Result<Vec<ManagedObject>> {
		let request = Request::new(method::CONFIG_RESOLVE_CHILDREN)
			.attr(attr::CLASS_ID, class_id.unwrap_or_default())
			.attr(attr::IN_DN, dn)
			.flag(attr::IN_HIERARCHICAL, hierarchical)
			.filter(filter);
		self.call(request).await?.objects(section::OUT_CONFIGS)
	}

	/// Every object of `class_id`, optionally filtered.
	pub async fn resolve_class(
		&self,
		class_id: &str,
		filter: Option<&Filter>,
		hierarchical: bool,
	) -> Result<Vec<ManagedObject>> {
		let request = Request::new(method::CONFIG_RESOLVE_CLASS)
			.attr(attr::CLASS_ID, class_id)
			.flag(attr::IN_HIERARCHICAL, hierarchical)
			.filter(filter);
		self.call(request).await?.objects(section::OUT_CONFIGS)
	}

	/// Every object of any of `classes`.
	pub async fn resolve_classes<S: AsRef<str>>(
		&self,
		classes: &[S],
		hierarchical: bool,
	) -> Result<Vec<ManagedObject>> {
		let request = Request::new(method::CONFIG_RESOLVE_CLASSES)
			.flag(attr::IN_HIERARCHICAL, hierarchical)
			.payload(values(payload::IN_IDS, payload::ID, classes));
		self.call(request).await?.objects(section::OUT_CONFIGS)
	}

	/// The object at `dn`, or `None` if nothing lives there.
	pub async fn resolve_dn(&self, dn: &str, hierarchical: bool) -> Result<Option<ManagedObject>> {
		let request = Request::new(method::CONFIG_RESOLVE_DN)
			.attr(attr::DN, dn)
			.flag(attr::IN_HIERARCHICAL, hierarchical);
		self.call(request).await?.single(section::OUT_CONFIG)
	}

	/// Resolves many DNs at once. Returns the resolved objects and the DNs
	/// the manager reported as unresolved.
	pub async fn resolve_dns<S: AsRef<str>>(
		&self,
		dns: &[S],
		hierarchical: bool,
	) -> Result<(Vec<ManagedObject>, Vec<String>)> {
		let request = Request::new(method::CONFIG_RESOLVE_DNS)
			.flag(attr::IN_HIERARCHICAL, hierarchical)
			.payload(values(payload::IN_DNS, payload::DN, dns));
		let reply = self.call(request).await?;
		Ok((reply.objects(section::OUT_CONFIGS)?, reply.dn_values(section::OUT_UNRESOLVED)?))
	}

	/// The parent of the object at `dn`.
	pub async fn resolve_parent(&self, dn: &str, hierarchical: bool) -> Result<Option<ManagedObject>> {
		let request = Request::new(method::CONFIG_RESOLVE_PARENT)
			.attr(attr::DN, dn)
			.flag(attr::IN_HIERARCHICAL, hierarchical);
		self.call(request).await?.single(section::OUT_CONFIG)
	}

	/// DNs of every object of `class_id`, optionally filtered.
	pub async fn find_dns_by_class_id(&self, class_id: &str, filter: Option<&Filter>) -> Result<Vec<String>> {
		let request = Request::new(method::CONFIG_FIND_DNS_BY_CLASS_ID)
			.attr(attr::CLASS_ID, class_id)
			.filter(filter);
		self.call(request).await?.dn_values(section::OUT_DNS)
	}

	/// Objects of `class_id` under `dn`.
	///
	/// `recursive` is passed through as `inRecursive`; whether a
	/// non-recursive scope still descends is up to the manager.
	pub async fn scope(
		&self,
		class_id: &str,
		dn: &str,
		filter: Option<&Filter>,
		recursive: bool,
		hierarchical: bool,
	) -> Result<Vec<ManagedObject>> {
		let request = Request::new(method::CONFIG_SCOPE)
			.attr(attr::DN, dn)
			.attr(attr::IN_CLASS, class_id)
			.flag(attr::IN_RECURSIVE, recursive)
			.flag(attr::IN_HIERARCHICAL, hierarchical)
			.filter(filter);
		self.call(request).await?.objects(section::OUT_CONFIGS)
	}

	/// Policies and other elements of `class_id` visible from the org at
	/// `dn`, including those inherited from parent orgs. Keyed by DN.
	pub async fn resolve_elements(
		&self,
		dn: &str,
		class_id: &str,
		filter: Option<&Filter>,
		single_level: bool,
		hierarchical: bool,
	) -> Result<BTreeMap<String, ManagedObject>> {
		let request = Request::new(method::ORG_RESOLVE_ELEMENTS)
			.attr(attr::DN, dn)
			.attr(attr::IN_CLASS, class_id)
			.flag(attr::IN_SINGLE_LEVEL, single_level)
			.flag(attr::IN_HIERARCHICAL, hierarchical)
			.filter(filter);
		self.call(request).await?.pairs(section::OUT_CONFIGS)
	}
}
