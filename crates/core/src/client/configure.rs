//! Configuration changes and impact analysis.

use std::collections::BTreeMap;

use serde::Serialize;
use ucsm_protocol::ManagedObject;
use ucsm_protocol::wire::{attr, method, payload, section};
use ucsm_runtime::rpc::{in_config, in_configs};
use ucsm_runtime::{Request, Result};

use super::{Client, values};

/// What a set of changes would do, from `configEstimateImpact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
	/// Changes that need acknowledgement, as they would be.
	pub ackables: Vec<ManagedObject>,
	/// The same, as they are now.
	pub old_ackables: Vec<ManagedObject>,
	/// Objects the changes would affect, as they would be.
	pub affected: Vec<ManagedObject>,
	/// The same, as they are now.
	pub old_affected: Vec<ManagedObject>,
}

impl ImpactReport {
	pub fn requires_ack(&self) -> bool {
		!self.ackables.is_empty()
	}
}

fn pairs(configs: &BTreeMap<String, ManagedObject>) -> ucsm_protocol::Element {
	in_configs(configs.iter().map(|(dn, object)| (dn.as_str(), object)))
}

impl Client {
	/// Applies `config` at `dn` and returns the object as stored.
	///
	/// Only `config` itself is sent, not its children. The `status`
	/// attribute (`created`, `modified`, `deleted`) selects the change.
	pub async fn conf_mo(
		&self,
		config: &ManagedObject,
		dn: &str,
		hierarchical: bool,
	) -> Result<Option<ManagedObject>> {
		let request = Request::new(method::CONFIG_CONF_MO)
			.attr(attr::DN, dn)
			.flag(attr::IN_HIERARCHICAL, hierarchical)
			.payload(in_config(config));
		self.call(request).await?.single(section::OUT_CONFIG)
	}

	/// Applies several changes keyed by DN in one transaction.
	pub async fn conf_mos(
		&self,
		configs: &BTreeMap<String, ManagedObject>,
	) -> Result<BTreeMap<String, ManagedObject>> {
		let request = Request::new(method::CONFIG_CONF_MOS).payload(pairs(configs));
		self.call(request).await?.pairs(section::OUT_CONFIGS)
	}

	/// Applies the same `config` to every object in `dns`.
	pub async fn conf_mo_group<S: AsRef<str>>(
		&self,
		dns: &[S],
		config: &ManagedObject,
		hierarchical: bool,
	) -> Result<Vec<ManagedObject>> {
		let request = Request::new(method::CONFIG_CONF_MO_GROUP)
			.flag(attr::IN_HIERARCHICAL, hierarchical)
			.payload(values(payload::IN_DNS, payload::DN, dns))
			.payload(in_config(config));
		self.call(request).await?.objects(section::OUT_CONFIGS)
	}

	/// Reports what `configs` would change without applying them.
	pub async fn estimate_impact(&self, configs: &BTreeMap<String, ManagedObject>) -> Result<ImpactReport> {
		let request = Request::new(method::CONFIG_ESTIMATE_IMPACT).payload(pairs(configs));
		let reply = self.call(request).await?;
		Ok(ImpactReport {
			ackables: reply.objects(section::OUT_ACKABLES)?,
			old_ackables: reply.objects(section::OUT_OLD_ACKABLES)?,
			affected: reply.objects(section::OUT_AFFECTED)?,
			old_affected: reply.objects(section::OUT_OLD_AFFECTED)?,
		})
	}
}
