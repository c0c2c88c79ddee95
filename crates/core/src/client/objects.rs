//! Create, update, and delete helpers over `configConfMo`.

use ucsm_protocol::wire::{attr, method, status};
use ucsm_protocol::{ManagedObject, dn};
use ucsm_runtime::{Error, Result};

use super::{Client, echoed};

/// Where [`Client::create_object`] puts a new object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
	/// At an explicit DN.
	Dn(String),
	/// Under `parent`, named `rn` or else the object's own `rn` attribute.
	Under { parent: String, rn: Option<String> },
	/// At the object's own `dn` attribute.
	FromObject,
}

impl Placement {
	pub fn dn(dn: impl Into<String>) -> Self {
		Placement::Dn(dn.into())
	}

	pub fn under(parent: impl Into<String>) -> Self {
		Placement::Under { parent: parent.into(), rn: None }
	}

	pub fn under_as(parent: impl Into<String>, rn: impl Into<String>) -> Self {
		Placement::Under { parent: parent.into(), rn: Some(rn.into()) }
	}

	fn resolve(&self, object: &ManagedObject) -> Result<String> {
		match self {
			Placement::Dn(dn) => Ok(dn.clone()),
			Placement::Under { parent, rn } => {
				let rn = rn.as_deref().or_else(|| object.get(attr::RN)).ok_or_else(|| {
					Error::InvalidArgument(format!("no rn given for new {} under {}", object.class_id(), parent))
				})?;
				Ok(dn::join(parent, rn))
			}
			Placement::FromObject => object
				.dn()
				.map(str::to_owned)
				.ok_or_else(|| Error::InvalidArgument(format!("new {} has no dn", object.class_id()))),
		}
	}
}

/// Copy of `object` addressed by `dn` alone and marked with `status`.
fn change(object: &ManagedObject, dn: &str, status: &str) -> ManagedObject {
	let mut config = object.clone();
	config.remove(attr::RN);
	config.set(attr::DN, dn);
	config.set(attr::STATUS, status);
	config
}

fn existing_dn(object: &ManagedObject) -> Result<&str> {
	object
		.dn()
		.ok_or_else(|| Error::InvalidArgument(format!("{} has no dn", object.class_id())))
}

impl Client {
	/// Creates `object` at `placement` and returns it as stored.
	pub async fn create_object(&self, object: &ManagedObject, placement: &Placement) -> Result<ManagedObject> {
		let dn = placement.resolve(object)?;
		tracing::debug!(class_id = object.class_id(), dn = %dn, "Creating object");
		let stored = self.conf_mo(&change(object, &dn, status::CREATED), &dn, false).await?;
		echoed(stored, method::CONFIG_CONF_MO, &dn)
	}

	/// Writes the attributes of `object` to the object at its `dn`.
	pub async fn update_object(&self, object: &ManagedObject) -> Result<ManagedObject> {
		let dn = existing_dn(object)?;
		tracing::debug!(class_id = object.class_id(), dn, "Updating object");
		let stored = self.conf_mo(&change(object, dn, status::MODIFIED), dn, false).await?;
		echoed(stored, method::CONFIG_CONF_MO, dn)
	}

	/// Deletes the object at the `dn` of `object`. Returns what the manager
	/// echoed, if anything.
	pub async fn delete_object(&self, object: &ManagedObject) -> Result<Option<ManagedObject>> {
		let dn = existing_dn(object)?;
		tracing::debug!(class_id = object.class_id(), dn, "Deleting object");
		let config = ManagedObject::new(object.class_id())
			.with_attribute(attr::DN, dn)
			.with_attribute(attr::STATUS, status::DELETED);
		self.conf_mo(&config, dn, false).await
	}
}
