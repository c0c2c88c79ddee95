//! Request marshalling and reply classification.
//!
//! A request is one element named after the method: scalar parameters are
//! attributes on it, followed by the compiled filter (wrapped in
//! `<inFilter>`) and then any payload elements. A reply's root element is
//! the response atom; it either carries fault attributes or holds the
//! result sections as direct children.

use std::collections::BTreeMap;

use ucsm_protocol::wire::{attr, payload, yes_no};
use ucsm_protocol::{Element, Filter, ManagedObject};

use crate::error::{Error, Result};

/// An RPC call before it is put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
	method: String,
	attributes: Vec<(String, String)>,
	filter: Option<Element>,
	payload: Vec<Element>,
}

impl Request {
	pub fn new(method: impl Into<String>) -> Self {
		Self { method: method.into(), attributes: Vec::new(), filter: None, payload: Vec::new() }
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	/// Sets a scalar parameter. A repeated key replaces the earlier value.
	pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		let key = key.into();
		let value = value.to_string();
		match self.attributes.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => *existing = value,
			None => self.attributes.push((key, value)),
		}
		self
	}

	/// Sets a boolean parameter as `yes`/`no`.
	pub fn flag(self, key: impl Into<String>, value: bool) -> Self {
		self.attr(key, yes_no(value))
	}

	/// Attaches a compiled filter; `None` leaves the request unfiltered.
	pub fn filter(mut self, filter: Option<&Filter>) -> Self {
		self.filter = filter.map(Filter::to_in_filter);
		self
	}

	/// Appends a payload element after the filter and earlier payload.
	pub fn payload(mut self, element: Element) -> Self {
		self.payload.push(element);
		self
	}

	pub fn get_attr(&self, key: &str) -> Option<&str> {
		self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	pub fn to_element(&self) -> Element {
		let mut element = Element::new(&self.method);
		for (key, value) in &self.attributes {
			element.set_attribute(key, value);
		}
		for child in self.filter.iter().chain(&self.payload) {
			element.push_child(child.clone());
		}
		element
	}

	pub fn to_xml(&self) -> String {
		self.to_element().to_string()
	}
}

/// `<name><tag value="..."/>...</name>`, the list form used for DN and id sets.
pub fn value_list<'a>(name: &str, tag: &str, values: impl IntoIterator<Item = &'a str>) -> Element {
	values
		.into_iter()
		.fold(Element::new(name), |list, value| list.with_child(Element::new(tag).with_attribute(attr::VALUE, value)))
}

/// `<inConfig>` around the encoded object. Only the object node is sent;
/// its children are not part of the change.
pub fn in_config(object: &ManagedObject) -> Element {
	Element::new(payload::IN_CONFIG).with_child(object.to_element())
}

/// `<inConfigs>` holding one `<pair key=dn>` per object.
pub fn in_configs<'a>(configs: impl IntoIterator<Item = (&'a str, &'a ManagedObject)>) -> Element {
	configs.into_iter().fold(Element::new(payload::IN_CONFIGS), |list, (dn, object)| {
		list.with_child(Element::new(payload::PAIR).with_attribute(attr::KEY, dn).with_child(object.to_element()))
	})
}

/// A parsed reply, classified as not carrying a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
	atom: Element,
}

impl Reply {
	/// Parses a reply body and fails on any server fault on the atom.
	pub fn parse(body: &str) -> Result<Self> {
		let atom = Element::parse(body)
			.map_err(|e| Error::fatal(format!("Error during XML parsing: {}", e)))?;
		check_fault(&atom)?;
		Ok(Self { atom })
	}

	/// The response atom.
	pub fn atom(&self) -> &Element {
		&self.atom
	}

	/// Fails unless the atom says `response="yes"`.
	pub fn expect_response(&self) -> Result<()> {
		match self.atom.attribute(attr::RESPONSE) {
			Some("yes") => Ok(()),
			Some(other) => Err(Error::fatal(format!("{} replied response=\"{}\"", self.atom.name(), other))),
			None => Err(Error::fatal(format!("{} reply has no response attribute", self.atom.name()))),
		}
	}

	/// Attribute of the atom that must be present.
	pub fn required_attr(&self, name: &str) -> Result<&str> {
		self.atom
			.attribute(name)
			.ok_or_else(|| Error::fatal(format!("Wrong reply syntax: {} has no {}", self.atom.name(), name)))
	}

	/// Result section `name`; absence is fatal.
	pub fn section(&self, name: &str) -> Result<&Element> {
		self.atom
			.child(name)
			.ok_or_else(|| Error::fatal(format!("No {} section in server response", name)))
	}

	/// First object of a single-object section, or `None` if it is empty.
	pub fn single(&self, name: &str) -> Result<Option<ManagedObject>> {
		Ok(self.section(name)?.children().first().map(ManagedObject::from_element))
	}

	/// Every object of a list section, in order.
	pub fn objects(&self, name: &str) -> Result<Vec<ManagedObject>> {
		Ok(self.section(name)?.children().iter().map(ManagedObject::from_element).collect())
	}

	/// `value` of every child of a DN list section, usually `<dn>`.
	pub fn dn_values(&self, name: &str) -> Result<Vec<String>> {
		self.section(name)?
			.children()
			.iter()
			.map(|child| {
				child.attribute(attr::VALUE).map(str::to_owned).ok_or_else(|| {
					Error::fatal(format!("Wrong reply: <{}> without value in {}", child.name(), name))
				})
			})
			.collect()
	}

	/// `<pair key=dn>object</pair>` entries of a section, keyed by DN.
	pub fn pairs(&self, name: &str) -> Result<BTreeMap<String, ManagedObject>> {
		let mut pairs = BTreeMap::new();
		for child in self.section(name)?.children() {
			if child.name() != payload::PAIR {
				return Err(Error::fatal(format!("Wrong reply: non-pair <{}> in {}", child.name(), name)));
			}
			let key = child
				.attribute(attr::KEY)
				.ok_or_else(|| Error::fatal("Wrong reply: received pair does not have key"))?;
			let object = child
				.children()
				.first()
				.ok_or_else(|| Error::fatal("Wrong reply: received pair does not contain a value"))?;
			pairs.insert(key.to_owned(), ManagedObject::from_element(object));
		}
		Ok(pairs)
	}
}

/// Raises the fault carried by `atom`, if any.
fn check_fault(atom: &Element) -> Result<()> {
	let Some(code) = atom.attribute(attr::ERROR_CODE) else {
		return Ok(());
	};
	let code = code
		.trim()
		.parse::<u32>()
		.map_err(|_| Error::fatal(format!("Wrong reply syntax: errorCode {:?} is not a number", code)))?;
	let text = atom.attribute(attr::ERROR_DESCR).unwrap_or_default().to_owned();
	Err(Error::Response { code, text })
}
