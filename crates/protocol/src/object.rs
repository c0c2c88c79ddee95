//! In-memory form of configuration tree nodes.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::dn;
use crate::error::{Error, Result};
use crate::wire::attr;
use crate::xml::Element;

/// A managed object: class id, string attributes, and ordered children.
///
/// Equality is structural over all three parts and recurses into children.
/// `Clone` is a deep copy; no node is shared between the original and the
/// clone.
///
/// Nodes do not store a parent link. Walk the tree with [`ObjectRef`] when
/// the parent of a node is needed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedObject {
	class_id: String,
	attributes: BTreeMap<String, String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	children: Vec<ManagedObject>,
}

impl ManagedObject {
	pub fn new(class_id: impl Into<String>) -> Self {
		Self { class_id: class_id.into(), ..Default::default() }
	}

	pub fn class_id(&self) -> &str {
		&self.class_id
	}

	pub fn set_class_id(&mut self, class_id: impl Into<String>) {
		self.class_id = class_id.into();
	}

	/// Looks up `name` among fixed fields, then in the attribute map.
	pub fn get(&self, name: &str) -> Option<&str> {
		if name == attr::CLASS_ID {
			return Some(&self.class_id);
		}
		self.attributes.get(name).map(String::as_str)
	}

	/// Like [`ManagedObject::get`] but a miss is an error.
	pub fn attr(&self, name: &str) -> Result<&str> {
		self.get(name).ok_or_else(|| Error::NoSuchAttribute {
			class_id: self.class_id.clone(),
			name: name.to_owned(),
		})
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
		self.attributes.insert(name.into(), value.to_string());
	}

	pub fn with_attribute(mut self, name: impl Into<String>, value: impl ToString) -> Self {
		self.set(name, value);
		self
	}

	pub fn remove(&mut self, name: &str) -> Option<String> {
		self.attributes.remove(name)
	}

	pub fn attributes(&self) -> &BTreeMap<String, String> {
		&self.attributes
	}

	pub fn attributes_mut(&mut self) -> &mut BTreeMap<String, String> {
		&mut self.attributes
	}

	pub fn children(&self) -> &[ManagedObject] {
		&self.children
	}

	pub fn children_mut(&mut self) -> &mut Vec<ManagedObject> {
		&mut self.children
	}

	pub fn push_child(&mut self, child: ManagedObject) {
		self.children.push(child);
	}

	pub fn with_child(mut self, child: ManagedObject) -> Self {
		self.children.push(child);
		self
	}

	/// Direct children of class `class_id`, in order.
	pub fn find_children(&self, class_id: &str) -> Vec<&ManagedObject> {
		self.children.iter().filter(|child| child.class_id == class_id).collect()
	}

	pub fn dn(&self) -> Option<&str> {
		self.get(attr::DN)
	}

	/// The `rn` attribute, or the last segment of `dn` when absent.
	pub fn rn(&self) -> Option<&str> {
		self.get(attr::RN).or_else(|| self.dn().map(dn::rn))
	}

	/// Decodes an element and its whole element subtree.
	pub fn from_element(element: &Element) -> Self {
		Self {
			class_id: element.name().to_owned(),
			attributes: element.attributes().map(|(k, v)| (k.to_owned(), v.to_owned())).collect(),
			children: element.children().iter().map(Self::from_element).collect(),
		}
	}

	/// Encodes this node only. Children are left to the caller, which
	/// decides what subtree a request payload carries.
	pub fn to_element(&self) -> Element {
		self.attributes
			.iter()
			.fold(Element::new(&self.class_id), |element, (k, v)| element.with_attribute(k, v))
	}

	/// Encodes this node and every descendant.
	pub fn to_element_tree(&self) -> Element {
		self.children
			.iter()
			.fold(self.to_element(), |element, child| element.with_child(child.to_element_tree()))
	}

	fn write_pretty(&self, f: &mut fmt::Formatter<'_>, depth: usize, recurse: bool) -> fmt::Result {
		let indent = "  ".repeat(depth);
		write!(f, "{indent}{}", self.class_id)?;
		for (name, value) in &self.attributes {
			write!(f, "\n{indent}{name}: {value}")?;
		}
		if recurse {
			for child in &self.children {
				writeln!(f)?;
				child.write_pretty(f, depth + 1, true)?;
			}
		}
		Ok(())
	}
}

/// Class id followed by one `name: value` line per attribute. The alternate
/// form (`{:#}`) also prints children, indented.
impl fmt::Display for ManagedObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.write_pretty(f, 0, f.alternate())
	}
}

/// Borrowed position in an object tree with access to its ancestors.
#[derive(Debug, Clone)]
pub struct ObjectRef<'a> {
	object: &'a ManagedObject,
	ancestors: Vec<&'a ManagedObject>,
}

impl<'a> ObjectRef<'a> {
	pub fn root(object: &'a ManagedObject) -> Self {
		Self { object, ancestors: Vec::new() }
	}

	pub fn object(&self) -> &'a ManagedObject {
		self.object
	}

	pub fn parent(&self) -> Option<ObjectRef<'a>> {
		let (parent, rest) = self.ancestors.split_last()?;
		Some(Self { object: *parent, ancestors: rest.to_vec() })
	}

	pub fn children(&self) -> impl Iterator<Item = ObjectRef<'a>> + '_ {
		self.object.children.iter().map(move |child| {
			let mut ancestors = self.ancestors.clone();
			ancestors.push(self.object);
			Self { object: child, ancestors }
		})
	}

	pub fn depth(&self) -> usize {
		self.ancestors.len()
	}
}
