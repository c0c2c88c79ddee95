//! Minimal XML element tree for requests and replies.
//!
//! The XML API only ever exchanges elements and attributes. Text, comments,
//! CDATA, and processing instructions carry no meaning, so [`Element::parse`]
//! drops them and the tree holds element children only.

use std::fmt;

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// An XML element with ordered attributes and element children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
	name: String,
	attributes: Vec<(String, String)>,
	children: Vec<Element>,
}

impl Element {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), attributes: Vec::new(), children: Vec::new() }
	}

	/// Tag name of the element.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the value of `key`, if present.
	pub fn attribute(&self, key: &str) -> Option<&str> {
		self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Attributes in document (or insertion) order.
	pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
		self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Sets `key` to `value`, replacing an existing value in place.
	pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();
		match self.attributes.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => *existing = value,
			None => self.attributes.push((key, value)),
		}
	}

	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_attribute(key, value);
		self
	}

	pub fn children(&self) -> &[Element] {
		&self.children
	}

	pub fn push_child(&mut self, child: Element) {
		self.children.push(child);
	}

	pub fn with_child(mut self, child: Element) -> Self {
		self.children.push(child);
		self
	}

	/// First direct child named `name`.
	pub fn child(&self, name: &str) -> Option<&Element> {
		self.children.iter().find(|c| c.name == name)
	}

	/// Parses a document and returns its root element.
	///
	/// Fails on malformed markup, mismatched end tags, a missing root, or
	/// more than one root element.
	pub fn parse(xml: &str) -> Result<Self> {
		let mut reader = Reader::from_str(xml);
		let mut stack: Vec<Element> = Vec::new();
		let mut root: Option<Element> = None;

		loop {
			let event = match reader.read_event() {
				Ok(event) => event,
				Err(err) => {
					return Err(Error::Xml(format!("{err} (at byte {})", reader.buffer_position())));
				}
			};

			match event {
				Event::Start(start) => stack.push(Self::from_start(&start)?),
				Event::Empty(start) => {
					let element = Self::from_start(&start)?;
					Self::attach(&mut stack, &mut root, element)?;
				}
				Event::End(_) => {
					let element = stack
						.pop()
						.ok_or_else(|| Error::Xml("closing tag without a matching opening tag".into()))?;
					Self::attach(&mut stack, &mut root, element)?;
				}
				Event::Eof => break,
				_ => {}
			}
		}

		if let Some(open) = stack.last() {
			return Err(Error::Xml(format!("unexpected end of document inside <{}>", open.name)));
		}
		root.ok_or_else(|| Error::Xml("document has no root element".into()))
	}

	fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
		if let Some(parent) = stack.last_mut() {
			parent.children.push(element);
			return Ok(());
		}
		if root.is_some() {
			return Err(Error::Xml(format!("second root element <{}>", element.name)));
		}
		*root = Some(element);
		Ok(())
	}

	fn from_start(start: &BytesStart<'_>) -> Result<Self> {
		let mut element = Element::new(utf8(start.name().as_ref())?);
		for attribute in start.attributes() {
			let attribute = attribute.map_err(|e| Error::Xml(e.to_string()))?;
			let key = utf8(attribute.key.as_ref())?;
			let value = attribute.unescape_value().map_err(|e| Error::Xml(e.to_string()))?;
			element.attributes.push((key, value.into_owned()));
		}
		Ok(element)
	}
}

fn utf8(bytes: &[u8]) -> Result<String> {
	std::str::from_utf8(bytes).map(str::to_owned).map_err(|e| Error::Xml(e.to_string()))
}

/// Serializes the element and its subtree without an XML declaration.
/// Childless elements use the self-closing form.
impl fmt::Display for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}", self.name)?;
		for (key, value) in &self.attributes {
			write!(f, " {key}=\"{}\"", escape(value.as_str()))?;
		}
		if self.children.is_empty() {
			return f.write_str("/>");
		}
		f.write_str(">")?;
		for child in &self.children {
			write!(f, "{child}")?;
		}
		write!(f, "</{}>", self.name)
	}
}
