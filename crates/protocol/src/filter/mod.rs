//! Boolean filter expressions evaluated server-side.
//!
//! A [`Filter`] is either a [`Predicate`] on one property of one class, or a
//! [`Composite`] joining other filters with AND, OR, or NOT. Filters compile
//! to a single XML element and are wrapped in `<inFilter>` when attached to a
//! request.
//!
//! ```ignore
//! let name = Property::new("lsServer", "name");
//! let assoc = Property::new("lsServer", "assocState");
//! let filter = (name.wildcard_match("web-*") | name.equals("db")) & assoc.not_equals("unassociated");
//! ```
//!
//! Composing two nodes with the same AND/OR logic flattens them, so
//! `(a & b) & c` and `a & (b & c)` both produce one AND node with three
//! operands. NOT never flattens.

mod parse;

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::wire::IN_FILTER;
use crate::xml::Element;

/// Comparison applied by a [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	Equals,
	NotEquals,
	GreaterThan,
	GreaterOrEqual,
	LessThan,
	LessOrEqual,
	Wildcard,
	AnyBit,
	AllBits,
}

impl Operator {
	/// Element name used for this operator on the wire.
	pub fn tag(self) -> &'static str {
		match self {
			Self::Equals => "eq",
			Self::NotEquals => "ne",
			Self::GreaterThan => "gt",
			Self::GreaterOrEqual => "ge",
			Self::LessThan => "lt",
			Self::LessOrEqual => "le",
			Self::Wildcard => "wcard",
			Self::AnyBit => "anybit",
			Self::AllBits => "allbit",
		}
	}

	pub fn from_tag(tag: &str) -> Option<Self> {
		Some(match tag {
			"eq" => Self::Equals,
			"ne" => Self::NotEquals,
			"gt" => Self::GreaterThan,
			"ge" => Self::GreaterOrEqual,
			"lt" => Self::LessThan,
			"le" => Self::LessOrEqual,
			"wcard" => Self::Wildcard,
			"anybit" => Self::AnyBit,
			"allbit" => Self::AllBits,
			_ => return None,
		})
	}
}

/// Boolean connective of a [`Composite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Logic {
	And,
	Or,
	Not,
}

impl Logic {
	pub fn tag(self) -> &'static str {
		match self {
			Self::And => "and",
			Self::Or => "or",
			Self::Not => "not",
		}
	}
}

/// A bitmask operand: comma-separated flag tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMask(String);

impl BitMask {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	fn join<T: fmt::Display>(tokens: impl IntoIterator<Item = T>) -> Self {
		let tokens: Vec<String> = tokens.into_iter().map(|t| t.to_string()).collect();
		Self(tokens.join(","))
	}
}

impl From<&str> for BitMask {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}

impl From<String> for BitMask {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl<T: fmt::Display> From<Vec<T>> for BitMask {
	fn from(tokens: Vec<T>) -> Self {
		Self::join(tokens)
	}
}

impl<T: fmt::Display> From<&[T]> for BitMask {
	fn from(tokens: &[T]) -> Self {
		Self::join(tokens)
	}
}

impl<T: fmt::Display, const N: usize> From<[T; N]> for BitMask {
	fn from(tokens: [T; N]) -> Self {
		Self::join(tokens)
	}
}

/// A `(class, property)` pair that predicates are built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
	class_id: String,
	name: String,
}

impl Property {
	pub fn new(class_id: impl Into<String>, name: impl Into<String>) -> Self {
		Self { class_id: class_id.into(), name: name.into() }
	}

	pub fn class_id(&self) -> &str {
		&self.class_id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	fn predicate(&self, operator: Operator, value: String) -> Filter {
		Filter::Predicate(Predicate::new(&self.class_id, &self.name, operator, value))
	}

	pub fn equals(&self, value: impl fmt::Display) -> Filter {
		self.predicate(Operator::Equals, value.to_string())
	}

	pub fn not_equals(&self, value: impl fmt::Display) -> Filter {
		self.predicate(Operator::NotEquals, value.to_string())
	}

	pub fn greater_than(&self, value: impl fmt::Display) -> Filter {
		self.predicate(Operator::GreaterThan, value.to_string())
	}

	pub fn greater_or_equal(&self, value: impl fmt::Display) -> Filter {
		self.predicate(Operator::GreaterOrEqual, value.to_string())
	}

	pub fn less_than(&self, value: impl fmt::Display) -> Filter {
		self.predicate(Operator::LessThan, value.to_string())
	}

	pub fn less_or_equal(&self, value: impl fmt::Display) -> Filter {
		self.predicate(Operator::LessOrEqual, value.to_string())
	}

	/// Matches the property against a server-side wildcard pattern.
	pub fn wildcard_match(&self, pattern: impl fmt::Display) -> Filter {
		self.predicate(Operator::Wildcard, pattern.to_string())
	}

	/// True if any of the given flags is set.
	pub fn any_bit(&self, mask: impl Into<BitMask>) -> Filter {
		self.predicate(Operator::AnyBit, mask.into().0)
	}

	/// True if all of the given flags are set.
	pub fn all_bits(&self, mask: impl Into<BitMask>) -> Filter {
		self.predicate(Operator::AllBits, mask.into().0)
	}
}

/// Leaf of a filter: one comparison on one property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
	class_id: String,
	property: String,
	operator: Operator,
	value: String,
}

impl Predicate {
	pub fn new(
		class_id: impl Into<String>,
		property: impl Into<String>,
		operator: Operator,
		value: impl Into<String>,
	) -> Self {
		Self { class_id: class_id.into(), property: property.into(), operator, value: value.into() }
	}

	pub fn class_id(&self) -> &str {
		&self.class_id
	}

	pub fn property(&self) -> &str {
		&self.property
	}

	pub fn operator(&self) -> Operator {
		self.operator
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn to_element(&self) -> Element {
		Element::new(self.operator.tag())
			.with_attribute("class", &self.class_id)
			.with_attribute("property", &self.property)
			.with_attribute("value", &self.value)
	}
}

/// Branch of a filter: a boolean connective over ordered operands.
///
/// Only built through [`Filter`] composition, which keeps AND/OR nodes flat
/// and NOT nodes unary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Composite {
	logic: Logic,
	operands: Vec<Filter>,
}

impl Composite {
	pub fn logic(&self) -> Logic {
		self.logic
	}

	pub fn operands(&self) -> &[Filter] {
		&self.operands
	}

	pub fn to_element(&self) -> Element {
		self.operands
			.iter()
			.fold(Element::new(self.logic.tag()), |element, operand| element.with_child(operand.to_element()))
	}
}

/// A filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
	Predicate(Predicate),
	Composite(Composite),
}

impl Filter {
	/// Conjunction of `self` and `other`, flattening nested ANDs.
	pub fn and(self, other: Filter) -> Filter {
		Self::compose(Logic::And, self, other)
	}

	/// Disjunction of `self` and `other`, flattening nested ORs.
	pub fn or(self, other: Filter) -> Filter {
		Self::compose(Logic::Or, self, other)
	}

	pub fn negate(self) -> Filter {
		Filter::Composite(Composite { logic: Logic::Not, operands: vec![self] })
	}

	/// Like [`Filter::and`] but accepts any [`Operand`], failing with
	/// [`Error::TypeMismatch`] when it is not a filter.
	pub fn try_and(self, other: impl Into<Operand>) -> Result<Filter> {
		Ok(self.and(other.into().into_filter()?))
	}

	/// Like [`Filter::or`] but accepts any [`Operand`].
	pub fn try_or(self, other: impl Into<Operand>) -> Result<Filter> {
		Ok(self.or(other.into().into_filter()?))
	}

	fn compose(logic: Logic, left: Filter, right: Filter) -> Filter {
		let mut operands = Vec::new();
		for operand in [left, right] {
			match operand {
				Filter::Composite(composite) if composite.logic == logic => {
					operands.extend(composite.operands)
				}
				other => operands.push(other),
			}
		}
		Filter::Composite(Composite { logic, operands })
	}

	pub fn as_predicate(&self) -> Option<&Predicate> {
		match self {
			Filter::Predicate(predicate) => Some(predicate),
			Filter::Composite(_) => None,
		}
	}

	pub fn as_composite(&self) -> Option<&Composite> {
		match self {
			Filter::Composite(composite) => Some(composite),
			Filter::Predicate(_) => None,
		}
	}

	/// Compiles the expression to exactly one element.
	pub fn to_element(&self) -> Element {
		match self {
			Filter::Predicate(predicate) => predicate.to_element(),
			Filter::Composite(composite) => composite.to_element(),
		}
	}

	pub fn to_xml(&self) -> String {
		self.to_element().to_string()
	}

	/// Wraps the compiled expression for use as a request filter.
	pub fn to_in_filter(&self) -> Element {
		Element::new(IN_FILTER).with_child(self.to_element())
	}
}

impl From<Predicate> for Filter {
	fn from(predicate: Predicate) -> Self {
		Filter::Predicate(predicate)
	}
}

impl BitAnd for Filter {
	type Output = Filter;

	fn bitand(self, rhs: Filter) -> Filter {
		self.and(rhs)
	}
}

impl BitOr for Filter {
	type Output = Filter;

	fn bitor(self, rhs: Filter) -> Filter {
		self.or(rhs)
	}
}

impl Not for Filter {
	type Output = Filter;

	fn not(self) -> Filter {
		self.negate()
	}
}

impl fmt::Display for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_element())
	}
}

impl FromStr for Filter {
	type Err = Error;

	/// Parses the text form, e.g. `lsServer.name ~= "web-*" & !lsServer.usrLbl == ""`.
	fn from_str(input: &str) -> Result<Self> {
		parse::parse(input)
	}
}

/// Anything that might be offered to a boolean composition.
///
/// Only the `Filter` variant composes; values exist so callers holding
/// loosely typed input get a [`Error::TypeMismatch`] instead of a silently
/// wrong expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
	Filter(Filter),
	Value(String),
}

impl Operand {
	pub fn into_filter(self) -> Result<Filter> {
		match self {
			Operand::Filter(filter) => Ok(filter),
			Operand::Value(value) => Err(Error::TypeMismatch(format!(
				"cannot combine plain value {value:?} with a filter expression"
			))),
		}
	}
}

impl From<Filter> for Operand {
	fn from(filter: Filter) -> Self {
		Operand::Filter(filter)
	}
}

impl From<Predicate> for Operand {
	fn from(predicate: Predicate) -> Self {
		Operand::Filter(Filter::Predicate(predicate))
	}
}

impl From<&str> for Operand {
	fn from(value: &str) -> Self {
		Operand::Value(value.to_owned())
	}
}

impl From<String> for Operand {
	fn from(value: String) -> Self {
		Operand::Value(value)
	}
}

macro_rules! value_operand {
	($($ty:ty),*) => {
		$(impl From<$ty> for Operand {
			fn from(value: $ty) -> Self {
				Operand::Value(value.to_string())
			}
		})*
	};
}

value_operand!(i32, i64, u32, u64, usize, f64, bool);

#[cfg(test)]
mod tests;
