//! Text syntax for filters.
//!
//! ```text
//! expr    := and ( "|" and )*
//! and     := unary ( "&" unary )*
//! unary   := "!" unary | atom
//! atom    := "(" expr ")" | predicate | value
//! predicate := ident "." ident op value
//! op      := "==" | "!=" | ">=" | "<=" | ">" | "<" | "~=" | "anybit" | "allbit"
//! value   := '"' [^"]* '"' | bare
//! ```
//!
//! A bare value is accepted as an atom so that `lsServer.name == x & 5`
//! reports a type mismatch rather than a syntax error.

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, map, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded, separated_pair, tuple};

use super::{Filter, Operand, Operator, Predicate};
use crate::error::{Error, Result};

#[derive(Debug)]
enum Term {
	Predicate(Predicate),
	Value(String),
	Not(Box<Term>),
	And(Vec<Term>),
	Or(Vec<Term>),
}

impl Term {
	fn build(self) -> Result<Operand> {
		match self {
			Term::Predicate(predicate) => Ok(predicate.into()),
			Term::Value(value) => Ok(Operand::Value(value)),
			Term::Not(inner) => Ok(inner.build()?.into_filter()?.negate().into()),
			Term::And(terms) => Self::fold(terms, |acc, operand| acc.try_and(operand)),
			Term::Or(terms) => Self::fold(terms, |acc, operand| acc.try_or(operand)),
		}
	}

	fn fold(terms: Vec<Term>, combine: fn(Filter, Operand) -> Result<Filter>) -> Result<Operand> {
		let mut terms = terms.into_iter();
		let Some(first) = terms.next() else {
			return Err(Error::TypeMismatch("empty boolean expression".into()));
		};
		let mut acc = first.build()?.into_filter()?;
		for term in terms {
			acc = combine(acc, term.build()?)?;
		}
		Ok(acc.into())
	}

	fn collapse(mut terms: Vec<Term>, wrap: fn(Vec<Term>) -> Term) -> Term {
		if terms.len() == 1 { terms.remove(0) } else { wrap(terms) }
	}
}

pub(super) fn parse(input: &str) -> Result<Filter> {
	match all_consuming(ws(or_expr))(input) {
		Ok((_, term)) => term.build()?.into_filter(),
		Err(nom::Err::Error(err) | nom::Err::Failure(err)) => {
			let offset = input.len() - err.input.len();
			let reason = if err.input.trim().is_empty() {
				format!("unexpected end of input at offset {offset}")
			} else {
				format!("unexpected {:?} at offset {offset}", err.input)
			};
			Err(Error::FilterSyntax { input: input.to_owned(), reason })
		}
		Err(nom::Err::Incomplete(_)) => {
			Err(Error::FilterSyntax { input: input.to_owned(), reason: "incomplete input".into() })
		}
	}
}

fn ws<'a, O>(
	inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
	delimited(multispace0, inner, multispace0)
}

fn or_expr(input: &str) -> IResult<&str, Term> {
	map(separated_list1(ws(char('|')), and_expr), |terms| Term::collapse(terms, Term::Or))(input)
}

fn and_expr(input: &str) -> IResult<&str, Term> {
	map(separated_list1(ws(char('&')), unary), |terms| Term::collapse(terms, Term::And))(input)
}

fn unary(input: &str) -> IResult<&str, Term> {
	alt((map(preceded(ws(char('!')), unary), |term| Term::Not(Box::new(term))), atom))(input)
}

fn atom(input: &str) -> IResult<&str, Term> {
	ws(alt((
		delimited(char('('), ws(or_expr), char(')')),
		map(predicate, Term::Predicate),
		map(literal, Term::Value),
	)))(input)
}

fn predicate(input: &str) -> IResult<&str, Predicate> {
	map(
		tuple((separated_pair(ident, char('.'), ident), ws(operator), literal)),
		|((class_id, property), operator, value)| Predicate::new(class_id, property, operator, value),
	)(input)
}

fn ident(input: &str) -> IResult<&str, &str> {
	take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn operator(input: &str) -> IResult<&str, Operator> {
	alt((
		value(Operator::Equals, tag("==")),
		value(Operator::NotEquals, tag("!=")),
		value(Operator::GreaterOrEqual, tag(">=")),
		value(Operator::LessOrEqual, tag("<=")),
		value(Operator::GreaterThan, tag(">")),
		value(Operator::LessThan, tag("<")),
		value(Operator::Wildcard, tag("~=")),
		value(Operator::AnyBit, tag("anybit")),
		value(Operator::AllBits, tag("allbit")),
	))(input)
}

fn literal(input: &str) -> IResult<&str, String> {
	alt((
		map(delimited(char('"'), take_while(|c: char| c != '"'), char('"')), str::to_owned),
		map(take_while1(|c: char| !c.is_whitespace() && !"()&|!\"".contains(c)), str::to_owned),
	))(input)
}
