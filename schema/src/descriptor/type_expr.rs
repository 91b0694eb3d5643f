//! Parser for compact type expressions
//!
//! Grammar, whitespace-insensitive between tokens:
//! - `int`, `String`, `com.acme.Widget` : primitives and named types
//! - `Map<String, List<Widget>>` : parameterized types
//! - `Widget[][]` : one array layer per `[]`
//! - `$T`, `$T extends Number & Bounded` : type variables
//! - `?`, `? extends Number`, `? super Integer` : wildcards

use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::character::complete::multispace0;
use nom::character::complete::multispace1;
use nom::combinator::all_consuming;
use nom::combinator::opt;
use nom::combinator::recognize;
use nom::multi::many0;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::sequence::pair;
use nom::sequence::preceded;
use nom::IResult;
use nom::Parser;

use super::type_ref::PrimitiveKind;
use super::type_ref::TypeRef;
use crate::error::Error;
use crate::error::Result;

/// Parse an identifier (alphanumeric + underscore)
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// `a.b.C` or `a::b::C`
fn qualified_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        identifier,
        many0(pair(alt((tag("::"), tag("."))), identifier)),
    ))
    .parse(input)
}

fn type_args(input: &str) -> IResult<&str, Vec<TypeRef>> {
    delimited(
        (multispace0, char('<'), multispace0),
        separated_list1((multispace0, char(','), multispace0), type_expr),
        (multispace0, char('>')),
    )
    .parse(input)
}

/// `A & B & C`
fn bounds(input: &str) -> IResult<&str, Vec<TypeRef>> {
    separated_list1((multispace0, char('&'), multispace0), type_expr).parse(input)
}

fn keyword<'a>(word: &'static str) -> impl Parser<&'a str, Output = (), Error = nom::error::Error<&'a str>> {
    (multispace1, tag(word), multispace1).map(|_| ())
}

fn named(input: &str) -> IResult<&str, TypeRef> {
    let (input, name) = qualified_name(input)?;
    let (input, args) = opt(type_args).parse(input)?;
    let parsed = match args {
        Some(args) => TypeRef::generic(name, args),
        None => PrimitiveKind::from_str(name)
            .map_or_else(|_| TypeRef::named(name), TypeRef::Primitive),
    };
    Ok((input, parsed))
}

fn variable(input: &str) -> IResult<&str, TypeRef> {
    let (input, name) = preceded(char('$'), identifier).parse(input)?;
    let (input, bounds) = opt(preceded(keyword("extends"), bounds)).parse(input)?;
    Ok((
        input,
        TypeRef::Variable {
            name:   name.to_string(),
            bounds: bounds.unwrap_or_default(),
        },
    ))
}

fn wildcard(input: &str) -> IResult<&str, TypeRef> {
    let (input, _) = char('?').parse(input)?;
    let (input, upper) = opt(preceded(keyword("extends"), bounds)).parse(input)?;
    let (input, lower) = if upper.is_none() {
        opt(preceded(keyword("super"), type_expr)).parse(input)?
    } else {
        (input, None)
    };
    Ok((
        input,
        TypeRef::Wildcard {
            upper: upper.unwrap_or_default(),
            lower: lower.map(Box::new),
        },
    ))
}

fn type_expr(input: &str) -> IResult<&str, TypeRef> {
    let (input, base) = alt((wildcard, variable, named)).parse(input)?;
    let (input, dimensions) = many0((multispace0, tag("[]"))).parse(input)?;
    let parsed = dimensions
        .iter()
        .fold(base, |element, _| TypeRef::array(element));
    Ok((input, parsed))
}

/// Parse a full type expression
pub fn parse(expression: &str) -> Result<TypeRef> {
    all_consuming(delimited(multispace0, type_expr, multispace0))
        .parse(expression)
        .map(|(_, parsed)| parsed)
        .map_err(|e| {
            Error::InvalidTypeExpression {
                expression: expression.to_string(),
                reason:     e.to_string(),
            }
            .into()
        })
}
