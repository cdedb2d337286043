//! Reference grammar using nom.
//!
//! Schema files, the adapter and the configuration all name columns as text.
//!
//! ```text
//! tags.name      qualified column       -> FieldMapping::Column
//! name           bare name              -> FieldMapping::Alias (default table)
//! -              skip marker            -> FieldMapping::Skip
//! ```

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, value},
    sequence::{delimited, separated_pair},
    IResult,
};

use crate::adapter::FieldMapping;
use crate::ast::ColumnRef;
use crate::error::{AssemblyError, AssemblyResult};

/// Parse a qualified `table.column` reference.
pub fn parse_column_ref(input: &str) -> AssemblyResult<ColumnRef> {
    run(input, column_ref)
}

/// Parse a field mapping directive.
pub fn parse_field_mapping(input: &str) -> AssemblyResult<FieldMapping> {
    run(input, field_mapping)
}

fn run<'a, T>(input: &'a str, parser: impl FnMut(&'a str) -> IResult<&'a str, T>) -> AssemblyResult<T> {
    match all_consuming(delimited(multispace0, parser, multispace0))(input) {
        Ok((_, parsed)) => Ok(parsed),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(AssemblyError::parse(
            input,
            if e.input.is_empty() {
                "unexpected end of input".to_string()
            } else {
                format!("unexpected '{}'", e.input)
            },
        )),
        Err(nom::Err::Incomplete(_)) => Err(AssemblyError::parse(input, "incomplete input")),
    }
}

/// Parse an identifier (table name, column name).
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn column_ref(input: &str) -> IResult<&str, ColumnRef> {
    map(separated_pair(identifier, char('.'), identifier), |(table, name)| {
        ColumnRef::new(table, name)
    })(input)
}

fn field_mapping(input: &str) -> IResult<&str, FieldMapping> {
    alt((
        value(FieldMapping::Skip, char('-')),
        map(column_ref, FieldMapping::Column),
        map(identifier, |s| FieldMapping::Alias(s.to_string())),
    ))(input)
}
