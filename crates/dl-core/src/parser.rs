//! Line parser for domain list source files.
//!
//! ```text
//! line      := [ws] spec { ws attribute } [ws] ['#' comment]
//! spec      := value | kind ':' value
//! attribute := '@' key [ '=' integer ]
//! ```

use std::num::ParseIntError;

use crate::types::{Attribute, Entry, EntryKind};

/// Error type for a single malformed line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty entry")]
    Empty,
    #[error("Invalid format: {0}")]
    InvalidSpec(String),
    #[error("Unknown entry kind '{kind}' in {spec}")]
    UnknownKind { kind: String, spec: String },
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
    #[error("Invalid attribute value in {token}")]
    InvalidAttributeValue {
        token: String,
        #[source]
        source: ParseIntError,
    },
}

/// Drop everything from the first `#` on and trim the rest.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
    .trim()
}

/// Split a domain spec into its kind and lowercased value.
///
/// A spec without `:` is a plain domain.
pub fn parse_domain_spec(token: &str) -> Result<(EntryKind, String), ParseError> {
    let Some((kind, value)) = token.split_once(':') else {
        return Ok((EntryKind::Domain, token.to_lowercase()));
    };

    if value.contains(':') {
        return Err(ParseError::InvalidSpec(token.to_string()));
    }

    let kind_name = kind.to_lowercase();
    let kind = EntryKind::from_name(&kind_name).ok_or_else(|| ParseError::UnknownKind {
        kind: kind_name,
        spec: token.to_string(),
    })?;

    Ok((kind, value.to_lowercase()))
}

pub fn parse_attribute(token: &str) -> Result<Attribute, ParseError> {
    let body = token
        .strip_prefix('@')
        .ok_or_else(|| ParseError::InvalidAttribute(token.to_string()))?;

    // Only the piece between the first and second `=` is the value.
    let mut parts = body.split('=');
    let key = parts.next().unwrap_or_default().to_lowercase();
    let raw_value = parts.next();

    match raw_value {
        None => Ok(Attribute::Bool { key }),
        Some(raw) => raw
            .parse::<i64>()
            .map(|value| Attribute::Int { key, value })
            .map_err(|source| ParseError::InvalidAttributeValue {
                token: token.to_string(),
                source,
            }),
    }
}

/// Parse one source line into an entry.
///
/// Blank and comment-only lines yield [`ParseError::Empty`]; callers that
/// read whole files skip them before getting here.
pub fn parse_line(line: &str) -> Result<Entry, ParseError> {
    let mut tokens = strip_comment(line).split_whitespace();
    let spec = tokens.next().ok_or(ParseError::Empty)?;
    let (kind, value) = parse_domain_spec(spec)?;
    let attributes = tokens.map(parse_attribute).collect::<Result<Vec<_>, _>>()?;

    Ok(Entry {
        kind,
        value,
        attributes,
    })
}
