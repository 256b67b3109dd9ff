//! Core type definitions for domain lists
//!
//! These types are produced by the entry parser and consumed unchanged by
//! the include resolver and the rule compiler.

use std::fmt;

use serde::Serialize;

// =============================================================================
// Entry Kinds
// =============================================================================

/// Kind of a domain list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Domain and all of its subdomains (default when no kind is given)
    Domain,
    /// Exact domain only
    Full,
    /// Any domain containing the value
    Keyword,
    /// Regular expression over the domain
    Regexp,
    /// Reference to another list by name
    Include,
}

impl EntryKind {
    /// Look up a kind by its lowercase source name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "domain" => Some(Self::Domain),
            "full" => Some(Self::Full),
            "keyword" => Some(Self::Keyword),
            "regexp" => Some(Self::Regexp),
            "include" => Some(Self::Include),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Full => "full",
            Self::Keyword => "keyword",
            Self::Regexp => "regexp",
            Self::Include => "include",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// Tag attached to an entry, e.g. `@ads` or `@cn=100`.
///
/// Keys are always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attribute {
    /// Bare tag (`@key`)
    Bool { key: String },
    /// Tag with an integer value (`@key=N`)
    Int { key: String, value: i64 },
}

impl Attribute {
    pub fn flag(key: impl Into<String>) -> Self {
        Self::Bool { key: key.into() }
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::Int {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Bool { key } | Self::Int { key, .. } => key,
        }
    }

    /// Returns true if any of `attributes` carries `key`.
    pub fn any_with_key(attributes: &[Attribute], key: &str) -> bool {
        attributes.iter().any(|attr| attr.key() == key)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool { key } => write!(f, "@{key}"),
            Self::Int { key, value } => write!(f, "@{key}={value}"),
        }
    }
}

// =============================================================================
// Entries
// =============================================================================

/// One parsed rule line.
///
/// For [`EntryKind::Include`] the value is the normalized name of the
/// referenced list and the attributes select which subset to pull in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    pub kind: EntryKind,
    pub value: String,
    pub attributes: Vec<Attribute>,
}

impl Entry {
    pub fn new(kind: EntryKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[inline]
    pub fn is_include(&self) -> bool {
        self.kind == EntryKind::Include
    }

    /// Returns true if any attribute carries `key`.
    pub fn has_attribute(&self, key: &str) -> bool {
        Attribute::any_with_key(&self.attributes, key)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)?;
        for attr in &self.attributes {
            write!(f, " {attr}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in [
            EntryKind::Domain,
            EntryKind::Full,
            EntryKind::Keyword,
            EntryKind::Regexp,
            EntryKind::Include,
        ] {
            assert_eq!(EntryKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(EntryKind::from_name("weird"), None);
    }

    #[test]
    fn displays_entry_with_attributes() {
        let entry = Entry::new(EntryKind::Full, "foo.com")
            .with_attribute(Attribute::flag("ads"))
            .with_attribute(Attribute::int("cn", 100));
        assert_eq!(entry.to_string(), "full:foo.com @ads @cn=100");
        assert!(entry.has_attribute("cn"));
        assert!(!entry.has_attribute("us"));
    }
}
