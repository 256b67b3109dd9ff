//! Domain List Core Library
//!
//! This crate provides the data model and source-line parser for curated
//! domain lists. Lists are plain text, one rule per line, and may reference
//! each other through `include` entries scoped by attribute tags.
//!
//! # Modules
//!
//! - `types`: Entry kinds, attributes and entries
//! - `parser`: Line parser (comments, domain specs, attributes)
//! - `list`: Loaded lists and the list universe used for resolution

pub mod list;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use list::{List, ListUniverse, LoadError};
pub use parser::{parse_attribute, parse_domain_spec, parse_line, strip_comment, ParseError};
pub use types::{Attribute, Entry, EntryKind};
