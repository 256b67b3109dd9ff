//! Loaded domain lists and the universe they are resolved against.

use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;

use crate::parser::{parse_line, strip_comment, ParseError};
use crate::types::Entry;

/// Error raised when a source line cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{list}:{line_no}: cannot parse `{line}`")]
pub struct LoadError {
    pub list: String,
    /// 1-based line number in the source text
    pub line_no: usize,
    pub line: String,
    #[source]
    pub source: ParseError,
}

/// One source file's unresolved content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    name: String,
    entries: Vec<Entry>,
}

impl List {
    /// Create a list; the name is lowercased.
    pub fn new(name: &str, entries: Vec<Entry>) -> Self {
        Self {
            name: name.to_lowercase(),
            entries,
        }
    }

    /// Parse a list from source text, skipping blank and comment-only lines.
    pub fn parse(name: &str, text: &str) -> Result<Self, LoadError> {
        let name = name.to_lowercase();
        let mut entries = Vec::new();

        for (index, raw_line) in text.lines().enumerate() {
            if strip_comment(raw_line).is_empty() {
                continue;
            }
            let entry = parse_line(raw_line).map_err(|source| LoadError {
                list: name.clone(),
                line_no: index + 1,
                line: raw_line.trim().to_string(),
                source,
            })?;
            entries.push(entry);
        }

        Ok(Self { name, entries })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Every list available for reference, keyed by normalized name.
///
/// Backed by an ordered map so iteration never depends on load order.
#[derive(Debug, Clone, Default)]
pub struct ListUniverse {
    lists: BTreeMap<String, List>,
}

impl ListUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a list, returning the one it replaced if the name was taken.
    pub fn insert(&mut self, list: List) -> Option<List> {
        self.lists.insert(list.name.clone(), list)
    }

    pub fn get(&self, name: &str) -> Option<&List> {
        self.lists.get(name)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Lists in name order.
    pub fn lists(&self) -> btree_map::Values<'_, String, List> {
        self.lists.values()
    }
}

impl FromIterator<List> for ListUniverse {
    fn from_iter<I: IntoIterator<Item = List>>(iter: I) -> Self {
        let mut universe = Self::new();
        for list in iter {
            universe.insert(list);
        }
        universe
    }
}
