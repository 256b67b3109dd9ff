//! Include resolution.
//!
//! A list is flattened in passes. Each pass reads the previous sequence and
//! builds a new one, replacing every `include` entry by the entries of the
//! list it names (or the subset selected by each of its attributes). An
//! inclusion key (`name` or `name@attr`) is expanded at most once per
//! resolved list; later references to the same key are dropped. Passes
//! repeat until one finds no `include` entries left.

use std::collections::BTreeSet;

use dl_core::{Entry, List, ListUniverse};
use serde::Serialize;

use crate::filter;

/// Error type for include resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("{list}: included list '{target}' not found")]
    MissingList { list: String, target: String },
}

/// A list with every `include` expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedList {
    pub name: String,
    /// Inclusion keys already expanded into `entries`
    pub inclusion_keys: BTreeSet<String>,
    pub entries: Vec<Entry>,
}

/// Inclusion key for a reference, optionally scoped by an attribute selector.
pub fn inclusion_key(target: &str, selector: Option<&str>) -> String {
    match selector {
        Some(selector) => format!("{target}@{selector}"),
        None => target.to_string(),
    }
}

pub fn resolve(list: &List, universe: &ListUniverse) -> Result<ResolvedList, ResolveError> {
    let mut inclusion_keys = BTreeSet::new();
    let mut entries = list.entries().to_vec();
    let mut pass = 0usize;

    loop {
        let mut next = Vec::with_capacity(entries.len());
        let mut saw_include = false;
        let mut expanded = 0usize;

        for entry in entries {
            if !entry.is_include() {
                next.push(entry);
                continue;
            }
            saw_include = true;

            let target = entry.value.to_lowercase();
            if entry.attributes.is_empty() {
                if !inclusion_keys.insert(inclusion_key(&target, None)) {
                    continue;
                }
                let referenced = lookup(list, universe, &target)?;
                next.extend_from_slice(referenced.entries());
                expanded += 1;
                continue;
            }

            for attr in &entry.attributes {
                if !inclusion_keys.insert(inclusion_key(&target, Some(attr.key()))) {
                    continue;
                }
                let referenced = lookup(list, universe, &target)?;
                next.extend(filter::select(referenced.entries(), attr.key()).cloned());
                expanded += 1;
            }
        }

        entries = next;
        if !saw_include {
            break;
        }

        pass += 1;
        log::debug!(
            "{}: pass {} expanded {} reference(s), {} entries",
            list.name(),
            pass,
            expanded,
            entries.len()
        );
    }

    Ok(ResolvedList {
        name: list.name().to_string(),
        inclusion_keys,
        entries,
    })
}

fn lookup<'a>(list: &List, universe: &'a ListUniverse, target: &str) -> Result<&'a List, ResolveError> {
    universe.get(target).ok_or_else(|| ResolveError::MissingList {
        list: list.name().to_string(),
        target: target.to_string(),
    })
}
