use std::collections::btree_map::{self, BTreeMap};

use dl_core::{Attribute, EntryKind};

use crate::format::{Rendered, RuleSyntax};
use crate::resolver::ResolvedList;

/// Error type for rule compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("{list}: {syntax} cannot render {kind} entry '{value}'")]
    UnsupportedKind {
        list: String,
        syntax: &'static str,
        kind: EntryKind,
        value: String,
    },
}

/// Rendered rule lines bucketed by group key (`list` or `list@attr`).
///
/// Lines keep insertion order and duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleGroups {
    groups: BTreeMap<String, Vec<String>>,
    skipped: usize,
}

impl RuleGroups {
    fn add(&mut self, code: &str, rule: &str, attributes: &[Attribute], append_key: bool) {
        self.push(code.to_string(), rule, append_key);
        for attr in attributes {
            self.push(format!("{code}@{}", attr.key()), rule, append_key);
        }
    }

    fn push(&mut self, key: String, rule: &str, append_key: bool) {
        let line = if append_key {
            format!("{rule},{key}")
        } else {
            rule.to_string()
        };
        self.groups.entry(key).or_default().push(line);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Groups in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of entries the syntax skipped (regexp).
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a> IntoIterator for &'a RuleGroups {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Render a resolved list into rule groups for `syntax`.
///
/// Each rendered line lands in the group named after the list, and again in
/// `list@attr` for every attribute on the entry.
pub fn compile(list: &ResolvedList, syntax: &dyn RuleSyntax) -> Result<RuleGroups, CompileError> {
    let mut groups = RuleGroups::default();
    let append_key = syntax.appends_group_key();

    for entry in &list.entries {
        match syntax.render(entry) {
            Rendered::Line(rule) => groups.add(&list.name, &rule, &entry.attributes, append_key),
            Rendered::Skip => {
                log::warn!(
                    "{} does not support {}: {} in {}",
                    syntax.name(),
                    entry.kind,
                    entry.value,
                    list.name
                );
                groups.skipped += 1;
            }
            Rendered::Unsupported => {
                return Err(CompileError::UnsupportedKind {
                    list: list.name.clone(),
                    syntax: syntax.name(),
                    kind: entry.kind,
                    value: entry.value.clone(),
                });
            }
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use dl_core::{Entry, List, ListUniverse};

    use crate::format::{Quantumult, Surge};
    use crate::resolver::resolve;

    use super::*;

    fn resolved(sources: &[(&str, &str)], name: &str) -> ResolvedList {
        let universe: ListUniverse = sources
            .iter()
            .map(|(name, text)| List::parse(name, text).expect("list should parse"))
            .collect();
        resolve(universe.get(name).expect("list exists"), &universe).expect("should resolve")
    }

    fn scenario() -> ResolvedList {
        resolved(
            &[("cn", "example.com\nfull:foo.com @ads"), ("direct", "include:cn @ads")],
            "direct",
        )
    }

    #[test]
    fn surge_groups_by_list_and_attribute() {
        let groups = compile(&scenario(), &Surge).expect("should compile");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("direct"), Some(&["DOMAIN,foo.com".to_string()][..]));
        assert_eq!(groups.get("direct@ads"), Some(&["DOMAIN,foo.com".to_string()][..]));
    }

    #[test]
    fn quantumult_appends_group_key() {
        let groups = compile(&scenario(), &Quantumult).expect("should compile");

        assert_eq!(groups.get("direct"), Some(&["HOST,foo.com,direct".to_string()][..]));
        assert_eq!(
            groups.get("direct@ads"),
            Some(&["HOST,foo.com,direct@ads".to_string()][..])
        );
    }

    #[test]
    fn regexp_is_skipped_not_fatal() {
        let list = resolved(&[("mix", "regexp:^ad\\.\nexample.org")], "mix");

        testing_logger::setup();
        for syntax in [&Surge as &dyn RuleSyntax, &Quantumult] {
            let groups = compile(&list, syntax).expect("should compile");
            assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["mix"]);
            assert_eq!(groups.get("mix").map(<[String]>::len), Some(1));
            assert_eq!(groups.skipped(), 1);

            let expected = format!("{} does not support regexp: ^ad\\. in mix", syntax.name());
            testing_logger::validate(|logs| {
                let warnings: Vec<_> = logs
                    .iter()
                    .filter(|log| log.level == log::Level::Warn)
                    .map(|log| log.body.as_str())
                    .collect();
                assert_eq!(warnings, vec![expected.as_str()]);
            });
        }
    }

    #[test]
    fn include_entry_is_unsupported() {
        let list = ResolvedList {
            name: "raw".to_string(),
            inclusion_keys: Default::default(),
            entries: vec![Entry::new(EntryKind::Include, "cn")],
        };

        let err = compile(&list, &Surge).unwrap_err();
        assert_eq!(
            err,
            CompileError::UnsupportedKind {
                list: "raw".to_string(),
                syntax: "surge",
                kind: EntryKind::Include,
                value: "cn".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_lines_are_preserved_in_order() {
        let list = resolved(&[("dup", "a.com @x\nkeyword:b\na.com")], "dup");
        let groups = compile(&list, &Surge).expect("should compile");

        assert_eq!(
            groups.get("dup"),
            Some(
                &[
                    "DOMAIN-SUFFIX,a.com".to_string(),
                    "DOMAIN-KEYWORD,b".to_string(),
                    "DOMAIN-SUFFIX,a.com".to_string(),
                ][..]
            )
        );
        assert_eq!(groups.get("dup@x"), Some(&["DOMAIN-SUFFIX,a.com".to_string()][..]));
    }
}
