use dl_core::{Attribute, Entry};

/// Prefix that turns an attribute selector into an exclusion.
pub const NEGATION_MARKER: char = '!';

/// Check an entry's attributes against an include selector.
///
/// `key` keeps only entries tagged `key`; `!key` keeps every entry that is
/// not tagged `key`.
pub fn matches(attributes: &[Attribute], selector: &str) -> bool {
    if selector.starts_with(NEGATION_MARKER) {
        let target = selector.trim_start_matches(NEGATION_MARKER);
        !Attribute::any_with_key(attributes, target)
    } else {
        Attribute::any_with_key(attributes, selector)
    }
}

/// Entries of `entries` selected by `selector`, in their original order.
pub fn select<'a>(entries: &'a [Entry], selector: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
    entries
        .iter()
        .filter(move |entry| matches(&entry.attributes, selector))
}
