//! Target rule-file syntaxes.

use std::fmt;
use std::str::FromStr;

use dl_core::{Entry, EntryKind};

/// Outcome of rendering a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Rule line without any group suffix
    Line(String),
    /// Recognized kind the syntax has no rule for (e.g. regexp)
    Skip,
    /// Kind the syntax cannot render at all
    Unsupported,
}

/// One client's rule-line syntax.
pub trait RuleSyntax {
    fn name(&self) -> &'static str;

    fn render(&self, entry: &Entry) -> Rendered;

    /// Whether each line ends with `,<groupKey>` for the group it lands in.
    fn appends_group_key(&self) -> bool;
}

/// Surge rule sets: `DOMAIN-SUFFIX,example.com`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Surge;

impl RuleSyntax for Surge {
    fn name(&self) -> &'static str {
        "surge"
    }

    fn render(&self, entry: &Entry) -> Rendered {
        let verb = match entry.kind {
            EntryKind::Domain => "DOMAIN-SUFFIX",
            EntryKind::Full => "DOMAIN",
            EntryKind::Keyword => "DOMAIN-KEYWORD",
            EntryKind::Regexp => return Rendered::Skip,
            EntryKind::Include => return Rendered::Unsupported,
        };
        Rendered::Line(format!("{verb},{}", entry.value))
    }

    fn appends_group_key(&self) -> bool {
        false
    }
}

/// Quantumult filters: `HOST-SUFFIX,example.com,<policy>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantumult;

impl RuleSyntax for Quantumult {
    fn name(&self) -> &'static str {
        "quantumult"
    }

    fn render(&self, entry: &Entry) -> Rendered {
        let verb = match entry.kind {
            EntryKind::Domain => "HOST-SUFFIX",
            EntryKind::Full => "HOST",
            EntryKind::Keyword => "HOST-KEYWORD",
            EntryKind::Regexp => return Rendered::Skip,
            EntryKind::Include => return Rendered::Unsupported,
        };
        Rendered::Line(format!("{verb},{}", entry.value))
    }

    fn appends_group_key(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Unknown output format: {0} (expected surge, quantumult or quantumultx)")]
    Unknown(String),
}

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Surge,
    /// Also selected by `quantumultx`
    Quantumult,
}

impl OutputFormat {
    pub fn syntax(&self) -> &'static dyn RuleSyntax {
        match self {
            Self::Surge => &Surge,
            Self::Quantumult => &Quantumult,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "surge" => Ok(Self::Surge),
            "quantumult" | "quantumultx" => Ok(Self::Quantumult),
            _ => Err(FormatError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.syntax().name())
    }
}
