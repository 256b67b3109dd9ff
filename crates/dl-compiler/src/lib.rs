//! Domain List Compiler
//!
//! This crate flattens `include` references between domain lists and
//! compiles the result into rule sets for proxy clients.

pub mod compiler;
pub mod filter;
pub mod format;
pub mod resolver;

pub use compiler::{compile, CompileError, RuleGroups};
pub use format::{FormatError, OutputFormat, Quantumult, Rendered, RuleSyntax, Surge};
pub use resolver::{resolve, ResolveError, ResolvedList};
