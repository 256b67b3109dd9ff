use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use dl_compiler::{compile, resolve, RuleGroups};
use dl_core::{List, ListUniverse};

use crate::config::Config;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub lists: usize,
    pub failed: usize,
    pub files: usize,
    pub rules: usize,
    pub skipped: usize,
}

/// Resolve and compile every list in `universe`, writing one file per group.
///
/// A failing list stops the run unless `config.keep_going` is set, in which
/// case it is logged and counted in [`CompileStats::failed`].
pub fn compile_universe(universe: &ListUniverse, config: &Config) -> Result<CompileStats> {
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create '{}'", config.output_dir.display()))?;

    let mut stats = CompileStats::default();
    for list in universe.lists() {
        match compile_list(list, universe, config) {
            Ok(groups) => {
                stats.lists += 1;
                stats.files += groups.len();
                stats.rules += groups.iter().map(|(_, rules)| rules.len()).sum::<usize>();
                stats.skipped += groups.skipped();
            }
            Err(e) if config.keep_going => {
                log::error!("Failed: {e:#}");
                stats.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(stats)
}

fn compile_list(list: &List, universe: &ListUniverse, config: &Config) -> Result<RuleGroups> {
    let resolved = resolve(list, universe)?;
    let groups = compile(&resolved, config.format.syntax())?;

    // Nothing is written for a list with an unusable group key.
    for key in groups.keys() {
        rules_path(&config.output_dir, key)?;
    }
    for (key, rules) in &groups {
        write_rules(&config.output_dir, key, rules)?;
    }
    log::debug!("{}: wrote {} rule files", list.name(), groups.len());

    Ok(groups)
}

/// Path of the file holding group `key`.
///
/// Group keys become bare file names, so a key with a path separator is an
/// error.
pub fn rules_path(output_dir: &Path, key: &str) -> Result<PathBuf> {
    if key.contains(['/', '\\']) {
        bail!("Group '{key}' cannot be used as a file name: it contains a path separator");
    }
    Ok(output_dir.join(format!("{key}.list")))
}

/// Write a group's lines joined by newlines, without a trailing newline.
pub fn write_rules(output_dir: &Path, key: &str, rules: &[String]) -> Result<()> {
    let path = rules_path(output_dir, key)?;
    fs::write(&path, rules.join("\n"))
        .with_context(|| format!("Failed to write '{}'", path.display()))
}
