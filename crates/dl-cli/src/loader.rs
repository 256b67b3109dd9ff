use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dl_core::{List, ListUniverse};
use walkdir::WalkDir;

/// Load every regular file under `root` as a list.
///
/// Files are visited in name order so a name collision always resolves the
/// same way: the file visited last replaces the earlier one.
pub fn load_universe(root: &Path) -> Result<ListUniverse> {
    let mut universe = ListUniverse::new();

    for dir_entry in WalkDir::new(root).sort_by_file_name() {
        let dir_entry =
            dir_entry.with_context(|| format!("Failed to scan '{}'", root.display()))?;
        if !dir_entry.file_type().is_file() {
            continue;
        }

        let list = load_list(dir_entry.path())?;
        let name = list.name().to_string();
        if universe.insert(list).is_some() {
            log::warn!(
                "List '{}' defined more than once, using {}",
                name,
                dir_entry.path().display()
            );
        }
    }

    log::info!("Loaded {} domain lists from {}", universe.len(), root.display());
    Ok(universe)
}

/// Load one list, named after its lowercased file name.
pub fn load_list(path: &Path) -> Result<List> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("'{}' has no file name", path.display()))?;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    let list = List::parse(&name, &content)
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;
    log::debug!("{}: {} entries", list.name(), list.entries().len());
    Ok(list)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn loads_nested_files_with_lowercased_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("CN"), "example.cn\n# comment\n").unwrap();
        fs::write(dir.path().join("nested/Ads"), "full:ad.com @ads\n").unwrap();

        let universe = load_universe(dir.path()).expect("should load");
        assert_eq!(universe.len(), 2);
        assert_eq!(universe.get("cn").map(|l| l.entries().len()), Some(1));
        assert_eq!(universe.get("ads").map(|l| l.entries().len()), Some(1));
    }

    #[test]
    fn empty_and_comment_only_files_give_empty_lists() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("empty"), "").unwrap();
        fs::write(dir.path().join("notes"), "   # just a comment\n\n").unwrap();

        let universe = load_universe(dir.path()).expect("should load");
        assert!(universe.lists().all(|l| l.entries().is_empty()));
        assert_eq!(universe.len(), 2);
    }

    #[test]
    fn parse_error_names_file_and_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("bad"), "ok.com\nweird:foo.com\n").unwrap();

        let err = load_universe(dir.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("bad:2"), "{message}");
        assert!(message.contains("weird"), "{message}");
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_universe(&dir.path().join("absent")).is_err());
    }
}
