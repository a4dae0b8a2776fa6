// src/walker.rs
//! Tree Walker: lazy enumeration of source-unit files beneath the root.
//!
//! Ordering is unspecified; downstream aggregation is set-union and does
//! not care. A missing root is reported before the walk is even built, and
//! any error inside the walk aborts the run.

use ignore::WalkBuilder;
use std::path::PathBuf;

use crate::{
    config::SynthConfig,
    error::{
        Result,
        SynthError
    }
};

/// Walk the source root depth-first and yield every file whose extension
/// matches the configured filter. Hidden files and standard VCS noise
/// (`.git/`, gitignored paths) are skipped; symlinks are not followed.
///
/// The returned iterator is restartable only in the sense that calling
/// this function again restarts the walk from scratch.
pub fn walk_source_files(cfg: &SynthConfig) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    let root = cfg.source_root.clone();
    if !root.is_dir() {
        return Err(SynthError::RootNotFound { path: root });
    }

    let ext = cfg.extension().to_string();
    let walker = WalkBuilder::new(&root).standard_filters(true).build();

    Ok(walker.filter_map(move |dent| match dent {
        Err(source) => Some(Err(SynthError::Traversal {
            root: root.clone(),
            source,
        })),
        Ok(dent) => {
            if !dent.file_type().is_some_and(|t| t.is_file()) {
                return None;
            }
            let path = dent.into_path();
            if path.extension().and_then(|e| e.to_str()) == Some(ext.as_str()) {
                Some(Ok(path))
            } else {
                None
            }
        }
    }))
}

/* ================================== Tests ================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::BTreeSet,
        fs
    };
    use tempfile::TempDir;

    fn cfg_for(root: &std::path::Path) -> SynthConfig {
        SynthConfig {
            source_root: root.to_path_buf(),
            ..Default::default()
        }
    }

    fn touch(path: &std::path::Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn missing_root_is_root_not_found() {
        let tmp = TempDir::new().unwrap();
        let cfg = cfg_for(&tmp.path().join("absent"));
        assert!(matches!(
            walk_source_files(&cfg).err(),
            Some(SynthError::RootNotFound { .. })
        ));
    }

    #[test]
    fn file_root_is_root_not_found() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("not_a_dir.rs");
        touch(&file);
        let cfg = cfg_for(&file);
        assert!(walk_source_files(&cfg).is_err());
    }

    #[test]
    fn finds_nested_files_and_filters_extension() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("src");
        touch(&root.join("a/x.rs"));
        touch(&root.join("a/b/y.rs"));
        touch(&root.join("a/notes.md"));
        touch(&root.join("top.rs"));

        let cfg = cfg_for(&root);
        let found: BTreeSet<PathBuf> = walk_source_files(&cfg)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let expect: BTreeSet<PathBuf> = [
            root.join("a/x.rs"),
            root.join("a/b/y.rs"),
            root.join("top.rs"),
        ]
        .into_iter()
        .collect();
        assert_eq!(found, expect);
    }

    #[test]
    fn empty_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let cfg = cfg_for(tmp.path());
        assert_eq!(walk_source_files(&cfg).unwrap().count(), 0);
    }

    #[test]
    fn honors_alternate_extension() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("lib");
        touch(&root.join("m.py"));
        touch(&root.join("m.rs"));

        let cfg = SynthConfig {
            source_root: root.clone(),
            extension: "py".into(),
            ..Default::default()
        };
        let found: Vec<PathBuf> = walk_source_files(&cfg)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(found, vec![root.join("m.py")]);
    }
}
