// src/resolver.rs
//! Module Path Resolver: pure path arithmetic, no filesystem access.
//!
//! For one source file this derives every declaration the tree owes on its
//! account: the file's own stem in its directory's index file, and the name
//! of each nested ancestor directory in *that* directory's parent index.
//!
//! The ancestor climb is deliberate. The original scripting form only
//! registered the file's immediate parent in its grandparent, which left a
//! directory containing nothing but subdirectories undeclared in its own
//! parent. Climbing the whole chain registers every intermediate directory
//! structurally, so the result depends only on which directories hold at
//! least one source file transitively, not on where the files sit.
//!
//! Asymmetry at the top is preserved: a directory directly under the source
//! root is never declared here. The root's own manifest (`lib.rs`,
//! `main.rs`, a package init) is managed outside this tool.

use std::path::{
    Path,
    PathBuf
};

use crate::config::SynthConfig;

/// What kind of tree node claimed a module identifier. A `File` and a
/// `Directory` claiming the same name in the same index file is a naming
/// conflict, not a harmless dedup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    File,
    Directory,
}

/// One module identifier owed to one index file, with the path that
/// produced it kept for conflict reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub index_file: PathBuf,
    pub name: String,
    pub kind: DeclKind,
    pub origin: PathBuf,
}

/// True when the file's stem equals the reserved index stem ("mod" for
/// `mod.rs`). Such a file is a declaration target, never a module.
pub fn is_index_file(cfg: &SynthConfig, file: &Path) -> bool {
    file.file_stem().and_then(|s| s.to_str()) == Some(cfg.index_stem())
}

/// Resolve every declaration implied by one source file. Index files
/// resolve to nothing. The output is idempotent across sibling files: two
/// files in the same directory produce identical directory declarations,
/// which the aggregator's set semantics collapse.
pub fn resolve(cfg: &SynthConfig, file: &Path) -> Vec<Declaration> {
    if is_index_file(cfg, file) {
        return Vec::new();
    }
    let Some(dir) = file.parent() else {
        return Vec::new();
    };
    let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
        return Vec::new();
    };

    let mut decls = vec![Declaration {
        index_file: dir.join(&cfg.index_file_name),
        name: stem.to_string(),
        kind: DeclKind::File,
        origin: file.to_path_buf(),
    }];

    // Climb from the containing directory toward the root, declaring each
    // nested directory in its parent's index. Stops without declaring a
    // directory that sits directly under the root.
    let root = cfg.source_root.as_path();
    let mut d = dir;
    while d != root {
        let Some(g) = d.parent() else { break };
        if g == root {
            break;
        }
        let Some(name) = d.file_name().and_then(|s| s.to_str()) else {
            break;
        };
        decls.push(Declaration {
            index_file: g.join(&cfg.index_file_name),
            name: name.to_string(),
            kind: DeclKind::Directory,
            origin: d.to_path_buf(),
        });
        d = g;
    }

    decls
}

/* ================================== Tests ================================== */
