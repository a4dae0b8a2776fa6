// src/aggregator.rs
//! Declaration Aggregator: folds resolver output into one mapping from
//! index file to its deduplicated module set. Pure accumulation, no
//! filesystem access, idempotent under replay.
//!
//! BTreeMaps keep both the index files and the identifiers inside each set
//! in sorted order, so downstream output is deterministic regardless of
//! filesystem enumeration order.

use serde_json::{
    json,
    Value
};
use std::{
    collections::BTreeMap,
    path::{
        Path,
        PathBuf
    }
};

use crate::{
    error::{
        Result,
        SynthError
    },
    resolver::{
        DeclKind,
        Declaration
    }
};

#[derive(Clone, Debug)]
struct DeclSource {
    kind: DeclKind,
    origin: PathBuf,
}

/// The only in-memory aggregate state of a run: index file path → module
/// identifiers it must declare. Built fully before any write happens.
#[derive(Clone, Debug, Default)]
pub struct DeclarationPlan {
    entries: BTreeMap<PathBuf, BTreeMap<String, DeclSource>>,
}

impl DeclarationPlan {
    /// Fold a stream of declarations into a plan, failing on the first
    /// naming conflict.
    pub fn from_declarations<I>(decls: I) -> Result<Self>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut plan = Self::default();
        for decl in decls {
            plan.insert(decl)?;
        }
        Ok(plan)
    }

    /// Insert one declaration. Re-inserting the same identifier from the
    /// same kind of origin is the ordinary idempotent dedup; a file and a
    /// directory claiming the same identifier in the same index file is a
    /// `DuplicateModuleName` failure naming both claimants.
    pub fn insert(&mut self, decl: Declaration) -> Result<()> {
        let set = self.entries.entry(decl.index_file.clone()).or_default();
        match set.get(&decl.name) {
            None => {
                set.insert(
                    decl.name,
                    DeclSource {
                        kind: decl.kind,
                        origin: decl.origin,
                    },
                );
            }
            Some(existing) if existing.kind == decl.kind => {}
            Some(existing) => {
                let (file, dir) = match decl.kind {
                    DeclKind::File => (decl.origin, existing.origin.clone()),
                    DeclKind::Directory => (existing.origin.clone(), decl.origin),
                };
                return Err(SynthError::DuplicateModuleName {
                    index_file: decl.index_file,
                    name: decl.name,
                    file,
                    dir,
                });
            }
        }
        Ok(())
    }

    /// Index files in sorted order, each with its sorted identifiers.
    pub fn iter<'a>(
        &'a self,
    ) -> impl Iterator<Item = (&'a Path, impl Iterator<Item = &'a str> + 'a)> + 'a {
        self.entries
            .iter()
            .map(|(path, set)| (path.as_path(), set.keys().map(String::as_str)))
    }

    /// Sorted identifiers owed to one index file, if any.
    pub fn modules(&self, index_file: &Path) -> Option<Vec<&str>> {
        self.entries
            .get(index_file)
            .map(|set| set.keys().map(String::as_str).collect())
    }

    pub fn contains(&self, index_file: &Path) -> bool {
        self.entries.contains_key(index_file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON rendering for the dry-run surface: summary up top, then one
    /// record per index file with its sorted module list.
    pub fn to_json(&self) -> Value {
        let module_count: usize = self.entries.values().map(BTreeMap::len).sum();
        let index_files: Vec<Value> = self
            .entries
            .iter()
            .map(|(path, set)| {
                json!({
                    "path": path.to_string_lossy(),
                    "modules": set.keys().collect::<Vec<_>>(),
                })
            })
            .collect();

        json!({
            "version": 1,
            "summary": {
                "index_files": self.entries.len(),
                "modules": module_count,
            },
            "index_files": index_files,
        })
    }
}

/* ================================== Tests ================================== */
