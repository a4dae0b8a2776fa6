// src/error.rs
//! Failure taxonomy for the synthesizer pipeline.
//!
//! Every condition here is a filesystem-state error, not a transient one,
//! so nothing is retried: the run aborts and the operator re-runs after
//! fixing the tree. A partial module graph would silently drop
//! declarations, which is worse than failing loudly.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    /// The configured source root is missing or not a directory.
    /// Reported before any traversal begins.
    #[error("source root {} does not exist or is not a directory", path.display())]
    RootNotFound { path: PathBuf },

    /// I/O failure mid-scan. Fatal: the whole run aborts rather than
    /// emitting declarations derived from a partial tree.
    #[error("traversal failed under {}: {source}", root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// A file stem and a sibling directory name resolved to the same
    /// identifier in the same index file. The original scripting form
    /// merged these silently via set semantics; here the collision is a
    /// hard failure naming both claimants.
    #[error(
        "duplicate module name `{name}` in {}: claimed by file {} and directory {}",
        index_file.display(),
        file.display(),
        dir.display()
    )]
    DuplicateModuleName {
        index_file: PathBuf,
        name: String,
        file: PathBuf,
        dir: PathBuf,
    },

    /// Strict mode only: an existing index file carries content this tool
    /// did not generate, and overwriting it would destroy manual edits.
    #[error("refusing to replace {}: existing file lacks the generated marker", path.display())]
    UnmarkedIndexFile { path: PathBuf },

    /// I/O failure while emitting. Once emission has begun this leaves the
    /// tree in a mixed state, which is surfaced so the caller re-runs
    /// instead of trusting a half-regenerated tree.
    #[error("failed to regenerate index file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SynthError>;
