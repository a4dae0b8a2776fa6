// src/emitter.rs
//! Emitter: deterministic serialization of the aggregated plan, one index
//! file per affected directory.
//!
//! Index file content is fully derived from the tree layout. Overwrites are
//! destructive by contract, so the files are stamped with a generated
//! marker, and an existing file that does not look generated is flagged
//! before anything is written (warning by default, hard failure in strict
//! mode). Each individual write goes through a temp file in the same
//! directory and is renamed into place.

use std::{
    fs,
    io::{
        ErrorKind,
        Write
    },
    path::{
        Path,
        PathBuf
    }
};
use tempfile::NamedTempFile;
use tracing::{
    debug,
    info,
    warn
};

use crate::{
    aggregator::DeclarationPlan,
    config::SynthConfig,
    error::{
        Result,
        SynthError
    }
};

/// First line of every generated index file (when headers are enabled).
pub const GENERATED_MARKER: &str = "// @generated by modsynth. Do not edit by hand.";

const DECL_KEYWORD: &str = "pub mod";
const DECL_TERMINATOR: char = ';';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub written: usize,
    pub unchanged: usize,
}

/// Serialize one module set: optional marker line, then one declaration
/// per identifier in the order given (callers pass sorted sets), no blank
/// lines, trailing newline.
pub fn render<'a, I>(modules: I, header: bool) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    if header {
        out.push_str(GENERATED_MARKER);
        out.push('\n');
    }
    for m in modules {
        out.push_str(DECL_KEYWORD);
        out.push(' ');
        out.push_str(m);
        out.push(DECL_TERMINATOR);
        out.push('\n');
    }
    out
}

/// True when existing content is safe to replace without losing manual
/// work: it carries the marker, is empty, or consists solely of
/// declaration lines (a hand-maintained pure module list is still fully
/// derived from the tree).
pub fn looks_generated(content: &str) -> bool {
    if content.starts_with(GENERATED_MARKER) {
        return true;
    }
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty()
            || (line.starts_with(DECL_KEYWORD)
                && line.ends_with(DECL_TERMINATOR)
                && line.len() > DECL_KEYWORD.len() + 2)
    })
}

/// Write every index file in the plan. All pre-write checks run before the
/// first write so that detectable failures leave the tree untouched; an
/// I/O failure mid-emission is surfaced as a `Write` error so the caller
/// knows the tree is in a mixed state and re-runs.
pub fn write_plan(plan: &DeclarationPlan, cfg: &SynthConfig) -> Result<EmitSummary> {
    // Pass 1: render everything and vet existing files.
    let mut pending: Vec<(PathBuf, String, Option<String>)> = Vec::with_capacity(plan.len());
    for (path, modules) in plan.iter() {
        let rendered = render(modules, cfg.generated_header);
        let existing = read_existing(path)?;
        if let Some(old) = &existing {
            if !looks_generated(old) {
                if cfg.strict {
                    return Err(SynthError::UnmarkedIndexFile {
                        path: path.to_path_buf(),
                    });
                }
                warn!(
                    path = %path.display(),
                    "replacing index file with content this tool did not generate"
                );
            }
        }
        pending.push((path.to_path_buf(), rendered, existing));
    }

    // Pass 2: write, skipping files already at the target content.
    let mut summary = EmitSummary::default();
    for (path, content, existing) in pending {
        if existing.as_deref() == Some(content.as_str()) {
            debug!(path = %path.display(), "index file already up to date");
            summary.unchanged += 1;
            continue;
        }
        write_atomic(&path, &content)?;
        info!(path = %path.display(), "regenerated index file");
        summary.written += 1;
    }
    Ok(summary)
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SynthError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let wrap = |source: std::io::Error| SynthError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(content.as_bytes()).map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}

/* ================================== Tests ================================== */
