// src/synth.rs
//! Pipeline orchestration: Walker → Resolver → Aggregator → Emitter.
//!
//! The plan is built fully before any write happens, and every failure up
//! to that point leaves the tree untouched. `check` runs the same scan but
//! compares against disk instead of writing, for use as a CI gate.

use std::{
    collections::BTreeSet,
    fs,
    path::PathBuf
};
use tracing::debug;

use crate::{
    aggregator::DeclarationPlan,
    config::SynthConfig,
    emitter,
    error::Result,
    resolver,
    walker
};

/// Everything one full scan of the tree learns: the aggregated plan, how
/// many source files fed it, and which on-disk index files the walk saw
/// (used to spot orphans the plan no longer owns).
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub plan: DeclarationPlan,
    pub files_scanned: usize,
    pub index_files_seen: BTreeSet<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub index_files: usize,
    pub written: usize,
    pub unchanged: usize,
}

/// Result of a dry comparison against disk.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Index files whose content differs from the plan.
    pub stale: Vec<PathBuf>,
    /// Index files the plan requires that do not exist yet.
    pub missing: Vec<PathBuf>,
    /// On-disk index files the plan no longer owns (their directory lost
    /// all of its source files). Never deleted, only reported.
    pub orphaned: Vec<PathBuf>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty() && self.orphaned.is_empty()
    }
}

/// Scan the whole tree and fold it into a declaration plan. No writes.
pub fn build_plan(cfg: &SynthConfig) -> Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();
    for file in walker::walk_source_files(cfg)? {
        let file = file?;
        outcome.files_scanned += 1;
        if resolver::is_index_file(cfg, &file) {
            outcome.index_files_seen.insert(file);
            continue;
        }
        for decl in resolver::resolve(cfg, &file) {
            outcome.plan.insert(decl)?;
        }
    }
    debug!(
        files = outcome.files_scanned,
        index_files = outcome.plan.len(),
        "scan complete"
    );
    Ok(outcome)
}

/// Full run: scan, aggregate, regenerate every affected index file.
pub fn synthesize(cfg: &SynthConfig) -> Result<RunSummary> {
    let outcome = build_plan(cfg)?;
    let emitted = emitter::write_plan(&outcome.plan, cfg)?;
    Ok(RunSummary {
        files_scanned: outcome.files_scanned,
        index_files: outcome.plan.len(),
        written: emitted.written,
        unchanged: emitted.unchanged,
    })
}

/// Scan and compare against disk without writing anything.
pub fn check(cfg: &SynthConfig) -> Result<CheckReport> {
    let outcome = build_plan(cfg)?;
    let mut report = CheckReport::default();

    for (path, modules) in outcome.plan.iter() {
        let expected = emitter::render(modules, cfg.generated_header);
        match fs::read_to_string(path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => report.stale.push(path.to_path_buf()),
            Err(_) => report.missing.push(path.to_path_buf()),
        }
    }
    for seen in &outcome.index_files_seen {
        if !outcome.plan.contains(seen) {
            report.orphaned.push(seen.clone());
        }
    }
    Ok(report)
}

/* ================================== Tests ================================== */
