// src/commands.rs

use anyhow::{
    anyhow,
    Context,
    Result
};
use std::{
    env,
    path::PathBuf
};
use crate::{
    config::SynthConfig,
    synth
};

pub fn run_cli() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "sync"  => sync(&args[2..])?,
        "plan"  => plan(&args[2..])?,
        "check" => check(&args[2..])?,
        "help" | _ => print_help(),
    }
    Ok(())
}

/// Regenerate every affected index file.
fn sync(args: &[String]) -> Result<()> {
    let cfg = config_from(args)?;
    let summary = synth::synthesize(&cfg).context("sync failed")?;
    println!(
        "Scanned {} source files under {}: {} index files regenerated, {} already current.",
        summary.files_scanned,
        cfg.source_root.display(),
        summary.written,
        summary.unchanged
    );
    Ok(())
}

/// Dry run: print the aggregated plan as JSON, write nothing.
fn plan(args: &[String]) -> Result<()> {
    let cfg = config_from(args)?;
    let outcome = synth::build_plan(&cfg).context("plan failed")?;
    println!("{}", serde_json::to_string_pretty(&outcome.plan.to_json())?);
    Ok(())
}

/// Compare the plan against disk; non-zero exit when anything is off.
fn check(args: &[String]) -> Result<()> {
    let cfg = config_from(args)?;
    let report = synth::check(&cfg).context("check failed")?;
    if report.is_clean() {
        println!("All index files under {} are up to date.", cfg.source_root.display());
        return Ok(());
    }
    for p in &report.missing {
        println!("missing:  {}", p.display());
    }
    for p in &report.stale {
        println!("stale:    {}", p.display());
    }
    for p in &report.orphaned {
        println!("orphaned: {}", p.display());
    }
    Err(anyhow!(
        "index files out of date: {} missing, {} stale, {} orphaned. Run `modsynth sync`.",
        report.missing.len(),
        report.stale.len(),
        report.orphaned.len()
    ))
}

/* ------------------------------ flag parsing ------------------------------ */

#[derive(Debug, Default, PartialEq, Eq)]
struct Flags {
    root: Option<PathBuf>,
    ext: Option<String>,
    index: Option<String>,
    config: Option<PathBuf>,
    strict: bool,
    no_header: bool,
}

/// Supports `--root=PATH --ext=EXT --index=NAME --config=FILE --strict --no-header`.
fn parse_flags(args: &[String]) -> Result<Flags> {
    let mut flags = Flags::default();
    for arg in args {
        let a = arg.trim();
        if let Some(rest) = a.strip_prefix("--root=") {
            flags.root = Some(PathBuf::from(rest));
        } else if let Some(rest) = a.strip_prefix("--ext=") {
            flags.ext = Some(rest.to_string());
        } else if let Some(rest) = a.strip_prefix("--index=") {
            flags.index = Some(rest.to_string());
        } else if let Some(rest) = a.strip_prefix("--config=") {
            flags.config = Some(PathBuf::from(rest));
        } else if a == "--strict" {
            flags.strict = true;
        } else if a == "--no-header" {
            flags.no_header = true;
        } else {
            return Err(anyhow!("unrecognized argument `{a}` (see `modsynth help`)"));
        }
    }
    Ok(flags)
}

/// Config file (if any) with flag overrides applied on top.
fn config_from(args: &[String]) -> Result<SynthConfig> {
    let flags = parse_flags(args)?;
    let mut cfg = SynthConfig::load(flags.config.as_deref())?;
    if let Some(root) = flags.root {
        cfg.source_root = root;
    }
    if let Some(ext) = flags.ext {
        cfg.extension = ext;
    }
    if let Some(index) = flags.index {
        cfg.index_file_name = index;
    }
    if flags.strict {
        cfg.strict = true;
    }
    if flags.no_header {
        cfg.generated_header = false;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn print_help() {
    println!(
r#"modsynth - regenerate per-directory module index files from the tree layout

USAGE:
    modsynth sync  [FLAGS]   # Scan the tree and rewrite every affected index file
    modsynth plan  [FLAGS]   # Print the aggregated declaration plan as JSON (no writes)
    modsynth check [FLAGS]   # Exit non-zero if any index file is missing, stale, or orphaned
    modsynth help            # Show this message

FLAGS:
    --root=PATH       Source root to scan            (default: src)
    --ext=EXT         Source file extension          (default: rs)
    --index=NAME      Index file name per directory  (default: mod.rs)
    --config=FILE     TOML config file               (default: ./modsynth.toml if present)
    --strict          Fail instead of warn when replacing an unmarked index file
    --no-header       Omit the generated-file marker comment

Index file content is fully derived from the tree layout; manual edits to a
generated file do not survive the next sync."#
    );
}

/* ================================== Tests ================================== */

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let flags = parse_flags(&args(&[
            "--root=lib",
            "--ext=py",
            "--index=__init__.py",
            "--strict",
            "--no-header",
        ]))
        .unwrap();
        assert_eq!(flags.root, Some(PathBuf::from("lib")));
        assert_eq!(flags.ext.as_deref(), Some("py"));
        assert_eq!(flags.index.as_deref(), Some("__init__.py"));
        assert!(flags.strict);
        assert!(flags.no_header);
    }

    #[test]
    fn empty_args_are_defaults() {
        assert_eq!(parse_flags(&[]).unwrap(), Flags::default());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse_flags(&args(&["--watch"])).is_err());
        assert!(parse_flags(&args(&["sync"])).is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cfg = config_from(&args(&["--root=crates/core/src", "--no-header"])).unwrap();
        assert_eq!(cfg.source_root, PathBuf::from("crates/core/src"));
        assert_eq!(cfg.extension(), "rs");
        assert!(!cfg.generated_header);
        assert!(!cfg.strict);
    }
}
