// src/config.rs
//! Run configuration: where the module tree is rooted, which files count
//! as source units, and what the per-directory index file is called.
//!
//! Values come from built-in defaults, optionally a `modsynth.toml` in the
//! working directory (or an explicit `--config=` path), then CLI flag
//! overrides, in that order.

use serde::{
    Deserialize,
    Serialize
};
use std::{
    fs,
    path::{
        Path,
        PathBuf
    }
};
use tracing::debug;

use crate::error::{
    Result,
    SynthError
};

/// Default config file probed in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "modsynth.toml";

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Directory under which the module tree is rooted. All discovered
    /// paths are descendants of this; nothing outside it is considered.
    pub source_root: PathBuf,
    /// Extension that marks a file as a source unit, without the dot.
    pub extension: String,
    /// Name of the per-directory declaration file.
    pub index_file_name: String,
    /// Prepend the generated-file marker comment to every index file.
    pub generated_header: bool,
    /// Fail instead of warn when an existing index file lacks the marker.
    pub strict: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            extension: "rs".to_string(),
            index_file_name: "mod.rs".to_string(),
            generated_header: true,
            strict: false,
        }
    }
}

impl SynthConfig {
    /// Load from a TOML file, or defaults when `path` is `None` and no
    /// `modsynth.toml` exists. An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => {
                if !p.is_file() {
                    return Err(SynthError::Config(format!(
                        "config file {} not found",
                        p.display()
                    )));
                }
                Some(p.to_path_buf())
            }
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.is_file().then_some(default)
            }
        };

        let mut cfg = match file {
            Some(p) => {
                debug!(path = %p.display(), "loading config file");
                let raw = fs::read_to_string(&p).map_err(|e| {
                    SynthError::Config(format!("reading {}: {e}", p.display()))
                })?;
                toml::from_str(&raw).map_err(|e| {
                    SynthError::Config(format!("parsing {}: {e}", p.display()))
                })?
            }
            None => Self::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Extension with any leading dots stripped ("rs" for both "rs" and ".rs").
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// Stem of the index file name ("mod" for "mod.rs"). Files with this
    /// stem are declaration targets, never modules to declare.
    pub fn index_stem(&self) -> &str {
        Path::new(&self.index_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.index_file_name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_root.as_os_str().is_empty() {
            return Err(SynthError::Config("source_root must not be empty".into()));
        }
        if self.extension().is_empty() {
            return Err(SynthError::Config("extension must not be empty".into()));
        }
        if self.index_stem().is_empty() {
            return Err(SynthError::Config(
                "index_file_name must have a non-empty stem".into(),
            ));
        }
        Ok(())
    }
}

/* ================================== Tests ================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_sane() {
        let cfg = SynthConfig::default();
        assert_eq!(cfg.source_root, PathBuf::from("src"));
        assert_eq!(cfg.extension(), "rs");
        assert_eq!(cfg.index_file_name, "mod.rs");
        assert_eq!(cfg.index_stem(), "mod");
        assert!(cfg.generated_header);
        assert!(!cfg.strict);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn extension_tolerates_leading_dot() {
        let cfg = SynthConfig {
            extension: ".rs".into(),
            ..Default::default()
        };
        assert_eq!(cfg.extension(), "rs");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn loads_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("modsynth.toml");
        fs::write(
            &path,
            "source_root = \"lib\"\nextension = \"py\"\nindex_file_name = \"__init__.py\"\nstrict = true\n",
        )
        .unwrap();

        let cfg = SynthConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.source_root, PathBuf::from("lib"));
        assert_eq!(cfg.extension(), "py");
        assert_eq!(cfg.index_stem(), "__init__");
        assert!(cfg.strict);
        // unspecified fields keep their defaults
        assert!(cfg.generated_header);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = SynthConfig::load(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, SynthError::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("modsynth.toml");
        fs::write(&path, "source_root = \"src\"\nwatch = true\n").unwrap();
        assert!(matches!(
            SynthConfig::load(Some(&path)),
            Err(SynthError::Config(_))
        ));
    }

    #[test]
    fn empty_fields_fail_validation() {
        let cfg = SynthConfig {
            extension: ".".into(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(SynthError::Config(_))));

        let cfg = SynthConfig {
            source_root: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(SynthError::Config(_))));
    }
}
