//! Configuration for jenjen.
//!
//! Loaded from (later overrides earlier):
//! 1. Global: `~/.config/jenjen/config.toml`
//! 2. Per-project: `.jenjen/config.toml`
//!
//! Command line flags override both.

use jenjen_synth::{Layout, Limits};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[generate]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Package clause of the emitted program.
    pub package: Option<String>,
    /// Append a `main` that prints the rebuilt file.
    pub entry_point: Option<bool>,
    pub layout: Option<Layout>,
    pub parallel: Option<bool>,
    /// Deepest syntax nesting accepted before giving up.
    pub max_depth: Option<usize>,
}

/// `[verify]` section: executables used by `jenjen verify`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifyConfig {
    pub go: Option<String>,
    pub gofmt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct JenjenConfig {
    pub generate: GenerateConfig,
    pub verify: VerifyConfig,
}

impl JenjenConfig {
    /// Load the global config, then the project config under `root`.
    pub fn load(root: &Path) -> Self {
        Self::load_from(Self::global_config_path().as_deref(), root)
    }

    /// Like [`JenjenConfig::load`] with an explicit global config path.
    pub fn load_from(global: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(path) = global
            && let Some(global) = Self::load_file(path)
        {
            config = config.merge(global);
        }

        let project = root.join(".jenjen").join("config.toml");
        if let Some(project) = Self::load_file(&project) {
            config = config.merge(project);
        }

        config
    }

    fn global_config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(base.join("jenjen").join("config.toml"))
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Fields set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            generate: GenerateConfig {
                package: other.generate.package.or(self.generate.package),
                entry_point: other.generate.entry_point.or(self.generate.entry_point),
                layout: other.generate.layout.or(self.generate.layout),
                parallel: other.generate.parallel.or(self.generate.parallel),
                max_depth: other.generate.max_depth.or(self.generate.max_depth),
            },
            verify: VerifyConfig {
                go: other.verify.go.or(self.verify.go),
                gofmt: other.verify.gofmt.or(self.verify.gofmt),
            },
        }
    }

    pub fn package(&self) -> &str {
        self.generate.package.as_deref().unwrap_or("main")
    }

    pub fn entry_point(&self) -> bool {
        self.generate.entry_point.unwrap_or(false)
    }

    pub fn layout(&self) -> Layout {
        self.generate.layout.unwrap_or_default()
    }

    pub fn parallel(&self) -> bool {
        self.generate.parallel.unwrap_or(false)
    }

    pub fn limits(&self) -> Limits {
        match self.generate.max_depth {
            Some(max_depth) => Limits { max_depth },
            None => Limits::default(),
        }
    }

    pub fn go(&self) -> &str {
        self.verify.go.as_deref().unwrap_or("go")
    }

    pub fn gofmt(&self) -> &str {
        self.verify.gofmt.as_deref().unwrap_or("gofmt")
    }
}
