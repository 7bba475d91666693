//! Configuration file resolution with global fallback.
//!
//! Resolves where explorer configurations are stored, in priority order:
//!
//! 1. `--file` flag (explicit path)
//! 2. `$ARCHMAP_CONFIG_DIR/configurations.json`
//! 3. `~/.archmap/configurations.json`
//! 4. `./configurations.json` when no home directory is known

use std::path::{Path, PathBuf};

/// Where the configurations file was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--file`.
    Explicit(PathBuf),
    /// The per-user configuration directory.
    Global(PathBuf),
    /// No user directory available; current directory is used.
    Local(PathBuf),
}

impl ConfigSource {
    /// Returns the resolved path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(p) | Self::Global(p) | Self::Local(p) => p,
        }
    }

    /// Returns `true` if the file lives in the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// File name of the configurations document.
const CONFIGURATIONS_FILE: &str = "configurations.json";

/// Resolves the configurations file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    match global_dir {
        Some(dir) => {
            let candidate = dir.join(CONFIGURATIONS_FILE);
            tracing::debug!("Using global configurations: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        None => ConfigSource::Local(PathBuf::from(CONFIGURATIONS_FILE)),
    }
}

/// Returns the global config directory path.
///
/// Resolution: `$ARCHMAP_CONFIG_DIR` > `~/.archmap/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ARCHMAP_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".archmap"))
}
