//! Toolchain configuration and the process-wide version descriptor.

use crate::error::ConfigError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

static CURRENT_VERSION: OnceCell<VersionInfo> = OnceCell::new();

/// Version descriptor of the installed toolchain.
///
/// The descriptor is installed once at startup and is reported verbatim by
/// every executor, so concurrent version queries cannot observe different
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionInfo {
    /// Compiler version reported to callers and recorded by telemetry.
    pub version: String,
    /// Standard library version shipped with the toolchain.
    #[serde(default)]
    pub stdlib_version: String,
}

impl VersionInfo {
    pub fn new(version: impl Into<String>, stdlib_version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            stdlib_version: stdlib_version.into(),
        }
    }

    /// Descriptor used when no configuration was installed.
    pub fn development() -> Self {
        VersionInfo::new(concat!(env!("CARGO_PKG_VERSION"), "-dev"), "unversioned")
    }

    /// Install `self` as the process-wide descriptor.
    ///
    /// The first install wins. A later install is rejected and hands the
    /// value back, so startup code can decide whether that is a fault.
    pub fn install(self) -> Result<(), VersionInfo> {
        CURRENT_VERSION.set(self)
    }

    /// The installed descriptor, falling back to [`VersionInfo::development`]
    /// when nothing was installed.
    pub fn current() -> &'static VersionInfo {
        CURRENT_VERSION.get_or_init(VersionInfo::development)
    }
}

impl Default for VersionInfo {
    fn default() -> Self {
        VersionInfo::development()
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (stdlib {})", self.version, self.stdlib_version)
    }
}

/// Settings consumed by environment providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentConfig {
    /// Keep scratch directories after release so failed compilations can be
    /// inspected post mortem.
    #[serde(default)]
    pub keep_scratch: bool,
    /// Variables seeded into every compilation context, e.g. toolchain
    /// locations backends resolve at run time.
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

/// Toolchain configuration, loaded from a TOML file at startup.
///
/// Every section and field has a default, so an empty file (or no file at
/// all) yields a working development configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainConfig {
    /// Version descriptor advertised by this installation.
    #[serde(default)]
    pub toolchain: VersionInfo,
    /// Settings for scoped compilation environments.
    #[serde(default)]
    pub environment: EnvironmentConfig,
}

impl ToolchainConfig {
    /// Read and parse the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|err| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let config = Self::from_toml(&text)?;
        log::debug!("loaded toolchain configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
