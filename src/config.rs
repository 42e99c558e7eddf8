//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, an
//! explicit `--config` file and `ASSET__*` environment variables. The list of
//! collection files additionally honors `$ASSETPATH`.

use crate::error::{AssetError, StorageError};
use crate::logging::LoggingConfig;
use crate::store::is_collection_file;
use crate::transfer::TransferMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::asset_path::{parse_asset_path, ASSET_PATH_ENV};
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetConfig {
    /// Ordered collection files; the first one receives new assets
    #[serde(default)]
    pub asset_path: Vec<PathBuf>,

    #[serde(default)]
    pub transfer: TransferConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for item transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferConfig {
    #[serde(default)]
    pub mode: TransferMode,

    /// Compute md5 digests of stored files
    #[serde(default = "default_true")]
    pub digest: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            mode: TransferMode::default(),
            digest: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl AssetConfig {
    /// The validated, ordered list of collection files.
    ///
    /// `$ASSETPATH` replaces `asset_path` when set. Every entry must exist and
    /// carry the collection signature; one bad entry rejects the whole list.
    pub fn collection_paths(&self) -> Result<Vec<PathBuf>, AssetError> {
        let paths = match std::env::var(ASSET_PATH_ENV) {
            Ok(value) => parse_asset_path(&value),
            Err(_) => self.asset_path.clone(),
        };
        if paths.is_empty() {
            return Err(AssetError::ConfigError(format!(
                "No asset collection configured; set ${} or `asset_path` in {}",
                ASSET_PATH_ENV,
                global_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the config file".to_string())
            )));
        }
        paths.iter().map(|path| validate_collection(path)).collect()
    }
}

fn validate_collection(path: &Path) -> Result<PathBuf, AssetError> {
    if !path.is_file() {
        return Err(AssetError::ConfigError(format!(
            "Asset collection {} does not exist",
            path.display()
        )));
    }
    if !is_collection_file(path) {
        return Err(StorageError::Format(path.to_path_buf()).into());
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
