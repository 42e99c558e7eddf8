//! `$ASSETPATH`: ordered, `:`-separated list of collection files

use std::path::PathBuf;

pub const ASSET_PATH_ENV: &str = "ASSETPATH";

/// Split an `$ASSETPATH` value. Empty entries are skipped.
pub fn parse_asset_path(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}
