//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{AssetError, StorageError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &AssetError) -> String {
    match e {
        AssetError::NotFound(search) => format!("No asset matches {}", search),
        _ => e.to_string(),
    }
}

/// Process exit code for an error.
///
/// 2: configuration or an unrecognized collection file. 3: nothing matched in
/// any collection. 4: the request conflicts with the forest. 5: malformed
/// files and filesystem failures.
pub fn exit_code(e: &AssetError) -> i32 {
    match e {
        AssetError::ConfigError(_) | AssetError::StorageError(StorageError::Format(_)) => 2,
        AssetError::NotFound(_) => 3,
        AssetError::AmbiguousPath(_)
        | AssetError::Duplicate { .. }
        | AssetError::HasChildren(_)
        | AssetError::Cycle { .. }
        | AssetError::InvalidRequest(_) => 4,
        AssetError::StorageError(_) => 5,
    }
}
