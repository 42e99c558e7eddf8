//! Core types for the asset tracker.

use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format recorded in `create_time` / `update_time` (seconds resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// NodeId: opaque 8-hex-digit asset identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generate a random id not present in `is_taken`.
    pub fn generate<F>(is_taken: F) -> Self
    where
        F: Fn(&NodeId) -> bool,
    {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = NodeId(format!("{:08x}", rng.gen::<u32>()));
            if !is_taken(&candidate) {
                return candidate;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current local time in the collection timestamp format
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
