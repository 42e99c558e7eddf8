//! Asset forest
//!
//! In-memory representation of one collection's assets: node records, the
//! parent/children edge maps, search path resolution, and the filesystem
//! helpers used to size and digest stored items.

pub mod forest;
pub mod hasher;
pub mod node;
pub mod path;
pub mod resolve;
pub mod walker;

pub use forest::Forest;
pub use node::AssetNode;
pub use resolve::{MatchMode, SearchOptions, SearchPath};
