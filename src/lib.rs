//! asset: track shared files and directories as a forest of assets
//!
//! Assets are aliased, taggable nodes arranged in parent/child trees and
//! persisted per collection as a signed YAML file. Items are either recorded
//! in place or transferred into a collection-wide store root.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mutation;
pub mod store;
pub mod transfer;
pub mod tree;
pub mod types;
