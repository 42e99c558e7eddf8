//! Shared test utilities for integration tests
//!
//! Serializes access to `$ASSETPATH` and builds small collections on disk.

use asset::mutation::{self, AddRequest};
use asset::store::{init_collection, AssetCollection};
use asset::types::NodeId;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Global mutex to serialize `$ASSETPATH` access across all tests
static ASSET_PATH_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with `$ASSETPATH` set to the given collections, restoring the
/// original value afterwards.
pub fn with_asset_path<F, R>(collections: &[PathBuf], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ASSET_PATH_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::var("ASSETPATH").ok();

    let joined: Vec<String> = collections
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    std::env::set_var("ASSETPATH", joined.join(":"));

    let result = f();

    if let Some(orig) = original {
        std::env::set_var("ASSETPATH", orig);
    } else {
        std::env::remove_var("ASSETPATH");
    }
    result
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Create an empty, unmanaged collection file at `dir/name`.
pub fn new_collection(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    init_collection(&path, None, false, false).unwrap();
    path
}

/// Add a node to the collection file at `path` and save it.
pub fn add_saved(path: &Path, alias: &[&str], tag: &[&str], parent: Option<&str>) -> NodeId {
    let mut collection = AssetCollection::load(path).unwrap();
    let id = mutation::add(
        &mut collection,
        &AddRequest {
            alias: strings(alias),
            tag: strings(tag),
            parent: parent.map(Into::into),
            ..AddRequest::default()
        },
    )
    .unwrap();
    collection.save().unwrap();
    id
}

/// genomes/{human:ucsc/hg38, human:ensembl/hg38}, banana
pub fn genome_collection(dir: &Path, name: &str) -> PathBuf {
    let path = new_collection(dir, name);
    add_saved(&path, &["genomes"], &[], None);
    add_saved(&path, &["human"], &["ucsc"], Some("genomes"));
    add_saved(&path, &["human"], &["ensembl"], Some("genomes"));
    add_saved(&path, &["hg38", "GRCh38"], &[], Some("human:ucsc"));
    add_saved(&path, &["hg38"], &["primary"], Some("human:ensembl"));
    add_saved(&path, &["banana"], &[], None);
    path
}
