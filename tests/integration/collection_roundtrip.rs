//! Collection file load/save behavior

use super::test_utils::{genome_collection, new_collection};
use asset::error::StorageError;
use asset::store::{init_collection, is_collection_file, AssetCollection};
use asset::types::NodeId;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_save_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let path = genome_collection(temp_dir.path(), "assets.yaml");
    let original = fs::read_to_string(&path).unwrap();

    let collection = AssetCollection::load(&path).unwrap();
    collection.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    let reloaded = AssetCollection::load(&path).unwrap();
    assert_eq!(reloaded, collection);
    assert!(reloaded.forest.is_consistent());
}

#[test]
fn test_hand_written_file_loads() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("assets.yaml");
    fs::write(
        &path,
        "# asset v0.1.0\n\
         store: /srv/store\n\
         assets:\n\
         \x20 3f2a9c01:\n\
         \x20   alias: [genomes]\n\
         \x20   create_time: '2024-03-01 12:00:00'\n\
         \x20   update_time: '2024-03-01 12:00:00'\n\
         \x20 7b00e1d2:\n\
         \x20   alias: [hg38, GRCh38]\n\
         \x20   tag: [ucsc]\n\
         \x20   item: /srv/store/7b00e1d2.fa.gz\n\
         \x20   size: 983659424\n\
         \x20   md5: 1c9dcaddfa41027f17cd8f7a82c7293b\n\
         \x20   create_time: '2024-03-01 12:05:00'\n\
         \x20   update_time: '2024-03-02 08:00:00'\n\
         \x20   parent: 3f2a9c01\n",
    )
    .unwrap();

    assert!(is_collection_file(&path));
    let collection = AssetCollection::load(&path).unwrap();
    assert_eq!(collection.store, Some(PathBuf::from("/srv/store")));
    let child = NodeId::from("7b00e1d2");
    assert_eq!(
        collection.forest.parent(&child),
        Some(&NodeId::from("3f2a9c01"))
    );
    let node = collection.forest.get(&child).unwrap();
    assert_eq!(node.alias, vec!["hg38", "GRCh38"]);
    assert_eq!(node.size, Some(983659424));
    assert!(collection.owns_item(node.item.as_deref().unwrap()));
}

#[test]
fn test_saved_file_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = genome_collection(temp_dir.path(), "assets.yaml");
    let content = fs::read_to_string(&path).unwrap();

    let first_line = content.lines().next().unwrap();
    assert!(first_line.starts_with("# asset v"));
    assert!(!content.contains("store:"), "unmanaged collections omit the store key");
    assert_eq!(content.matches("parent:").count(), 4);
    assert!(!fs::read_dir(temp_dir.path())
        .unwrap()
        .any(|entry| entry.unwrap().path().extension().map_or(false, |e| e == "tmp")));
}

#[test]
fn test_unsigned_file_is_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("plain.yaml");
    fs::write(&path, "assets: {}\n").unwrap();

    assert!(!is_collection_file(&path));
    assert!(matches!(
        AssetCollection::load(&path),
        Err(StorageError::Format(_))
    ));
    assert!(!is_collection_file(&temp_dir.path().join("missing.yaml")));
}

#[test]
fn test_malformed_body_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.yaml");
    fs::write(&path, "# asset v0.3.0\nassets: [not, a, map\n").unwrap();
    assert!(matches!(
        AssetCollection::load(&path),
        Err(StorageError::Parse { .. })
    ));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = genome_collection(temp_dir.path(), "assets.yaml");

    assert!(matches!(
        init_collection(&path, None, false, false),
        Err(StorageError::AlreadyExists(_))
    ));
    init_collection(&path, None, true, false).unwrap();
    assert!(AssetCollection::load(&path).unwrap().forest.is_empty());
}

#[test]
fn test_init_missing_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("assets.yaml");
    let store = temp_dir.path().join("store");

    assert!(matches!(
        init_collection(&nested, Some(&store), false, false),
        Err(StorageError::MissingDirectory(_))
    ));
    let collection = init_collection(&nested, Some(&store), false, true).unwrap();
    assert!(nested.exists());
    assert!(store.is_dir());
    assert_eq!(collection.store, Some(dunce::canonicalize(&store).unwrap()));

    let empty = new_collection(temp_dir.path(), "empty.yaml");
    assert!(AssetCollection::load(&empty).unwrap().forest.is_empty());
}
