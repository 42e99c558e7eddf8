//! First-listed-collection-wins semantics across several collection files

use super::test_utils::{add_saved, genome_collection, new_collection, with_asset_path};
use asset::api::AssetApi;
use asset::cli::exit_code;
use asset::config::AssetConfig;
use asset::error::AssetError;
use asset::mutation::{DeleteRequest, ModifyRequest};
use asset::store::AssetCollection;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_modify_and_delete_stop_at_first_match() {
    let temp_dir = TempDir::new().unwrap();
    let first = genome_collection(temp_dir.path(), "first.yaml");
    let second = genome_collection(temp_dir.path(), "second.yaml");
    let second_before = fs::read(&second).unwrap();
    let api = AssetApi::new(vec![first.clone(), second.clone()]);

    let mut request = ModifyRequest::new("banana");
    request.description = Some("from the first".to_string());
    let applied = api.modify(&request).unwrap();
    assert_eq!(applied.collection, first);

    let applied = api
        .delete(&DeleteRequest {
            target: "banana".into(),
            recursive: false,
        })
        .unwrap();
    assert_eq!(applied.collection, first);
    assert_eq!(fs::read(&second).unwrap(), second_before);

    // The next delete falls through to the second collection.
    let applied = api
        .delete(&DeleteRequest {
            target: "banana".into(),
            recursive: false,
        })
        .unwrap();
    assert_eq!(applied.collection, second);

    let err = api
        .delete(&DeleteRequest {
            target: "banana".into(),
            recursive: false,
        })
        .unwrap_err();
    assert!(matches!(err, AssetError::NotFound(_)));
}

#[test]
fn test_ambiguity_in_first_collection_is_not_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let first = genome_collection(temp_dir.path(), "first.yaml");
    let second = new_collection(temp_dir.path(), "second.yaml");
    add_saved(&second, &["hg38"], &[], None);
    let api = AssetApi::new(vec![first, second]);

    assert!(matches!(
        api.pull(&"hg38".into()),
        Err(AssetError::AmbiguousPath(_))
    ));
}

#[test]
fn test_avail_lists_every_collection() {
    let temp_dir = TempDir::new().unwrap();
    let first = genome_collection(temp_dir.path(), "first.yaml");
    let second = new_collection(temp_dir.path(), "second.yaml");
    add_saved(&second, &["mm10"], &["mouse"], None);
    let api = AssetApi::new(vec![first, second]);

    let results = api.search(Some(&"mm10".into()), false).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].forest.is_empty());
    assert_eq!(results[1].forest.len(), 1);
}

#[test]
fn test_asset_path_order_and_validation() {
    let temp_dir = TempDir::new().unwrap();
    let first = new_collection(temp_dir.path(), "first.yaml");
    let second = new_collection(temp_dir.path(), "second.yaml");
    let config = AssetConfig::default();

    let paths = with_asset_path(&[second.clone(), first.clone()], || {
        config.collection_paths()
    })
    .unwrap();
    assert_eq!(paths, vec![second.clone(), first.clone()]);

    let stray = temp_dir.path().join("notes.yaml");
    fs::write(&stray, "just: notes\n").unwrap();
    let err = with_asset_path(&[first.clone(), stray], || config.collection_paths()).unwrap_err();
    assert_eq!(exit_code(&err), 2);

    let err = with_asset_path(&[first, temp_dir.path().join("gone.yaml")], || {
        config.collection_paths()
    })
    .unwrap_err();
    assert!(matches!(err, AssetError::ConfigError(_)));
}

#[test]
fn test_add_goes_to_first_listed() {
    let temp_dir = TempDir::new().unwrap();
    let first = new_collection(temp_dir.path(), "first.yaml");
    let second = new_collection(temp_dir.path(), "second.yaml");

    let api = AssetApi::new(vec![second.clone(), first.clone()]);
    api.add(&asset::mutation::AddRequest {
        alias: vec!["hg19".to_string()],
        ..Default::default()
    })
    .unwrap();
    assert_eq!(AssetCollection::load(&second).unwrap().forest.len(), 1);
    assert!(AssetCollection::load(&first).unwrap().forest.is_empty());
}
