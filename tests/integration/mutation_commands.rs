//! Add, modify and delete through the API and the CLI route table

use super::test_utils::{add_saved, genome_collection, new_collection, strings, with_asset_path};
use asset::api::AssetApi;
use asset::cli::{exit_code, Cli, RunContext};
use asset::config::AssetConfig;
use asset::error::AssetError;
use asset::mutation::{AddRequest, DeleteRequest, ItemRequest, ModifyRequest};
use asset::store::AssetCollection;
use clap::Parser;
use std::fs;
use tempfile::TempDir;

fn run(argv: &[&str]) -> Result<String, AssetError> {
    let cli = Cli::try_parse_from(argv).unwrap();
    RunContext::from_config(AssetConfig::default(), true).execute(&cli.command)
}

#[test]
fn test_duplicate_add_leaves_file_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let path = genome_collection(temp_dir.path(), "assets.yaml");
    let before = fs::read(&path).unwrap();
    let api = AssetApi::new(vec![path.clone()]);

    let err = api
        .add(&AddRequest {
            alias: strings(&["hg38"]),
            parent: Some("human:ucsc".into()),
            ..AddRequest::default()
        })
        .unwrap_err();
    assert!(matches!(err, AssetError::Duplicate { .. }));
    assert_eq!(exit_code(&err), 4);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_failed_modify_performs_no_write() {
    let temp_dir = TempDir::new().unwrap();
    let path = genome_collection(temp_dir.path(), "assets.yaml");
    let before = fs::read(&path).unwrap();
    let api = AssetApi::new(vec![path.clone()]);

    let mut ambiguous = ModifyRequest::new("hg38");
    ambiguous.description = Some("which one?".to_string());
    assert!(matches!(
        api.modify(&ambiguous),
        Err(AssetError::AmbiguousPath(_))
    ));

    let mut unmatched = ModifyRequest::new("zebrafish");
    unmatched.description = Some("nobody".to_string());
    let err = api.modify(&unmatched).unwrap_err();
    assert!(matches!(err, AssetError::NotFound(_)));
    assert_eq!(exit_code(&err), 3);

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_recursive_delete_shrinks_by_subtree() {
    let temp_dir = TempDir::new().unwrap();
    let path = genome_collection(temp_dir.path(), "assets.yaml");
    let api = AssetApi::new(vec![path.clone()]);

    let err = api
        .delete(&DeleteRequest {
            target: "human:ensembl".into(),
            recursive: false,
        })
        .unwrap_err();
    assert!(matches!(err, AssetError::HasChildren(_)));

    let applied = api
        .delete(&DeleteRequest {
            target: "human:ensembl".into(),
            recursive: true,
        })
        .unwrap();
    assert_eq!(applied.value.removed.len(), 2);

    let collection = AssetCollection::load(&path).unwrap();
    assert_eq!(collection.forest.len(), 4);
    assert!(collection.forest.is_consistent());
}

#[test]
fn test_store_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("managed").join("assets.yaml");
    let store = temp_dir.path().join("managed").join("store");
    AssetApi::init(&path, Some(&store), false, true).unwrap();
    let api = AssetApi::new(vec![path.clone()]);

    let reads = temp_dir.path().join("reads.fastq.gz");
    fs::write(&reads, vec![7u8; 2048]).unwrap();
    let mut item = ItemRequest::new(&reads);
    item.mode = asset::transfer::TransferMode::Move;
    let added = api
        .add(&AddRequest {
            alias: strings(&["sample1"]),
            tag: strings(&["rnaseq"]),
            cli: Some("fastq-dump SRR000001".to_string()),
            item: Some(item),
            ..AddRequest::default()
        })
        .unwrap();
    assert!(!reads.exists(), "move leaves nothing behind");

    let stored = api.pull(&"sample1:rnaseq".into()).unwrap();
    assert_eq!(
        stored.file_name().unwrap().to_string_lossy(),
        format!("{}.fastq.gz", added.value)
    );
    assert_eq!(fs::metadata(&stored).unwrap().len(), 2048);

    let collection = AssetCollection::load(&path).unwrap();
    let node = collection.forest.get(&added.value).unwrap();
    assert_eq!(node.size, Some(2048));
    assert_eq!(node.md5.as_ref().map(String::len), Some(32));

    api.delete(&DeleteRequest {
        target: "sample1".into(),
        recursive: false,
    })
    .unwrap();
    assert!(!stored.exists(), "delete releases the stored copy");
}

#[test]
fn test_cli_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("assets.yaml");
    let path_arg = path.to_str().unwrap().to_string();
    let notes = temp_dir.path().join("notes.txt");
    fs::write(&notes, "hello").unwrap();
    let notes_arg = notes.to_str().unwrap().to_string();

    run(&["asset", "init", &path_arg]).unwrap();
    with_asset_path(&[path.clone()], || {
        let out = run(&["asset", "add", "-a", "docs", "-d", "documentation"]).unwrap();
        assert!(out.starts_with("Added asset"));
        run(&["asset", "add", "-a", "notes", "-t", "v1", "-p", "docs", "-i", &notes_arg])
            .unwrap();

        let pulled = run(&["asset", "pull", "docs/notes:v1"]).unwrap();
        assert_eq!(pulled, dunce::canonicalize(&notes).unwrap().display().to_string());

        let listing = run(&["asset", "avail"]).unwrap();
        assert!(listing.contains("docs"));
        assert!(listing.contains("notes:v1"));

        let detail = run(&["asset", "spider", "notes"]).unwrap();
        assert!(detail.contains("documentation"));
        assert!(detail.contains("size=5 B"));

        run(&["asset", "mod", "notes", "-a", "notes", "readme"]).unwrap();
        let json = run(&["asset", "avail", "readme", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["assets"][0]["children"][0]["alias"][1], "readme");

        let err = run(&["asset", "del", "docs"]).unwrap_err();
        assert_eq!(exit_code(&err), 4);
        let out = run(&["asset", "del", "docs", "--recursive"]).unwrap();
        assert!(out.starts_with("Deleted 2 asset(s)"));
    });
    assert!(notes.exists(), "recorded items are never released");
}

#[test]
fn test_listing_skips_collections_without_matches() {
    let temp_dir = TempDir::new().unwrap();
    let first = genome_collection(temp_dir.path(), "genomes.yaml");
    let second = new_collection(temp_dir.path(), "mouse.yaml");
    add_saved(&second, &["mm10"], &["mouse"], None);

    with_asset_path(&[first, second], || {
        let listing = run(&["asset", "avail", "mm10"]).unwrap();
        assert!(listing.contains("mouse.yaml"));
        assert!(!listing.contains("genomes.yaml"));

        let detail = run(&["asset", "spider", "mm10"]).unwrap();
        assert!(!detail.contains("genomes.yaml"));

        let json = run(&["asset", "avail", "mm10", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);

        let everything = run(&["asset", "avail"]).unwrap();
        assert!(everything.contains("genomes.yaml"));
        assert!(everything.contains("mouse.yaml"));
    });
}
