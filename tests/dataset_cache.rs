//! Dataset download and cache behaviour against a loopback HTTP server.

mod common;

use common::{toy_files, FileServer, GENBANK_A, TOY_REGISTRY};
use genomeviz_kit::dataset::{DatasetError, DatasetLoader, DatasetRegistry};
use genomeviz_kit::Link;

fn toy_loader(cache_root: &std::path::Path, base_url: &str) -> DatasetLoader {
    DatasetLoader::from_cache_root(cache_root)
        .expect("embedded registry")
        .with_registry(DatasetRegistry::from_json(TOY_REGISTRY).expect("toy registry"))
        .with_base_url(base_url)
}

#[test]
fn test_first_load_downloads_every_file() {
    let server = FileServer::start(&toy_files());
    let cache = tempfile::tempdir().unwrap();
    let loader = toy_loader(cache.path(), &server.base_url);

    let loaded = loader.load("toy").unwrap();

    assert_eq!(server.hits(), 3);
    assert_eq!(
        server.requested_paths(),
        vec!["/toy/a.gbk", "/toy/b.gbk", "/toy/link.tsv"]
    );

    let cache_dir = cache.path().join("toy");
    assert_eq!(loaded.cache_dir, cache_dir);
    assert_eq!(
        loaded.genbank_files,
        vec![cache_dir.join("a.gbk"), cache_dir.join("b.gbk")]
    );
    assert_eq!(
        std::fs::read_to_string(cache_dir.join("a.gbk")).unwrap(),
        GENBANK_A
    );
    assert_eq!(
        loaded.links,
        vec![
            Link::new("refA", 100, 200, "queryA", 10, 20, 95.5),
            Link::new("refB", 300, 400, "queryB", 30, 40, 88.0),
        ]
    );
}

#[test]
fn test_second_load_is_a_cache_hit() {
    let server = FileServer::start(&toy_files());
    let cache = tempfile::tempdir().unwrap();
    let loader = toy_loader(cache.path(), &server.base_url);

    let first = loader.load("toy").unwrap();
    let hits_after_first = server.hits();
    let mtime = std::fs::metadata(&first.genbank_files[0])
        .unwrap()
        .modified()
        .unwrap();

    let second = loader.load("toy").unwrap();

    assert_eq!(server.hits(), hits_after_first);
    assert_eq!(second.genbank_files, first.genbank_files);
    assert_eq!(second.links, first.links);
    assert_eq!(
        std::fs::metadata(&second.genbank_files[0])
            .unwrap()
            .modified()
            .unwrap(),
        mtime
    );
}

#[test]
fn test_only_missing_files_are_downloaded() {
    let server = FileServer::start(&toy_files());
    let cache = tempfile::tempdir().unwrap();
    let loader = toy_loader(cache.path(), &server.base_url);

    loader.load("toy").unwrap();
    std::fs::remove_file(cache.path().join("toy").join("b.gbk")).unwrap();

    loader.load("toy").unwrap();
    assert_eq!(server.hits(), 4);
    assert_eq!(server.requested_paths().last().unwrap(), "/toy/b.gbk");
}

#[test]
fn test_http_error_is_propagated() {
    // Serve everything except the link file
    let files: Vec<_> = toy_files()
        .into_iter()
        .filter(|(path, _)| !path.ends_with("link.tsv"))
        .collect();
    let server = FileServer::start(&files);
    let cache = tempfile::tempdir().unwrap();
    let loader = toy_loader(cache.path(), &server.base_url);

    let err = loader.load("toy").unwrap_err();
    match err {
        DatasetError::Download(e) => {
            assert_eq!(e.status().map(|s| s.as_u16()), Some(404));
        }
        other => panic!("unexpected error: {other}"),
    }

    let cache_dir = cache.path().join("toy");
    assert!(cache_dir.join("a.gbk").exists());
    assert!(!cache_dir.join("link.tsv").exists());
}

#[test]
fn test_unknown_dataset_never_touches_network() {
    let server = FileServer::start(&toy_files());
    let cache = tempfile::tempdir().unwrap();
    let loader = toy_loader(cache.path(), &server.base_url);

    for name in ["phage", "", "TOY", "../toy"] {
        let err = loader.load(name).unwrap_err();
        assert!(
            matches!(err, DatasetError::UnknownDataset { .. }),
            "{name:?} should be unknown"
        );
    }
    assert_eq!(server.hits(), 0);
}

#[test]
fn test_malformed_link_file_is_reported() {
    let server = FileServer::start(&[
        ("/toy/a.gbk", GENBANK_A),
        ("/toy/b.gbk", GENBANK_A),
        ("/toy/link.tsv", "header\nx\t200\t10\t20\t.\t.\t95.5\trefA\tqueryA\n"),
    ]);
    let cache = tempfile::tempdir().unwrap();
    let loader = toy_loader(cache.path(), &server.base_url);

    let err = loader.load("toy").unwrap_err();
    assert!(matches!(err, DatasetError::Links(_)));
}
