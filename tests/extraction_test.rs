//! End-to-end extraction runs against an on-disk content cache.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use cascframe::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use zip::ZipArchive;

const VERSION: &str = "1.0.0.1";

/// Lay out a minimal content cache: one addon with a TOC referencing a
/// single lua file, plus the two interface manifest tables.
fn write_cache(root: &Path) {
    std::fs::create_dir_all(root.join("files/MyAddon")).unwrap();
    std::fs::create_dir_all(root.join("fdid")).unwrap();
    std::fs::write(root.join("version"), format!("{VERSION}\n")).unwrap();
    std::fs::write(
        root.join("files/MyAddon/MyAddon.toc"),
        "## Title: MyAddon\nMyAddon.lua\n",
    )
    .unwrap();
    std::fs::write(root.join("files/MyAddon/MyAddon.lua"), "-- addon code\n").unwrap();
    std::fs::write(
        root.join("fdid/1267335"),
        r#"[{"ID": 1, "FilePath": "MyAddon"}]"#,
    )
    .unwrap();
    std::fs::write(root.join("fdid/1375801"), "[]").unwrap();
}

#[test]
fn directory_mode_produces_versioned_tree_and_product_alias() {
    let cache = tempdir().unwrap();
    let extracts = tempdir().unwrap();
    write_cache(cache.path());

    let mut store = DirectoryStore::open(cache.path()).unwrap();
    let options = ExtractionOptions::new(extracts.path(), "wow");
    let summary = run_extraction(&mut store, &JsonTableReader::new(), &options).unwrap();

    assert_eq!(summary.version, VERSION);
    assert_eq!(summary.written, 2);

    let tree = extracts.path().join(VERSION);
    assert_eq!(
        std::fs::read_to_string(tree.join("MyAddon/MyAddon.toc")).unwrap(),
        "## Title: MyAddon\nMyAddon.lua\n"
    );
    assert_eq!(
        std::fs::read_to_string(tree.join("MyAddon/MyAddon.lua")).unwrap(),
        "-- addon code\n"
    );

    #[cfg(unix)]
    {
        let alias = std::fs::read_link(extracts.path().join("wow")).unwrap();
        assert_eq!(alias, Path::new(VERSION));
        // the alias resolves to the extracted tree
        assert!(
            extracts
                .path()
                .join("wow/MyAddon/MyAddon.lua")
                .exists()
        );
    }
}

#[test]
fn zip_mode_produces_version_and_product_containers() {
    let cache = tempdir().unwrap();
    let extracts = tempdir().unwrap();
    write_cache(cache.path());

    let mut store = DirectoryStore::open(cache.path()).unwrap();
    let options = ExtractionOptions::new(extracts.path(), "wow").with_zip_output(true);
    run_extraction(&mut store, &JsonTableReader::new(), &options).unwrap();

    let read_entry = |container: &str, name: &str| -> String {
        let mut archive =
            ZipArchive::new(File::open(extracts.path().join(container)).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        text
    };

    assert_eq!(
        read_entry("1.0.0.1.zip", "1.0.0.1/MyAddon/MyAddon.lua"),
        "-- addon code\n"
    );
    assert_eq!(
        read_entry("wow.zip", "wow/MyAddon/MyAddon.lua"),
        "-- addon code\n"
    );
}

#[test]
fn exports_work_with_the_crawl_disabled() {
    let cache = tempdir().unwrap();
    let extracts = tempdir().unwrap();
    write_cache(cache.path());

    let mut store = DirectoryStore::open(cache.path()).unwrap();
    let options = ExtractionOptions::new(extracts.path(), "wow")
        .with_skip_framexml(true)
        .with_exports(vec!["manifestinterfacetocdata".to_string()]);
    let summary = run_extraction(&mut store, &JsonTableReader::new(), &options).unwrap();

    assert_eq!(summary.written, 1);
    assert!(
        !extracts
            .path()
            .join(VERSION)
            .join("MyAddon/MyAddon.toc")
            .exists()
    );
    assert!(
        extracts
            .path()
            .join(VERSION)
            .join("db2/manifestinterfacetocdata.db2")
            .exists()
    );
}
