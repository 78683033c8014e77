//! Multi-file import resolution via `parse_files`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("protolalr_it_{}", name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn resolves_imports_alongside_entrypoint() {
    let dir = scratch_dir("resolve_ok");
    write(&dir, "dep.proto", r#"syntax = "proto3"; message Dep {}"#);
    let root = write(
        &dir,
        "root.proto",
        r#"syntax = "proto3"; import "dep.proto"; message Root {}"#,
    );

    let empty: [&str; 0] = [];
    let parsed = protolalr::parse_files(&[root.clone()], &empty).expect("resolves both files");
    assert_eq!(parsed.files.len(), 2);
    let root_canon = fs::canonicalize(&root).unwrap();
    assert!(parsed.files.contains_key(&root_canon));
}

#[test]
fn missing_import_reports_not_found() {
    let dir = scratch_dir("resolve_missing");
    let root = write(
        &dir,
        "root.proto",
        r#"syntax = "proto3"; import "missing.proto"; message Root {}"#,
    );

    let empty: [&str; 0] = [];
    let err = protolalr::parse_files(&[root], &empty).unwrap_err();
    assert!(err.message.contains("import not found"), "{}", err.message);
}
