//! End-to-end connection tests over the memory and local backends.

use files_connection::{
    FileSystem, FilesConnection, Format, MemoryFs, Protocol, ReadOptions, SecretsStore,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn memory_connection(files: &[(&str, &[u8])]) -> FilesConnection {
    let fs = MemoryFs::new();
    for (path, contents) in files {
        fs.put(path, contents.to_vec());
    }
    FilesConnection::with_filesystem("test", FileSystem::Memory(fs))
}

#[tokio::test]
async fn test_read_text() {
    let conn = memory_connection(&[("notes.txt", b"hello world")]);
    let text = conn.read_text("notes.txt", None).await.unwrap();
    assert_eq!(text, "hello world");
}

#[tokio::test]
async fn test_read_csv_with_inference() {
    let conn = memory_connection(&[("data/users.csv", b"id,name\n1,alice\n2,bob\n")]);

    // No input_format: inferred from the .csv extension
    let result = conn
        .read("data/users.csv", None, None, &ReadOptions::default())
        .await
        .unwrap();

    let frame = result.as_frame().unwrap();
    assert_eq!(frame.columns(), ["id", "name"]);
    assert_eq!(frame.get(1, "name"), Some(&json!("bob")));
}

#[tokio::test]
async fn test_read_json_and_jsonl() {
    let conn = memory_connection(&[
        ("config.json", br#"{"debug": true}"# as &[u8]),
        ("events.jsonl", b"{\"id\": 1}\n{\"id\": 2}\n"),
    ]);

    let value = conn.read_json("config.json", None).await.unwrap();
    assert_eq!(value, json!({"debug": true}));

    let records = conn.read_jsonl("events.jsonl", None).await.unwrap();
    assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn test_inference_fails_without_known_extension() {
    let conn = memory_connection(&[("blob.dat", b"....")]);
    let err = conn
        .read("blob.dat", None, None, &ReadOptions::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Cannot infer input format"));
}

#[test]
fn test_invalid_format_string() {
    let err = "pickle".parse::<Format>().unwrap_err();
    assert!(err.to_string().contains("not a valid input format"));
}

#[tokio::test]
async fn test_repeated_reads_return_cached_object() {
    let conn = memory_connection(&[("notes.txt", b"cached")]);
    let options = ReadOptions::default();

    let first = conn.read("notes.txt", None, None, &options).await.unwrap();
    let second = conn.read("notes.txt", None, None, &options).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_zero_ttl_disables_caching() {
    let conn = memory_connection(&[("notes.txt", b"v1")]);
    let options = ReadOptions::default();
    let ttl = Some(Duration::ZERO);

    let first = conn.read("notes.txt", None, ttl, &options).await.unwrap();
    let second = conn.read("notes.txt", None, ttl, &options).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));

    // With caching disabled, updated contents are visible immediately
    if let FileSystem::Memory(fs) = conn.fs() {
        fs.put("notes.txt", b"v2".to_vec());
    }
    let text = conn.read_text("notes.txt", ttl).await.unwrap();
    assert_eq!(text, "v2");
}

#[tokio::test]
async fn test_expired_entries_are_reread() {
    let conn = memory_connection(&[("notes.txt", b"v1")]);
    let ttl = Some(Duration::from_millis(30));

    assert_eq!(conn.read_text("notes.txt", ttl).await.unwrap(), "v1");

    if let FileSystem::Memory(fs) = conn.fs() {
        fs.put("notes.txt", b"v2".to_vec());
    }

    // Within the TTL the stale cached value is served
    assert_eq!(conn.read_text("notes.txt", ttl).await.unwrap(), "v1");

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(conn.read_text("notes.txt", ttl).await.unwrap(), "v2");
}

#[tokio::test]
async fn test_cache_keyed_on_options() {
    let conn = memory_connection(&[("table.csv", b"a;b\n1;2\n")]);

    let default = conn
        .read("table.csv", None, None, &ReadOptions::default())
        .await
        .unwrap();
    let semicolon = conn
        .read(
            "table.csv",
            None,
            None,
            &ReadOptions {
                delimiter: b';',
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Different options are different cache entries and parse differently
    assert!(!Arc::ptr_eq(&default, &semicolon));
    assert_eq!(default.as_frame().unwrap().num_columns(), 1);
    assert_eq!(semicolon.as_frame().unwrap().num_columns(), 2);
}

#[tokio::test]
async fn test_connections_do_not_share_caches() {
    let fs = MemoryFs::new();
    fs.put("notes.txt", b"shared backend".to_vec());

    let a = FilesConnection::with_filesystem("a", FileSystem::Memory(fs.clone()));
    let b = FilesConnection::with_filesystem("b", FileSystem::Memory(fs));

    let from_a = a
        .read("notes.txt", None, None, &ReadOptions::default())
        .await
        .unwrap();
    let from_b = b
        .read("notes.txt", None, None, &ReadOptions::default())
        .await
        .unwrap();
    assert!(!Arc::ptr_eq(&from_a, &from_b));
}

#[tokio::test]
async fn test_open_passthrough() {
    let conn = memory_connection(&[("raw.bin", &[1u8, 2, 3][..])]);
    let mut reader = conn.open("raw.bin").await.unwrap();
    let mut buf = Vec::new();
    std::io::Read::read_to_end(&mut reader, &mut buf).unwrap();
    assert_eq!(buf, [1, 2, 3]);
}

#[tokio::test]
async fn test_missing_file_propagates() {
    let conn = memory_connection(&[]);
    assert!(conn.read_text("missing.txt", None).await.is_err());
}

#[tokio::test]
async fn test_glob_through_fs_handle() {
    let conn = memory_connection(&[
        ("data/a.csv", b"x\n1\n" as &[u8]),
        ("data/b.csv", b"x\n2\n"),
        ("data/c.txt", b"hi"),
    ]);

    let matched = conn.fs().glob("data/*.csv").await.unwrap();
    assert_eq!(matched, vec!["data/a.csv", "data/b.csv"]);
}

#[tokio::test]
async fn test_local_backend_end_to_end() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv_path = dir.path().join("users.csv");
    std::fs::write(&csv_path, "id,name\n7,grace\n").unwrap();

    let conn = FilesConnection::connect("default", None, Default::default())
        .await
        .unwrap();
    assert_eq!(conn.protocol(), Protocol::File);

    let frame = conn
        .read_csv(csv_path.to_str().unwrap(), None, &ReadOptions::default())
        .await
        .unwrap();
    assert_eq!(frame.get(0, "name"), Some(&json!("grace")));
}

#[tokio::test]
async fn test_from_store() {
    let store = SecretsStore::parse(
        r#"
        [connections.scratch]
        protocol = "memory"
        "#,
    )
    .unwrap();

    let conn = FilesConnection::from_store(&store, "scratch", None)
        .await
        .unwrap();
    assert_eq!(conn.protocol(), Protocol::Memory);
    assert_eq!(conn.name(), "scratch");
}
