//! Tests for storage module

use super::*;
use crate::config::Credentials;
use crate::error::Error;
use bytes::Bytes;
use tempfile::tempdir;
use test_case::test_case;

fn options() -> StorageOptions {
    StorageOptions {
        credentials: Credentials {
            access_key_id: "test-key".to_string(),
            secret_access_key: "test-secret".to_string(),
        },
        region: "us-west-2".to_string(),
        endpoint: None,
    }
}

fn touch(root: &std::path::Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

// ============================================================================
// Glob Tests
// ============================================================================

#[test_case("song_data/*/*/*/*.json", "song_data/A/B/C/TRABCEI128F424C983.json", true ; "song layout")]
#[test_case("song_data/*/*/*/*.json", "song_data/A/B/TRABCEI128F424C983.json", false ; "too shallow")]
#[test_case("log_data/*/*/*.json", "log_data/2018/11/2018-11-12-events.json", true ; "log layout")]
#[test_case("log_data/*/*/*.json", "log_data/2018/11/2018-11-12-events.txt", false ; "wrong extension")]
#[test_case("log_data/*/*/*.json", "log_data/2018/11/x/2018-11-12-events.json", false ; "star does not cross slash")]
#[test_case("data/**.json", "data/a/b/c.json", true ; "double star crosses slash")]
#[test_case("song_data/**/x.json", "song_data/x.json", true ; "double star dir matches zero dirs")]
#[test_case("song_data/**/x.json", "song_data/A/B/C/x.json", true ; "double star dir matches many dirs")]
#[test_case("song_data/**/x.json", "song_data/Ax.json", false ; "double star dir keeps the separator")]
#[test_case("data/file?.json", "data/file1.json", true ; "question mark")]
#[test_case("data/[ab].json", "data/b.json", true ; "char class")]
#[test_case("data/[!ab].json", "data/b.json", false ; "negated char class")]
#[test_case("data/[^ab].json", "data/b.json", false ; "caret negated char class")]
#[test_case("data/[^ab].json", "data/c.json", true ; "caret negated char class matches others")]
#[test_case("data[!ab]x.json", "data/x.json", false ; "negated char class never matches slash")]
#[test_case("data/{x,y}.json", "data/y.json", true ; "alternatives")]
#[test_case("data/a+b.json", "data/a+b.json", true ; "regex metachar is literal")]
fn test_glob_match(pattern: &str, path: &str, expected: bool) {
    let glob = GlobPattern::new(pattern).unwrap();
    assert_eq!(glob.is_match(path), expected);
}

#[test]
fn test_glob_literal_prefix() {
    let glob = GlobPattern::new("song_data/*/*/*/*.json").unwrap();
    assert_eq!(glob.literal_prefix(), &["song_data".to_string()]);

    let glob = GlobPattern::new("/log_data/2018/11/*.json").unwrap();
    assert_eq!(glob.as_str(), "log_data/2018/11/*.json");
    assert_eq!(glob.literal_prefix().len(), 3);

    let glob = GlobPattern::new("single.json").unwrap();
    assert!(glob.literal_prefix().is_empty());
}

#[test_case("" ; "empty")]
#[test_case("data/[ab.json" ; "unclosed class")]
#[test_case("data/{a,b.json" ; "unclosed brace")]
#[test_case("data[/]x.json" ; "slash in class")]
fn test_glob_invalid(pattern: &str) {
    let err = GlobPattern::new(pattern).unwrap_err();
    assert!(matches!(err, Error::InvalidGlob { .. }));
}

// ============================================================================
// Location Tests
// ============================================================================

#[test]
fn test_parse_s3_url_builds_client() {
    let location = StorageLocation::input("s3a://udacity-dend/", &options()).unwrap();
    assert_eq!(location.scheme(), "s3");
    assert!(location.is_cloud());

    let path = location.path(["song_data", "A"]);
    assert_eq!(path.as_ref(), "song_data/A");
}

#[test]
fn test_s3_prefix_is_kept() {
    let location = StorageLocation::output("s3://bucket/lake/v1/", &options()).unwrap();
    let path = location.path(["song", "year=2018"]);
    assert_eq!(path.as_ref(), "lake/v1/song/year=2018");
}

#[test]
fn test_s3_url_without_bucket_rejected() {
    let err = StorageLocation::input("s3:///path", &options()).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "location"));
}

#[test]
fn test_missing_local_input_rejected() {
    let err = StorageLocation::input("/definitely/not/a/dir", &options()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_local_output_created() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("lake");
    let location = StorageLocation::output(root.to_str().unwrap(), &options()).unwrap();
    assert!(root.is_dir());
    assert_eq!(location.scheme(), "file");
    assert!(!location.is_cloud());
}

#[test]
fn test_path_part_slash_is_encoded() {
    let temp = tempdir().unwrap();
    let location = StorageLocation::output(temp.path().to_str().unwrap(), &options()).unwrap();
    let path = location.path(["song", "artist_id=a/b"]);
    assert_eq!(path.parts().count(), 2);
}

#[tokio::test]
async fn test_list_matching_sorted_and_filtered() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "log_data/2018/11/b-events.json", "{}");
    touch(temp.path(), "log_data/2018/11/a-events.json", "{}");
    touch(temp.path(), "log_data/2018/11/_SUCCESS", "");
    touch(temp.path(), "log_data/2018/11/.a-events.json.crc", "");
    touch(temp.path(), "log_data/2018/notes.json", "{}");

    let location = StorageLocation::input(temp.path().to_str().unwrap(), &options()).unwrap();
    let glob = GlobPattern::new("log_data/*/*/*.json").unwrap();
    let matched = location.list_matching(&glob).await.unwrap();

    let names: Vec<&str> = matched.iter().map(|p| p.as_ref()).collect();
    assert_eq!(
        names,
        vec![
            "log_data/2018/11/a-events.json",
            "log_data/2018/11/b-events.json"
        ]
    );
}

#[tokio::test]
async fn test_list_matching_no_files_is_empty() {
    let temp = tempdir().unwrap();
    let location = StorageLocation::input(temp.path().to_str().unwrap(), &options()).unwrap();
    let glob = GlobPattern::new("song_data/*/*/*/*.json").unwrap();
    assert!(location.list_matching(&glob).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_write_read_and_delete_prefix() {
    let temp = tempdir().unwrap();
    let location = StorageLocation::output(temp.path().to_str().unwrap(), &options()).unwrap();

    let a = location.path(["user", "part-00000.parquet"]);
    let b = location.path(["user", "x=1", "part-00000.parquet"]);
    let other = location.path(["users_backup", "keep.parquet"]);
    location.write(&a, Bytes::from_static(b"a")).await.unwrap();
    location.write(&b, Bytes::from_static(b"b")).await.unwrap();
    location.write(&other, Bytes::from_static(b"c")).await.unwrap();

    assert_eq!(location.read(&b).await.unwrap(), Bytes::from_static(b"b"));

    let removed = location.delete_prefix(["user"]).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(location.read(&other).await.unwrap(), Bytes::from_static(b"c"));
}
