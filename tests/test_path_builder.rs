//! PathBuilder tests
mod common;

use std::path::{Path, MAIN_SEPARATOR_STR};

use filekit::path::{normalize_path, PathBuilder};
use filekit::{Config, FilekitError};

use common::{fixed_clock, Workspace};

fn native(path: &str) -> String {
    path.replace('/', MAIN_SEPARATOR_STR)
}

// ============================================================================
// Normalization Tests
// ============================================================================

#[test]
fn test_normalize_examples() {
    assert_eq!(normalize_path("/a///b/c/", '/'), "/a/b/c");
    assert_eq!(normalize_path("/a/./b/../c", '/'), "/a/c");
    assert_eq!(normalize_path("../a/../../b", '/'), "../../b");
    assert_eq!(normalize_path("", '/'), ".");
}

#[test]
fn test_normalize_is_idempotent_for_both_separators() {
    let samples = [
        "a/b/c", "a\\b\\..\\c", "//x//y//", "./.././z", "/..", "x/./y/../../..", ".a/..b/...",
    ];
    for sep in ['/', '\\'] {
        for sample in samples {
            let once = normalize_path(sample, sep);
            assert_eq!(normalize_path(&once, sep), once, "sample {:?} sep {:?}", sample, sep);
        }
    }
}

// ============================================================================
// Build Tests
// ============================================================================

#[test]
fn test_date_template_path() {
    let builder = PathBuilder::new("uploads")
        .with_clock(fixed_clock(2024, 3, 5))
        .build_path_name("{year}/{month}", None, None)
        .build_file_name("x", "txt", false);

    assert_eq!(builder.path_name(), Some(native("2024/03").as_str()));
    assert_eq!(builder.file_path_with('/').unwrap(), "uploads/2024/03/x.txt");
}

#[test]
fn test_file_url() {
    let builder = PathBuilder::new("u")
        .with_clock(fixed_clock(2024, 3, 5))
        .build_path_name("{year}/{month}", None, None)
        .build_file_name("x.txt", "", false);

    assert_eq!(builder.file_url(Some("http://host/")).unwrap(), "http://host/u/2024/03/x.txt");
    assert_eq!(builder.file_url(Some("http://host///")).unwrap(), "http://host/u/2024/03/x.txt");
}

#[test]
fn test_url_uses_forward_slashes_for_backslash_base() {
    let builder = PathBuilder::new(r"media\public")
        .build_path_name("avatars", None, None)
        .build_file_name("me", "png", false);
    assert_eq!(builder.file_url(Some("https://cdn")).unwrap(), "https://cdn/media/public/avatars/me.png");
}

#[test]
fn test_rebuild_overwrites() {
    let builder = PathBuilder::new("base")
        .build_path_name("first", None, None)
        .build_file_name("one", "a", false)
        .build_path_name("second", Some("pre"), None)
        .build_file_name("two", "b", false);
    assert_eq!(builder.file_path_with('/').unwrap(), "base/pre/second/two.b");
}

#[test]
fn test_uniqid_file_names_differ() {
    let a = PathBuilder::new("").build_file_name("{uniqid}", "", false);
    let b = PathBuilder::new("").build_file_name("{uniqid}", "", false);
    assert_ne!(a.file_name(), b.file_name());
}

#[test]
fn test_terminal_calls_require_build_steps() {
    let builder = PathBuilder::new("base");
    assert!(matches!(builder.file_url(None), Err(FilekitError::Incomplete(_))));
    assert!(matches!(builder.directory_of(), Err(FilekitError::Incomplete(_))));

    let builder = PathBuilder::new("base").build_file_name("x", "", false);
    assert!(matches!(builder.file_path(), Err(FilekitError::Incomplete("path name"))));
}

// ============================================================================
// Directory Creation Tests
// ============================================================================

#[test]
fn test_create_nested_directory() {
    let ws = Workspace::new();
    let builder = PathBuilder::new(ws.root())
        .with_clock(fixed_clock(2024, 3, 5))
        .build_path_name("{year}/{month}/{day}", Some("images"), None);

    assert!(builder.create_directory(0o755, true).unwrap());
    assert!(ws.path().join("images").join("2024").join("03").join("05").is_dir());

    // Second call finds it already there
    assert!(!builder.create_directory(0o755, true).unwrap());
}

#[test]
fn test_create_without_recursion_needs_parent() {
    let ws = Workspace::new();
    let builder = PathBuilder::new(ws.root()).build_path_name("missing/child", None, None);

    let err = builder.create_directory(0o755, false).unwrap_err();
    assert!(matches!(err, FilekitError::Io(_)));
    assert!(!ws.path().join("missing").exists());
}

#[cfg(unix)]
#[test]
fn test_create_absolute_path_name_ignores_base() {
    let target = Workspace::new();
    let elsewhere = Workspace::new();
    let builder = PathBuilder::new(elsewhere.root())
        .build_path_name(&format!("{}/abs/dir", target.root()), None, None);

    assert!(builder.create_directory(0o755, true).unwrap());
    assert!(target.path().join("abs").join("dir").is_dir());
    assert!(!elsewhere.path().join("abs").exists());
    assert_eq!(builder.directory_path().unwrap(), format!("{}/abs/dir", target.root()));
}

#[test]
fn test_create_uses_config_settings() {
    let ws = Workspace::new();
    let config = Config {
        base_path: ws.root(),
        dir_mode: 0o700,
        ..Config::default()
    };

    let builder = PathBuilder::from_config(&config).build_path_name("cfg/dir", None, None);
    assert!(builder.create_directory_default().unwrap());

    let created = ws.path().join("cfg").join("dir");
    assert!(created.is_dir());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&created).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o077, 0);
    }
}

#[test]
fn test_file_path_lands_in_created_directory() {
    let ws = Workspace::new();
    let builder = PathBuilder::new(ws.root())
        .build_path_name("docs", None, None)
        .build_file_name("report", "pdf", false);
    builder.create_directory(0o755, true).unwrap();

    let file_path = builder.file_path().unwrap();
    std::fs::write(&file_path, b"%PDF-1.4").unwrap();

    assert_eq!(Path::new(&builder.directory_of().unwrap()), ws.path().join("docs"));
    assert_eq!(builder.file_name_of().unwrap(), "report.pdf");
    assert!(ws.path().join("docs").join("report.pdf").is_file());
}
