/// End-to-end scanner tests against real temporary directory trees.
///
/// These exercise root validation, the jwalk-based walk, bottom-up
/// aggregation and result assembly together, with `tempfile` providing an
/// isolated filesystem per test. Unreadable files are simulated with a
/// custom `SizeProbe` because permission bits are ignored when tests run
/// as root.
use foldergauge_core::scanner::multi::ScanTarget;
use foldergauge_core::scanner::path::sanitize_input;
use foldergauge_core::scanner::probe::{FsProbe, SizeProbe};
use foldergauge_core::{
    scan, CategoryTable, ScanError, ScanOptions, ScanResult, Scanner, SkipKind,
};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    fs::write(path, vec![0u8; n]).unwrap();
}

/// ```text
/// root/
///   a.mp4     (2048 bytes)
///   b.txt     (512 bytes)
///   sub/
///     c.jpg   (100 bytes)
/// ```
fn build_scenario_tree(root: &Path) {
    fs::create_dir_all(root.join("sub")).unwrap();
    write_bytes(&root.join("a.mp4"), 2048);
    write_bytes(&root.join("b.txt"), 512);
    write_bytes(&root.join("sub").join("c.jpg"), 100);
}

/// Sum of the sizes actually read, taken from the folder-independent
/// category totals.
fn category_sum(result: &ScanResult) -> u64 {
    result.category_totals.iter().map(|(_, s)| s.total_size).sum()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn scenario_tree_totals_rankings_and_folder_map() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_scenario_tree(tmp.path());

    let result = scan(tmp.path(), 2).expect("scan must succeed");
    let root = result.root.clone();
    assert_eq!(root, tmp.path());

    let totals = &result.category_totals;
    assert_eq!(totals.size_of("Videos"), 2048);
    assert_eq!(totals.size_of("Documents"), 512);
    assert_eq!(totals.size_of("Images"), 100);
    assert_eq!(totals.size_of("Music"), 0);
    assert_eq!(totals.size_of("Other"), 0);

    let top: Vec<(&Path, u64)> = result
        .top_files
        .iter()
        .map(|f| (f.path.as_path(), f.size))
        .collect();
    assert_eq!(
        top,
        vec![
            (root.join("a.mp4").as_path(), 2048),
            (root.join("b.txt").as_path(), 512)
        ]
    );

    assert_eq!(result.folder_sizes.len(), 2);
    assert_eq!(result.folder_size(&root), Some(2660));
    assert_eq!(result.folder_size(root.join("sub")), Some(100));

    assert_eq!(result.top_folders.len(), 2);
    assert_eq!(result.top_folders[0].path, root);
    assert_eq!(result.top_folders[0].file_count, 3);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.file_count, 3);
    assert_eq!(result.dir_count, 2);
}

#[test]
fn root_total_equals_sum_of_every_file() {
    let tmp = TempDir::new().unwrap();
    let deep = tmp.path().join("a").join("b").join("c");
    fs::create_dir_all(&deep).unwrap();
    write_bytes(&tmp.path().join("top.bin"), 10);
    write_bytes(&tmp.path().join("a").join("one.pdf"), 20);
    write_bytes(&tmp.path().join("a").join("b").join("two.zip"), 30);
    write_bytes(&deep.join("three.mp3"), 40);

    let result = scan(tmp.path(), 10).unwrap();
    assert_eq!(result.total_size, 100);
    assert_eq!(result.folder_size(tmp.path()), Some(100));
    assert_eq!(result.folder_size(tmp.path().join("a")), Some(90));
    assert_eq!(result.folder_size(tmp.path().join("a/b")), Some(70));
    assert_eq!(result.folder_size(&deep), Some(40));
    assert_eq!(category_sum(&result), result.total_size);
}

#[test]
fn directories_without_files_are_zero() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("empty").join("nested")).unwrap();
    fs::create_dir_all(tmp.path().join("full")).unwrap();
    write_bytes(&tmp.path().join("full").join("x.png"), 64);

    let result = scan(tmp.path(), 10).unwrap();
    assert_eq!(result.folder_size(tmp.path().join("empty")), Some(0));
    assert_eq!(result.folder_size(tmp.path().join("empty/nested")), Some(0));
    assert_eq!(result.folder_size(tmp.path().join("full")), Some(64));
    assert_eq!(result.folder_sizes.len(), 4);
}

#[test]
fn empty_root_is_not_a_failure() {
    let tmp = TempDir::new().unwrap();

    let result = scan(tmp.path(), 5).unwrap();
    assert!(result.top_files.is_empty());
    assert_eq!(result.total_size, 0);
    assert!(!result.category_totals.is_empty());
    assert!(result.category_totals.iter().all(|(_, s)| s.total_size == 0));
    assert_eq!(result.folder_sizes.len(), 1);
    assert_eq!(result.folder_size(tmp.path()), Some(0));
    assert_eq!(result.error_count, 0);
}

#[test]
fn empty_files_are_not_errors() {
    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("empty.txt"), 0);
    write_bytes(&tmp.path().join("full.txt"), 5);

    let result = scan(tmp.path(), 10).unwrap();
    assert_eq!(result.error_count, 0);
    assert_eq!(result.file_count, 2);
    let empty = result
        .top_files
        .iter()
        .find(|f| f.path.ends_with("empty.txt"))
        .expect("empty file is still listed");
    assert_eq!(empty.size, 0);
    assert!(!empty.unreadable);
}

#[test]
fn unreadable_file_counts_one_error_and_zero_bytes() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());
    write_bytes(&tmp.path().join("sub").join("locked.mp4"), 4096);

    let probe = |path: &Path| -> io::Result<u64> {
        if path.file_name() == Some(OsStr::new("locked.mp4")) {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        } else {
            FsProbe.size_of(path)
        }
    };
    let scanner = Scanner::with_probe(CategoryTable::default(), ScanOptions::top(10), probe);
    let result = scanner.scan(tmp.path()).unwrap();

    assert_eq!(result.error_count, 1);
    assert_eq!(result.unreadable_files(), 1);
    assert_eq!(result.skipped[0].kind, SkipKind::File);
    assert!(result.skipped[0].path.ends_with("sub/locked.mp4"));

    // The locked file adds nothing anywhere.
    assert_eq!(result.total_size, 2660);
    assert_eq!(result.folder_size(tmp.path().join("sub")), Some(100));
    assert_eq!(result.category_totals.size_of("Videos"), 2048);
    assert_eq!(
        result.category_totals.stats_of("Videos").map(|s| s.file_count),
        Some(2)
    );
    assert_eq!(category_sum(&result), result.total_size);

    let locked = result
        .top_files
        .iter()
        .find(|f| f.unreadable)
        .expect("unreadable file is recorded");
    assert_eq!(locked.size, 0);
}

#[test]
fn invalid_roots_fail_without_scanning() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("does-not-exist");
    match scan(&missing, 10) {
        Err(ScanError::InvalidPath { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected InvalidPath, got {other:?}"),
    }

    let file = tmp.path().join("plain.txt");
    write_bytes(&file, 3);
    let err = scan(&file, 10).unwrap_err();
    assert!(err.to_string().contains("not a directory"));
}

#[test]
fn repeated_scans_are_identical() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());
    fs::create_dir_all(tmp.path().join("ties")).unwrap();
    for name in ["x.bin", "y.bin", "z.bin"] {
        write_bytes(&tmp.path().join("ties").join(name), 77);
    }

    let scanner = Scanner::default();
    let first = scanner.scan(tmp.path()).unwrap();
    let second = scanner.scan(tmp.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn equal_sizes_rank_by_path() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("b")).unwrap();
    fs::create_dir_all(tmp.path().join("a")).unwrap();
    write_bytes(&tmp.path().join("c.bin"), 50);
    write_bytes(&tmp.path().join("b").join("x.bin"), 50);
    write_bytes(&tmp.path().join("a.bin"), 50);
    write_bytes(&tmp.path().join("a").join("z.bin"), 50);

    let result = scan(tmp.path(), 10).unwrap();
    let files: Vec<&Path> = result.top_files.iter().map(|f| f.path.as_path()).collect();
    let mut by_path = files.clone();
    by_path.sort();
    assert_eq!(files, by_path);
    assert_eq!(files[0], tmp.path().join("a").join("z.bin"));

    // Folders "a" and "b" tie at 50 bytes.
    let folders: Vec<&Path> = result
        .top_folders
        .iter()
        .map(|f| f.path.as_path())
        .collect();
    let (a, b) = (tmp.path().join("a"), tmp.path().join("b"));
    assert_eq!(folders, vec![tmp.path(), a.as_path(), b.as_path()]);
    let reranked: Vec<&Path> = result
        .largest_folders(3)
        .into_iter()
        .map(|(path, _)| path)
        .collect();
    assert_eq!(reranked, folders);
}

#[test]
fn custom_category_table_is_used() {
    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("main.rs"), 300);
    write_bytes(&tmp.path().join("clip.mp4"), 200);

    let table = CategoryTable::from_json(r#"[{"label": "Code", "extensions": ["rs"]}]"#).unwrap();
    let result = Scanner::new(table, ScanOptions::default())
        .scan(tmp.path())
        .unwrap();

    assert_eq!(result.category_totals.size_of("Code"), 300);
    assert_eq!(result.category_totals.size_of("Other"), 200);
    assert_eq!(result.category_totals.stats_of("Videos"), None);
    assert_eq!(result.category_totals.len(), 2);
}

#[test]
fn sanitized_input_scans_like_the_clean_path() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());

    let pasted = format!("\"{}\">", tmp.path().display());
    let result = scan(sanitize_input(&pasted), 3).unwrap();
    assert_eq!(result.root, tmp.path());
    assert_eq!(result.total_size, 2660);
}

#[test]
fn separate_top_limits_for_files_and_folders() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());

    let options = ScanOptions {
        top_files: 1,
        top_folders: 5,
    };
    let result = Scanner::new(CategoryTable::default(), options)
        .scan(tmp.path())
        .unwrap();
    assert_eq!(result.top_files.len(), 1);
    assert_eq!(result.top_folders.len(), 2);
    assert_eq!(result.largest_folders(1), vec![(tmp.path(), 2660)]);
}

#[test]
fn scan_many_runs_each_target_and_merges_categories() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_bytes(&a.path().join("song.mp3"), 1_000);
    write_bytes(&b.path().join("song.flac"), 3_000);
    write_bytes(&b.path().join("pic.png"), 10);

    let targets = vec![
        ScanTarget::new("Music A", a.path()),
        ScanTarget::new("Music B", b.path()),
        ScanTarget::new("Gone", a.path().join("missing")),
    ];
    let multi = Scanner::default().scan_many(&targets);

    assert_eq!(multi.scans.len(), 2);
    assert_eq!(multi.missing.len(), 1);
    assert_eq!(multi.missing[0].target.name, "Gone");
    assert_eq!(multi.total_size(), 4_010);
    assert_eq!(multi.category_totals.size_of("Music"), 4_000);
    assert_eq!(multi.category_totals.size_of("Images"), 10);

    let ranked: Vec<&str> = multi.ranked().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(ranked, vec!["Music B", "Music A"]);
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_followed() {
    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());
    // A link back to the root would loop forever if followed.
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("sub").join("loop")).unwrap();

    let result = scan(tmp.path(), 10).unwrap();
    assert_eq!(result.dir_count, 2);
    assert!(result.folder_size(tmp.path().join("sub/loop")).is_none());
    // The link itself is counted by its own (small) size, not its target's.
    assert!(result.total_size < 2 * 2660);
}

#[cfg(unix)]
#[test]
fn unlistable_directory_is_skipped_not_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    build_scenario_tree(tmp.path());
    let locked = tmp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    write_bytes(&locked.join("hidden.bin"), 999);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can list anything; nothing to test then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = scan(tmp.path(), 10);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let result = result.expect("an unlistable subdirectory must not abort the scan");

    assert_eq!(result.error_count, 1);
    assert_eq!(result.unreadable_dirs(), 1);
    assert_eq!(result.folder_size(&locked), Some(0));
    assert_eq!(result.total_size, 2660);
}
