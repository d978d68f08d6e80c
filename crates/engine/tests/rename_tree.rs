//! End-to-end behaviour of the rename engine on real directory trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use subrename_engine::{
    EngineError, NullReporter, RecordingReporter, RenameOptions, RenameOptionsBuilder,
    RenameOutcome, Renamer, TraversalOrder, rename_with_reporter,
};
use tempfile::TempDir;
use walkdir::WalkDir;

fn tree() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("tree");
    fs::create_dir(&root).unwrap();
    (temp, root)
}

/// Relative path -> file contents (`None` for directories).
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| {
            let e = e.unwrap();
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            let body = e.file_type().is_file().then(|| fs::read(e.path()).unwrap());
            (rel, body)
        })
        .collect()
}

fn populate(root: &Path) {
    fs::create_dir_all(root.join("fooDir/sub_foo/deep")).unwrap();
    fs::create_dir_all(root.join("plain/foo_inner")).unwrap();
    fs::write(root.join("fooDir/foo.txt"), "one").unwrap();
    fs::write(root.join("fooDir/sub_foo/deep/foofoo.md"), "two").unwrap();
    fs::write(root.join("plain/readme"), "three").unwrap();
    fs::write(root.join("plain/foo_inner/x.foo"), "four").unwrap();
}

#[test]
fn test_scenario_foo_dir_to_bar_dir() {
    let (_temp, root) = tree();
    fs::create_dir(root.join("fooDir")).unwrap();
    fs::write(root.join("fooDir/foo.txt"), "content").unwrap();

    let summary =
        rename_with_reporter(&root, &RenameOptions::new("foo", "bar"), &mut NullReporter).unwrap();

    assert_eq!(summary.renamed, 2);
    assert!(root.join("barDir/bar.txt").exists());
    assert!(!root.join("fooDir").exists());
    assert_eq!(fs::read_to_string(root.join("barDir/bar.txt")).unwrap(), "content");
}

#[test]
fn test_empty_old_fails_before_touching_filesystem() {
    let (_temp, root) = tree();
    populate(&root);
    let before = snapshot(&root);

    let err = rename_with_reporter(&root, &RenameOptions::new("", "x"), &mut NullReporter)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
    assert_eq!(before, snapshot(&root));

    // Validation happens before the walk, so even a missing root reports it.
    let missing = root.join("missing");
    let err =
        rename_with_reporter(&missing, &RenameOptions::new("", "x"), &mut NullReporter).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn test_descendants_renamed_before_ancestors() {
    for order in [TraversalOrder::Collect, TraversalOrder::PostOrder] {
        let (_temp, root) = tree();
        populate(&root);
        let opts = RenameOptionsBuilder::default()
            .old("foo")
            .new("bar")
            .order(order)
            .build()
            .unwrap();

        let mut rec = RecordingReporter::new();
        rename_with_reporter(&root, &opts, &mut rec).unwrap();
        let sources = rec.renamed_sources();
        assert_eq!(sources.len(), 6, "{order:?}");

        for (i, earlier) in sources.iter().enumerate() {
            for later in &sources[i + 1..] {
                assert!(
                    !later.starts_with(earlier) || later == earlier,
                    "{order:?}: ancestor {} renamed before descendant {}",
                    earlier.display(),
                    later.display()
                );
            }
        }
    }
}

#[test]
fn test_second_run_renames_nothing() {
    let (_temp, root) = tree();
    populate(&root);
    let opts = RenameOptions::new("foo", "bar");

    let first = rename_with_reporter(&root, &opts, &mut NullReporter).unwrap();
    assert_eq!(first.renamed, 6);

    let second = rename_with_reporter(&root, &opts, &mut NullReporter).unwrap();
    assert_eq!(second.matched, 0);
    assert_eq!(second.renamed, 0);
}

#[test]
fn test_only_base_names_change() {
    let (_temp, root) = tree();
    fs::create_dir_all(root.join("keep_foo_dir")).unwrap();
    fs::write(root.join("keep_foo_dir/file.txt"), "").unwrap();

    // Matching is case-sensitive, so "FOO" in the parent stays.
    fs::create_dir_all(root.join("FOO")).unwrap();
    fs::write(root.join("FOO/foo.txt"), "").unwrap();

    rename_with_reporter(&root, &RenameOptions::new("foo", "bar"), &mut NullReporter).unwrap();

    assert!(root.join("keep_bar_dir/file.txt").exists());
    assert!(root.join("FOO/bar.txt").exists());
}

#[test]
fn test_case_insensitive_rename_preserves_case() {
    let (_temp, root) = tree();
    fs::write(root.join("prefooBARfooSuf"), "").unwrap();

    let opts = RenameOptionsBuilder::default()
        .old("Foo")
        .new("X")
        .case_sensitive(false)
        .build()
        .unwrap();
    rename_with_reporter(&root, &opts, &mut NullReporter).unwrap();
    assert!(root.join("preXBARXSuf").exists());
}

#[test]
fn test_dry_run_leaves_tree_identical() {
    let (_temp, root) = tree();
    populate(&root);
    let before = snapshot(&root);

    let opts = RenameOptionsBuilder::default()
        .old("foo")
        .new("bar")
        .dry_run(true)
        .build()
        .unwrap();
    let mut rec = RecordingReporter::new();
    let summary = rename_with_reporter(&root, &opts, &mut rec).unwrap();

    assert_eq!(before, snapshot(&root));
    assert!(summary.dry_run);
    assert_eq!(summary.renamed, 6);
    assert_eq!(rec.summary, Some(summary));
}

#[test]
fn test_sibling_collision_leaves_both_entries() {
    for skip_errors in [false, true] {
        let (_temp, root) = tree();
        fs::write(root.join("a_old"), "old").unwrap();
        fs::write(root.join("a_new"), "new").unwrap();
        let opts = RenameOptionsBuilder::default()
            .old("old")
            .new("new")
            .skip_errors(skip_errors)
            .build()
            .unwrap();

        let result = rename_with_reporter(&root, &opts, &mut NullReporter);
        if skip_errors {
            let summary = result.unwrap();
            assert_eq!((summary.renamed, summary.skipped), (0, 1));
        } else {
            assert!(matches!(result, Err(EngineError::Collision { .. })));
        }
        assert_eq!(fs::read_to_string(root.join("a_old")).unwrap(), "old");
        assert_eq!(fs::read_to_string(root.join("a_new")).unwrap(), "new");
    }
}

#[test]
fn test_max_depth_limits_renames() {
    let (_temp, root) = tree();
    populate(&root);
    let opts = RenameOptionsBuilder::default()
        .old("foo")
        .new("bar")
        .max_depth(1usize)
        .build()
        .unwrap();

    let summary = rename_with_reporter(&root, &opts, &mut NullReporter).unwrap();
    assert_eq!(summary.renamed, 1);
    assert!(root.join("barDir/foo.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_skipped_with_skip_errors() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, root) = tree();
    fs::create_dir_all(root.join("locked")).unwrap();
    fs::write(root.join("locked/foo_hidden"), "").unwrap();
    fs::write(root.join("foo_visible"), "").unwrap();
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

    // Running as root ignores permission bits; nothing to observe then.
    if fs::read_dir(root.join("locked")).is_ok() {
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let strict = rename_with_reporter(&root, &RenameOptions::new("foo", "bar"), &mut NullReporter);
    assert!(matches!(strict, Err(EngineError::Traversal { .. })));
    assert!(root.join("foo_visible").exists());

    let opts = RenameOptionsBuilder::default()
        .old("foo")
        .new("bar")
        .skip_errors(true)
        .build()
        .unwrap();
    let summary = rename_with_reporter(&root, &opts, &mut NullReporter).unwrap();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.renamed, 1);
    assert!(root.join("bar_visible").exists());

    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_rename_failure_reported_with_skip_errors() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, root) = tree();
    fs::create_dir(root.join("sealed")).unwrap();
    fs::write(root.join("sealed/foo.txt"), "").unwrap();
    fs::write(root.join("foo_open"), "").unwrap();
    fs::set_permissions(root.join("sealed"), fs::Permissions::from_mode(0o555)).unwrap();

    // Root can write into read-only directories; nothing to observe then.
    if fs::write(root.join("sealed/write_check"), "").is_ok() {
        fs::set_permissions(root.join("sealed"), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let strict = rename_with_reporter(&root, &RenameOptions::new("foo", "bar"), &mut NullReporter);
    assert!(matches!(strict, Err(EngineError::Rename { .. })));

    let opts = RenameOptionsBuilder::default()
        .old("foo")
        .new("bar")
        .skip_errors(true)
        .build()
        .unwrap();
    let mut rec = RecordingReporter::new();
    let summary = rename_with_reporter(&root, &opts, &mut rec).unwrap();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.renamed, 1);
    assert!(root.join("sealed/foo.txt").exists());
    assert!(root.join("bar_open").exists());

    fs::set_permissions(root.join("sealed"), fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_rename_failure_after_collect_without_permissions() {
    let (_temp, root) = tree();
    fs::create_dir(root.join("box")).unwrap();
    fs::write(root.join("box/foo.txt"), "").unwrap();
    fs::write(root.join("foo_top"), "").unwrap();

    let strict = Renamer::new(RenameOptions::new("foo", "bar")).unwrap();
    let candidates = strict.collect(&root, &mut NullReporter).unwrap();
    assert_eq!(candidates, vec![root.join("box/foo.txt"), root.join("foo_top")]);

    // The parent vanishes between the phases, so the rename itself fails.
    fs::remove_dir_all(root.join("box")).unwrap();
    let err = strict.apply(&candidates, &mut NullReporter).unwrap_err();
    assert!(matches!(err, EngineError::Rename { ref from, .. } if *from == root.join("box/foo.txt")));
    assert!(root.join("bar_top").exists());

    fs::rename(root.join("bar_top"), root.join("foo_top")).unwrap();
    let opts = RenameOptionsBuilder::default()
        .old("foo")
        .new("bar")
        .skip_errors(true)
        .build()
        .unwrap();
    let tolerant = Renamer::new(opts).unwrap();
    let outcomes = tolerant.apply(&candidates, &mut NullReporter).unwrap();
    assert!(outcomes[0].is_renamed());
    assert!(matches!(&outcomes[1], RenameOutcome::Failed { from, .. } if *from == root.join("box/foo.txt")));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_names_are_renamed() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (_temp, root) = tree();
    let name = OsStr::from_bytes(b"foo_\xff.txt");
    // Some filesystems only accept UTF-8 names.
    if fs::write(root.join(name), "raw").is_err() {
        return;
    }

    let summary =
        rename_with_reporter(&root, &RenameOptions::new("foo", "bar"), &mut NullReporter).unwrap();
    assert_eq!(summary.renamed, 1);
    let renamed = root.join(OsStr::from_bytes(b"bar_\xff.txt"));
    assert_eq!(fs::read_to_string(renamed).unwrap(), "raw");
    assert!(!root.join(name).exists());
}

#[cfg(unix)]
fn outside_link(temp: &TempDir, root: &Path) -> PathBuf {
    let outside = temp.path().join("outside");
    fs::create_dir(&outside).unwrap();
    fs::write(outside.join("foo_inside"), "").unwrap();
    std::os::unix::fs::symlink(&outside, root.join("foo_link")).unwrap();
    outside
}

#[cfg(unix)]
#[test]
fn test_symlink_renamed_as_link_by_default() {
    let (temp, root) = tree();
    let outside = outside_link(&temp, &root);

    let summary =
        rename_with_reporter(&root, &RenameOptions::new("foo", "bar"), &mut NullReporter).unwrap();

    assert_eq!(summary.renamed, 1);
    let link = fs::symlink_metadata(root.join("bar_link")).unwrap();
    assert!(link.file_type().is_symlink());
    assert_eq!(fs::read_link(root.join("bar_link")).unwrap(), outside);
    assert!(outside.join("foo_inside").exists());
}

#[cfg(unix)]
#[test]
fn test_follow_links_descends_into_linked_directory() {
    let (temp, root) = tree();
    let outside = outside_link(&temp, &root);
    let opts = RenameOptionsBuilder::default()
        .old("foo")
        .new("bar")
        .follow_links(true)
        .build()
        .unwrap();

    let mut rec = RecordingReporter::new();
    let summary = rename_with_reporter(&root, &opts, &mut rec).unwrap();

    assert_eq!(summary.renamed, 2);
    assert_eq!(
        rec.renamed_sources(),
        vec![root.join("foo_link/foo_inside").as_path(), root.join("foo_link").as_path()]
    );
    assert!(outside.join("bar_inside").exists());
    assert!(fs::symlink_metadata(root.join("bar_link")).unwrap().file_type().is_symlink());
}

#[cfg(unix)]
#[test]
fn test_link_cycle_is_traversal_error() {
    let (_temp, root) = tree();
    fs::create_dir(root.join("loop_dir")).unwrap();
    std::os::unix::fs::symlink(root.join("loop_dir"), root.join("loop_dir/foo_back")).unwrap();
    fs::write(root.join("foo_file"), "").unwrap();

    let strict = RenameOptionsBuilder::default()
        .old("foo")
        .new("bar")
        .follow_links(true)
        .build()
        .unwrap();
    let err = rename_with_reporter(&root, &strict, &mut NullReporter).unwrap_err();
    assert!(matches!(err, EngineError::Traversal { path: Some(ref p), .. } if p.ends_with("foo_back")));
    assert!(root.join("foo_file").exists());

    let tolerant = RenameOptionsBuilder::default()
        .old("foo")
        .new("bar")
        .follow_links(true)
        .skip_errors(true)
        .build()
        .unwrap();
    let summary = rename_with_reporter(&root, &tolerant, &mut NullReporter).unwrap();
    assert_eq!((summary.renamed, summary.failed), (1, 1));
    assert!(root.join("bar_file").exists());
    assert!(fs::symlink_metadata(root.join("loop_dir/foo_back")).is_ok());
}
