// crates/engine/src/walk.rs
use crate::options::RenameOptions;
use std::ffi::OsStr;
use std::path::Path;
use walkdir::WalkDir;

/// Build a deterministic walker over `root`, root included.
///
/// Entries inside a directory are sorted by file name. With `contents_first`
/// a directory is yielded after everything below it.
pub fn walker(root: &Path, options: &RenameOptions, contents_first: bool) -> walkdir::IntoIter {
    let mut walk = WalkDir::new(root)
        .follow_links(options.follow_links)
        .contents_first(contents_first)
        .sort_by_file_name();
    if let Some(depth) = options.max_depth {
        walk = walk.max_depth(depth);
    }
    walk.into_iter()
}

/// Base name as stored on disk, or `None` for roots like `.` and `/`.
pub fn base_name(path: &Path) -> Option<&OsStr> {
    path.file_name()
}
