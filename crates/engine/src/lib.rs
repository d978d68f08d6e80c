// crates/engine/src/lib.rs
//! Recursive substring renaming of files and directories.
//!
//! Every entry under a root whose base name contains a substring is renamed,
//! descendants before their ancestors, with the substring replaced. Progress
//! is delivered to a [`Reporter`]; the convenience functions print to stdout.

pub mod error;
pub mod matcher;
pub mod options;
pub mod renamer;
pub mod report;
pub mod walk;

use std::path::Path;

pub use crate::error::{EngineError, Result};
pub use crate::matcher::NameMatcher;
pub use crate::options::{RenameOptions, RenameOptionsBuilder, TraversalOrder};
pub use crate::renamer::Renamer;
pub use crate::report::{
    NullReporter, RecordingReporter, RenameEvent, RenameOutcome, Reporter, RunSummary,
    SkipReason, StdoutReporter, TextReporter,
};

/// Case-sensitive rename that aborts on the first error or collision.
///
/// # Errors
/// See [`rename_with_options`].
pub fn rename(root: impl AsRef<Path>, old: &str, new: &str) -> Result<RunSummary> {
    rename_with_options(root, &RenameOptions::new(old, new))
}

/// Rename with explicit options, printing progress lines to stdout.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`] before touching the filesystem if the
/// old substring is empty. Walk, collision and rename errors abort the run
/// unless `skip_errors` is set.
pub fn rename_with_options(root: impl AsRef<Path>, options: &RenameOptions) -> Result<RunSummary> {
    rename_with_reporter(root, options, &mut StdoutReporter::stdout())
}

/// Rename with explicit options, sending every event to `reporter`.
///
/// # Errors
/// Same as [`rename_with_options`].
pub fn rename_with_reporter(
    root: impl AsRef<Path>,
    options: &RenameOptions,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary> {
    Renamer::new(options.clone())?.run(root.as_ref(), reporter)
}
