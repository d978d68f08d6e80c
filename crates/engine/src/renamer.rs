// crates/engine/src/renamer.rs
//! The two-phase rename routine.
//!
//! `collect` walks the tree once in pre-order and records every entry whose
//! base name matches. `apply` then processes that list back to front: a
//! directory always appears in pre-order before anything below it, so walking
//! the list in reverse renames descendants before their ancestors and every
//! collected path is still valid when its turn comes.
//!
//! [`TraversalOrder::PostOrder`] gets the same guarantee from a
//! children-first walk and applies each candidate as soon as it is visited.

use crate::error::{EngineError, Result};
use crate::matcher::NameMatcher;
use crate::options::{RenameOptions, TraversalOrder};
use crate::report::{RenameEvent, RenameOutcome, Reporter, RunSummary, SkipReason};
use crate::walk::{base_name, walker};
use hashbrown::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Renamer {
    options: RenameOptions,
    matcher: NameMatcher,
}

/// Paths created or freed earlier in the same run.
///
/// Under dry-run nothing touches the disk, so this is the only record of
/// what the run would have done.
#[derive(Debug, Default)]
struct Occupancy {
    claimed: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl Occupancy {
    fn is_occupied(&self, path: &Path) -> bool {
        if self.claimed.contains(path) {
            return true;
        }
        !self.vacated.contains(path) && fs::symlink_metadata(path).is_ok()
    }

    fn moved(&mut self, from: &Path, to: &Path) {
        self.claimed.remove(from);
        self.vacated.insert(from.to_path_buf());
        self.vacated.remove(to);
        self.claimed.insert(to.to_path_buf());
    }
}

impl Renamer {
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if the old substring is empty.
    pub fn new(options: RenameOptions) -> Result<Self> {
        options.validate()?;
        let matcher = NameMatcher::new(&options.old, &options.new, options.case_sensitive)?;
        Ok(Self { options, matcher })
    }

    #[must_use]
    pub const fn options(&self) -> &RenameOptions {
        &self.options
    }

    #[must_use]
    pub const fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }

    /// Run both phases over `root` and report the summary.
    ///
    /// # Errors
    /// Returns the first walk, collision or rename error unless
    /// `skip_errors` is set.
    pub fn run(&self, root: &Path, reporter: &mut dyn Reporter) -> Result<RunSummary> {
        let mut summary = RunSummary {
            dry_run: self.options.dry_run,
            ..RunSummary::default()
        };
        log::debug!(
            "renaming under {} ({:?}, dry_run={}, skip_errors={})",
            root.display(),
            self.options.order,
            self.options.dry_run,
            self.options.skip_errors
        );

        match self.options.order {
            TraversalOrder::Collect => {
                let candidates = self.collect_into(root, reporter, &mut summary)?;
                self.apply_into(&candidates, reporter, &mut summary)?;
            }
            TraversalOrder::PostOrder => self.run_post_order(root, reporter, &mut summary)?,
        }

        log::info!(
            "{} of {} candidates renamed ({} skipped, {} failed)",
            summary.renamed,
            summary.matched,
            summary.skipped,
            summary.failed
        );
        reporter.on_complete(&summary);
        Ok(summary)
    }

    /// Walk `root` and return matching paths in walk order.
    ///
    /// # Errors
    /// Returns [`EngineError::Traversal`] on the first unreadable entry unless
    /// `skip_errors` is set.
    pub fn collect(&self, root: &Path, reporter: &mut dyn Reporter) -> Result<Vec<PathBuf>> {
        self.collect_into(root, reporter, &mut RunSummary::default())
    }

    /// Apply `candidates` deepest-first, i.e. in reverse of the given order.
    ///
    /// # Errors
    /// Returns the first collision or rename error unless `skip_errors` is set.
    pub fn apply(
        &self,
        candidates: &[PathBuf],
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<RenameOutcome>> {
        self.apply_into(candidates, reporter, &mut RunSummary::default())
    }

    fn collect_into(
        &self,
        root: &Path,
        reporter: &mut dyn Reporter,
        summary: &mut RunSummary,
    ) -> Result<Vec<PathBuf>> {
        let mut candidates = Vec::new();
        for entry in walker(root, &self.options, false) {
            match entry {
                Ok(entry) => {
                    if self.is_candidate(entry.path()) {
                        summary.matched += 1;
                        reporter.on_event(&RenameEvent::Matched {
                            path: entry.path().to_path_buf(),
                        });
                        candidates.push(entry.into_path());
                    }
                }
                Err(err) => self.walk_error(root, err, reporter, summary)?,
            }
        }
        Ok(candidates)
    }

    fn apply_into(
        &self,
        candidates: &[PathBuf],
        reporter: &mut dyn Reporter,
        summary: &mut RunSummary,
    ) -> Result<Vec<RenameOutcome>> {
        let mut occupancy = Occupancy::default();
        candidates
            .iter()
            .rev()
            .map(|path| {
                let outcome = self.apply_one(path, &mut occupancy, reporter)?;
                summary.record(&outcome);
                Ok(outcome)
            })
            .collect()
    }

    fn run_post_order(
        &self,
        root: &Path,
        reporter: &mut dyn Reporter,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let mut occupancy = Occupancy::default();
        for entry in walker(root, &self.options, true) {
            match entry {
                Ok(entry) => {
                    if !self.is_candidate(entry.path()) {
                        continue;
                    }
                    summary.matched += 1;
                    reporter.on_event(&RenameEvent::Matched {
                        path: entry.path().to_path_buf(),
                    });
                    let outcome = self.apply_one(entry.path(), &mut occupancy, reporter)?;
                    summary.record(&outcome);
                }
                Err(err) => self.walk_error(root, err, reporter, summary)?,
            }
        }
        Ok(())
    }

    fn is_candidate(&self, path: &Path) -> bool {
        base_name(path).is_some_and(|name| self.matcher.matches_os(name))
    }

    fn walk_error(
        &self,
        root: &Path,
        err: walkdir::Error,
        reporter: &mut dyn Reporter,
        summary: &mut RunSummary,
    ) -> Result<()> {
        if !self.options.skip_errors {
            return Err(err.into());
        }
        let path = err.path().unwrap_or(root).to_path_buf();
        log::debug!("skipping unreadable entry {}: {err}", path.display());
        summary.failed += 1;
        reporter.on_event(&RenameEvent::Failed {
            path,
            to: None,
            error: err.to_string(),
        });
        Ok(())
    }

    /// Rename a single candidate. The event is reported before any error is
    /// returned, so aborting runs still show what stopped them.
    fn apply_one(
        &self,
        from: &Path,
        occupancy: &mut Occupancy,
        reporter: &mut dyn Reporter,
    ) -> Result<RenameOutcome> {
        let dry_run = self.options.dry_run;
        let Some(name) = base_name(from) else {
            return Ok(self.emit(
                RenameOutcome::Skipped {
                    from: from.to_path_buf(),
                    to: from.to_path_buf(),
                    reason: SkipReason::Unchanged,
                },
                reporter,
            ));
        };

        let new_name = self.matcher.replace_os(name);
        let to = from.with_file_name(&*new_name);
        if *new_name == *name {
            return Ok(self.emit(
                RenameOutcome::Skipped {
                    from: from.to_path_buf(),
                    to,
                    reason: SkipReason::Unchanged,
                },
                reporter,
            ));
        }

        if occupancy.is_occupied(&to) {
            log::debug!(
                "target already exists, skipping: {} -> {}",
                from.display(),
                to.display()
            );
            let outcome = self.emit(
                RenameOutcome::Skipped {
                    from: from.to_path_buf(),
                    to: to.clone(),
                    reason: SkipReason::Collision,
                },
                reporter,
            );
            if !self.options.skip_errors {
                return Err(EngineError::Collision {
                    from: from.to_path_buf(),
                    to,
                });
            }
            return Ok(outcome);
        }

        if !dry_run
            && let Err(source) = fs::rename(from, &to)
        {
            log::debug!("rename failed: {} -> {}: {source}", from.display(), to.display());
            let outcome = self.emit(
                RenameOutcome::Failed {
                    from: from.to_path_buf(),
                    to: to.clone(),
                    error: source.to_string(),
                },
                reporter,
            );
            if !self.options.skip_errors {
                return Err(EngineError::Rename {
                    from: from.to_path_buf(),
                    to,
                    source,
                });
            }
            return Ok(outcome);
        }

        occupancy.moved(from, &to);
        Ok(self.emit(
            RenameOutcome::Renamed {
                from: from.to_path_buf(),
                to,
            },
            reporter,
        ))
    }

    fn emit(&self, outcome: RenameOutcome, reporter: &mut dyn Reporter) -> RenameOutcome {
        reporter.on_event(&RenameEvent::from_outcome(&outcome, self.options.dry_run));
        outcome
    }
}
