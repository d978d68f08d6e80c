// crates/engine/src/report.rs
//! Outcomes, events and the sinks that receive them.
//!
//! The engine never prints directly; everything observable about a run goes
//! through a [`Reporter`].

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Replacement produced the same name.
    Unchanged,
    /// Something already occupies the destination.
    Collision,
}

/// Result of applying a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    Skipped { from: PathBuf, to: PathBuf, reason: SkipReason },
    Failed { from: PathBuf, to: PathBuf, error: String },
}

impl RenameOutcome {
    #[must_use]
    pub fn source_path(&self) -> &Path {
        match self {
            Self::Renamed { from, .. } | Self::Skipped { from, .. } | Self::Failed { from, .. } => {
                from
            }
        }
    }

    #[must_use]
    pub const fn is_renamed(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenameEvent {
    Matched {
        path: PathBuf,
    },
    Renamed {
        from: PathBuf,
        to: PathBuf,
        dry_run: bool,
    },
    Skipped {
        from: PathBuf,
        to: PathBuf,
        reason: SkipReason,
    },
    /// `to` is `None` for walk failures, where no destination was computed.
    Failed {
        path: PathBuf,
        to: Option<PathBuf>,
        error: String,
    },
}

impl RenameEvent {
    pub(crate) fn from_outcome(outcome: &RenameOutcome, dry_run: bool) -> Self {
        match outcome.clone() {
            RenameOutcome::Renamed { from, to } => Self::Renamed { from, to, dry_run },
            RenameOutcome::Skipped { from, to, reason } => Self::Skipped { from, to, reason },
            RenameOutcome::Failed { from, to, error } => Self::Failed {
                path: from,
                to: Some(to),
                error,
            },
        }
    }
}

/// Totals for one run. `renamed` counts would-be renames under dry-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub matched: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dry_run: bool,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: &RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed { .. } => self.renamed += 1,
            RenameOutcome::Skipped { .. } => self.skipped += 1,
            RenameOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

pub trait Reporter {
    fn on_event(&mut self, event: &RenameEvent);

    fn on_complete(&mut self, _summary: &RunSummary) {}
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_event(&mut self, _event: &RenameEvent) {}
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<RenameEvent>,
    pub summary: Option<RunSummary>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Source paths of `Renamed` events, in the order they were reported.
    #[must_use]
    pub fn renamed_sources(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenameEvent::Renamed { from, .. } => Some(from.as_path()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn matched(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenameEvent::Matched { path } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn on_event(&mut self, event: &RenameEvent) {
        self.events.push(event.clone());
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        self.summary = Some(*summary);
    }
}

/// Human-readable progress lines.
///
/// `Matched` events are only written when `verbose` is set; warnings go to the
/// same writer so the output reads in order.
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
    verbose: bool,
    quiet: bool,
}

pub type StdoutReporter = TextReporter<std::io::Stdout>;

impl StdoutReporter {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            verbose: false,
            quiet: false,
        }
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Suppress per-entry lines; only the summary is written.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{text}") {
            log::debug!("report output failed: {e}");
        }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn on_event(&mut self, event: &RenameEvent) {
        if self.quiet {
            return;
        }
        match event {
            RenameEvent::Matched { path } => {
                if self.verbose {
                    self.line(format_args!("matched: {}", path.display()));
                }
            }
            RenameEvent::Renamed { from, to, dry_run } => {
                let label = if *dry_run { "would rename" } else { "renamed" };
                self.line(format_args!("{label}: {} -> {}", from.display(), to.display()));
            }
            RenameEvent::Skipped {
                from,
                to,
                reason: SkipReason::Collision,
            } => {
                self.line(format_args!(
                    "warning: target exists, skipped: {} -> {}",
                    from.display(),
                    to.display()
                ));
            }
            RenameEvent::Skipped { from, .. } => {
                if self.verbose {
                    self.line(format_args!("unchanged: {}", from.display()));
                }
            }
            RenameEvent::Failed { path, to, error } => match to {
                Some(to) => self.line(format_args!(
                    "failed: {} -> {}: {error}",
                    path.display(),
                    to.display()
                )),
                None => self.line(format_args!("failed: {}: {error}", path.display())),
            },
        }
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        let verb = if summary.dry_run { "would rename" } else { "renamed" };
        self.line(format_args!(
            "{verb} {} of {} matched ({} skipped, {} failed)",
            summary.renamed, summary.matched, summary.skipped, summary.failed
        ));
    }
}
