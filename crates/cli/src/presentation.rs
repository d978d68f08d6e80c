// crates/cli/src/presentation.rs
use crate::error::{AppError, Result};
use serde::Serialize;
use std::io::Write;
use subrename_engine::{RenameEvent, Reporter, RunSummary};

/// One JSON object per line: every event, then a final `summary` record.
///
/// Write failures cannot surface through [`Reporter`], so the first one is
/// kept and returned by [`JsonLinesReporter::finish`]; later output is dropped.
#[derive(Debug)]
pub struct JsonLinesReporter<W: Write> {
    out: W,
    quiet: bool,
    error: Option<AppError>,
}

#[derive(Serialize)]
struct SummaryRecord<'a> {
    event: &'static str,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self {
            out,
            quiet,
            error: None,
        }
    }

    /// # Errors
    /// Returns the first serialization or write error seen while reporting.
    pub fn finish(mut self) -> Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_record<T: Serialize>(&mut self, record: &T) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, record)
            .map_err(AppError::from)
            .and_then(|()| writeln!(self.out).map_err(AppError::from));
        if let Err(e) = result {
            tracing::debug!("jsonl output failed: {e}");
            self.error = Some(e);
        }
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn on_event(&mut self, event: &RenameEvent) {
        if !self.quiet {
            self.write_record(event);
        }
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        self.write_record(&SummaryRecord {
            event: "summary",
            summary,
        });
    }
}
