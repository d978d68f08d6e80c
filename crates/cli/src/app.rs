// crates/cli/src/app.rs
use crate::config::Config;
use crate::error::Result;
use crate::options::OutputFormat;
use crate::presentation::JsonLinesReporter;
use std::io::{self, Write};
use subrename_engine::{Renamer, RunSummary, TextReporter};

/// Run one rename pass and write its report to stdout.
///
/// # Errors
/// Returns engine errors that aborted the run and failures writing the report.
pub fn run(config: &Config) -> Result<RunSummary> {
    let renamer = Renamer::new(config.options.clone())?;
    tracing::debug!(root = %config.root.display(), options = ?config.options, "starting");

    let stdout = io::stdout().lock();
    let summary = match config.format {
        OutputFormat::Text => {
            let mut reporter = TextReporter::new(stdout)
                .verbose(config.verbose)
                .quiet(config.quiet);
            let summary = renamer.run(&config.root, &mut reporter)?;
            reporter.into_inner().flush()?;
            summary
        }
        OutputFormat::Jsonl => {
            let mut reporter = JsonLinesReporter::new(stdout, config.quiet);
            let summary = renamer.run(&config.root, &mut reporter)?;
            let _stdout = reporter.finish()?;
            summary
        }
    };
    Ok(summary)
}
