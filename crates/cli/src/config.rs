// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::AppError;
use crate::options::{LogLevel, OutputFormat};
use std::path::PathBuf;
use subrename_engine::{RenameOptions, RenameOptionsBuilder};

/// Everything a single invocation needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub options: RenameOptions,
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub log_level: LogLevel,
}

impl TryFrom<Args> for Config {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let mut builder = RenameOptionsBuilder::default();
        builder
            .old(args.old)
            .new(args.new)
            .case_sensitive(!args.behavior.ignore_case)
            .dry_run(args.behavior.dry_run)
            .skip_errors(args.behavior.skip_errors)
            .follow_links(args.scan.follow_links)
            .order(args.behavior.order);
        if let Some(depth) = args.scan.max_depth {
            builder.max_depth(depth);
        }

        Ok(Self {
            root: args.root,
            options: builder.build()?,
            format: args.output.format,
            quiet: args.output.quiet,
            verbose: args.output.verbose,
            log_level: args.output.log_level,
        })
    }
}
