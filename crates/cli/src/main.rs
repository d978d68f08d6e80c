use clap::Parser;
use std::process::ExitCode;
use subrename_cli::args::Args;
use subrename_cli::config::Config;
use subrename_cli::{app, logging};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(args.output.log_level);

    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match app::run(&config) {
        Ok(summary) => {
            tracing::debug!(?summary, "finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
