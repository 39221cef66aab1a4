//! Henk: development-cluster companion CLI
//!
//! Wraps the external customer-data import tool so an engineer can
//! discover, pick, and run an import without reading raw tool output.

mod cli;
mod pipeline;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{detect_picker, Cli, Commands};
use pipeline::{import_command, ClassifierConfig, ImportRunner, RunOutcome};
use utils::Styler;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let styler = Styler::new(cli.colors_enabled());

    match run(&cli, &styler) {
        Ok(outcome) => ExitCode::from(u8::try_from(outcome.exit_code()).unwrap_or(1)),
        Err(err) => {
            styler.failure(&format!("{:#}", err));
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, styler: &Styler) -> Result<RunOutcome> {
    match &cli.command {
        Commands::Import { client, extra_args } => {
            let runner = ImportRunner::new(
                import_command(),
                extra_args.clone(),
                ClassifierConfig::default(),
                styler,
            );
            // The capability probe only matters for interactive mode;
            // a direct --client match never prompts.
            let picker = if client.is_none() {
                detect_picker()
            } else {
                None
            };
            runner.run(client.as_deref(), picker.as_deref())
        }
    }
}
