use anyhow::Result;
use cimport::cli::{Cli, Commands};
use cimport::commands::{
    inspect_header, run_batch, translate_file, BatchConfig, InspectConfig, TranslateFileConfig,
};
use cimport::observability::{init_tracing, install_panic_hook};
use clap::Parser;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Translate {
            input,
            output,
            format,
            config,
            strict,
        } => {
            translate_file(TranslateFileConfig {
                input,
                output,
                format,
                config,
                strict,
            })?;
        }
        Commands::Inspect {
            input,
            format,
            config,
        } => inspect_header(InspectConfig {
            input,
            format,
            config,
        })?,
        Commands::Batch {
            input_dir,
            output_dir,
            format,
            config,
            jobs,
            exclude,
            strict,
        } => {
            run_batch(BatchConfig {
                input_dir,
                output_dir,
                format,
                config,
                jobs,
                exclude,
                strict,
            })?;
        }
        Commands::Init { force } => cimport::commands::init::init_config(force)?,
    }
    Ok(())
}
