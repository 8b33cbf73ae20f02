use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cimport")]
#[command(about = "Translate C header function declarations into extern signatures", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate one header into an output file, one signature per line
    Translate {
        /// C or C++ header to read
        input: PathBuf,

        /// File to write; existing content is replaced
        output: PathBuf,

        /// Output format (defaults to the configured format, then text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Configuration file (defaults to .cimport.toml discovery)
        #[arg(short, long, env = "CIMPORT_CONFIG")]
        config: Option<PathBuf>,

        /// Fail if any declaration could not be translated
        #[arg(long)]
        strict: bool,
    },

    /// Print the signatures and diagnostics for one header
    Inspect {
        input: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(short, long, env = "CIMPORT_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Translate every header under a directory in parallel
    Batch {
        /// Directory to search for headers
        input_dir: PathBuf,

        /// Directory receiving one output file per header
        output_dir: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(short, long, env = "CIMPORT_CONFIG")]
        config: Option<PathBuf>,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0")]
        jobs: usize,

        /// Glob patterns of headers to skip
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Fail if any header was not translated completely
        #[arg(long)]
        strict: bool,
    },

    /// Write a default .cimport.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
