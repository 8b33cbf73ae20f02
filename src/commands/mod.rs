//! CLI command implementations.
//!
//! - **translate**: one header to one output file
//! - **inspect**: print a header's signatures and diagnostics
//! - **batch**: every header under a directory, in parallel
//! - **init**: write a default `.cimport.toml`

pub mod batch;
pub mod init;
pub mod inspect;
pub mod translate;

pub use batch::{run_batch, translate_tree, BatchConfig, BatchFailure, BatchSummary};
pub use init::init_config;
pub use inspect::{inspect_header, InspectConfig};
pub use translate::{translate_file, TranslateFileConfig};

use crate::config::{load_config, load_config_from};
use crate::driver::TranslateOptions;
use crate::io::output::OutputFormat;
use anyhow::Result;
use std::path::Path;

/// Options from an explicit config file or discovered `.cimport.toml`, with
/// a command-line format taking precedence.
pub fn resolve_options(config: Option<&Path>, format: Option<OutputFormat>) -> Result<TranslateOptions> {
    let config = match config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    let mut options = TranslateOptions::from(&config);
    if let Some(format) = format {
        options.format = format;
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_and_format_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[translate]\nmax_pointer_depth = 2\n[output]\nformat = \"json\"\n").unwrap();

        let options = resolve_options(Some(path.as_path()), Some(OutputFormat::Text)).unwrap();
        assert_eq!(options.max_pointer_depth, 2);
        assert_eq!(options.format, OutputFormat::Text);
    }

    #[test]
    fn test_explicit_invalid_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[translate]\nmax_pointer_depth = 0\n").unwrap();
        assert!(resolve_options(Some(path.as_path()), None).is_err());
    }
}
