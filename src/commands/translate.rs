use super::resolve_options;
use crate::config::ParseFailurePolicy;
use crate::core::Error;
use crate::driver::{TranslationReport, Translator};
use crate::io::output::OutputFormat;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TranslateFileConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    /// Treat skipped declarations as failure.
    pub strict: bool,
}

pub fn translate_file(config: TranslateFileConfig) -> Result<TranslationReport> {
    let mut options = resolve_options(config.config.as_deref(), config.format)?;
    if config.strict {
        options.on_parse_failure = ParseFailurePolicy::Error;
    }
    let translator = Translator::new(options);

    let report = translator
        .translate(&config.input, &config.output)
        .with_context(|| format!("Failed to translate {}", config.input.display()))?;

    eprintln!(
        "{}: {} signature(s) written to {}",
        config.input.display(),
        report.signatures,
        config.output.display()
    );
    for diagnostic in &report.diagnostics {
        eprintln!("  {diagnostic}");
    }

    if config.strict && !report.is_complete() {
        return Err(Error::Incomplete {
            path: config.input,
            skipped: report.skipped(),
        }
        .into());
    }
    Ok(report)
}
