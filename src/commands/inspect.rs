use super::resolve_options;
use crate::driver::Translator;
use crate::io::output::OutputFormat;
use crate::io::writers::TerminalWriter;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InspectConfig {
    pub input: PathBuf,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
}

/// Translate without writing a file and print a summary to stdout.
pub fn inspect_header(config: InspectConfig) -> Result<()> {
    let options = resolve_options(config.config.as_deref(), config.format)?;
    let translator = Translator::new(options);

    let translated = translator.extract(&config.input)?;
    let lines = translator.render(&translated.nodes)?;
    let report = translated.report(&config.input, None);

    TerminalWriter::stdout().write_report(&report, &lines)?;
    Ok(())
}
