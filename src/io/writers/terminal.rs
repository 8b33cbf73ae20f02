use crate::core::Diagnostic;
use crate::driver::TranslationReport;
use colored::*;
use std::io::{self, Write};

/// Human-readable summary of one translation, used by `cimport inspect`.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl TerminalWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_report(&mut self, report: &TranslationReport, lines: &[String]) -> io::Result<()> {
        writeln!(
            self.writer,
            "{} {}",
            "Header:".bold(),
            report.input.display()
        )?;
        writeln!(self.writer)?;

        for line in lines {
            writeln!(self.writer, "  {line}")?;
        }
        if !lines.is_empty() {
            writeln!(self.writer)?;
        }

        for diagnostic in &report.diagnostics {
            self.write_diagnostic(diagnostic)?;
        }

        let summary = format!(
            "{} of {} function declaration(s) translated",
            report.signatures, report.candidates
        );
        let summary = if report.parse_failed {
            "header could not be parsed".red().bold()
        } else if report.is_complete() {
            summary.green()
        } else {
            summary.yellow()
        };
        writeln!(self.writer, "{summary}")
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let label = if diagnostic.kind.is_rejection() {
            "skipped".red()
        } else {
            "warning".yellow()
        };
        writeln!(self.writer, "{label}: {diagnostic}")
    }
}
