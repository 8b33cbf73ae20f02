//! One translation run: parse a header, extract signatures, analyze,
//! render, and write one line per signature.
//!
//! The parsed translation unit lives only inside [`Translator::extract`], so
//! it is released before any output file is opened. Output is opened only
//! once every signature has been rendered.

use crate::config::{CimportConfig, ParseFailurePolicy};
use crate::core::{Diagnostic, DiagnosticKind, Result};
use crate::inspector::{self, Dialect};
use crate::io;
use crate::io::output::{create_renderer, OutputFormat, Renderer};
use crate::observability::{set_current_header, set_phase, TranslationPhase};
use crate::sema::{SemanticAnalyzer, SignatureAnalyzer};
use crate::target::{FunctionTypeNode, TypeRegistry};
use crate::translator::{extract_signatures, Extraction, TypeMapper, DEFAULT_MAX_POINTER_DEPTH};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

/// Knobs for a [`Translator`], usually taken from `.cimport.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// `None` picks the dialect from each file's extension.
    pub dialect: Option<Dialect>,
    pub max_pointer_depth: usize,
    pub on_parse_failure: ParseFailurePolicy,
    pub format: OutputFormat,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            dialect: None,
            max_pointer_depth: DEFAULT_MAX_POINTER_DEPTH,
            on_parse_failure: ParseFailurePolicy::default(),
            format: OutputFormat::default(),
        }
    }
}

impl From<&CimportConfig> for TranslateOptions {
    fn from(config: &CimportConfig) -> Self {
        Self {
            dialect: config.dialect(),
            max_pointer_depth: config.max_pointer_depth(),
            on_parse_failure: config.on_parse_failure(),
            format: config.output_format(),
        }
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    pub input: PathBuf,
    /// `None` when nothing was written.
    pub output: Option<PathBuf>,
    /// Signatures emitted.
    pub signatures: usize,
    /// Function-like declarations found, translated or not.
    pub candidates: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub parse_failed: bool,
}

impl TranslationReport {
    /// Declarations that were found but could not be translated.
    pub fn skipped(&self) -> usize {
        self.candidates.saturating_sub(self.signatures)
    }

    pub fn is_complete(&self) -> bool {
        !self.parse_failed && self.skipped() == 0
    }
}

/// Signatures extracted from one file, already analyzed.
#[derive(Debug, Clone, Default)]
pub struct Translated {
    pub nodes: Vec<FunctionTypeNode>,
    pub diagnostics: Vec<Diagnostic>,
    pub candidates: usize,
    pub parse_failed: bool,
}

impl Translated {
    fn parse_failure(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            parse_failed: true,
            ..Default::default()
        }
    }

    pub fn report(&self, input: &Path, output: Option<&Path>) -> TranslationReport {
        TranslationReport {
            input: input.to_path_buf(),
            output: output.map(Path::to_path_buf),
            signatures: self.nodes.len(),
            candidates: self.candidates,
            diagnostics: self.diagnostics.clone(),
            parse_failed: self.parse_failed,
        }
    }
}

pub struct Translator {
    options: TranslateOptions,
    registry: TypeRegistry,
    renderer: Box<dyn Renderer>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslateOptions::default())
    }
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self {
            options,
            registry: TypeRegistry::builtin(),
            renderer: create_renderer(options.format),
        }
    }

    /// Use a custom registry instead of the builtin target types.
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Parse `input` and return its analyzed signatures in document order.
    ///
    /// A file that cannot be parsed yields no signatures and a single
    /// [`DiagnosticKind::ParseFailure`] unless the policy is
    /// [`ParseFailurePolicy::Error`].
    pub fn extract(&self, input: &Path) -> Result<Translated> {
        let dialect = self
            .options
            .dialect
            .unwrap_or_else(|| Dialect::from_path(input));
        let _header = set_current_header(input, dialect);

        let extraction = {
            let parsing = set_phase(TranslationPhase::Parsing);
            let unit = match inspector::parse(input, Some(dialect)) {
                Ok(unit) => unit,
                Err(err) if err.is_parse_failure() => {
                    return self.handle_parse_failure(err);
                }
                Err(err) => return Err(err),
            };
            if unit.has_syntax_errors() {
                warn!(
                    file = %input.display(),
                    "Header contains syntax errors; translating what could be recovered"
                );
            }
            drop(parsing);

            let _phase = set_phase(TranslationPhase::Extraction);
            let mapper = TypeMapper::new(self.options.max_pointer_depth);
            extract_signatures(&unit, mapper, &self.registry)
        };

        Ok(self.analyze(extraction))
    }

    fn handle_parse_failure(&self, err: crate::core::Error) -> Result<Translated> {
        match self.options.on_parse_failure {
            ParseFailurePolicy::Error => Err(err),
            ParseFailurePolicy::Empty => {
                let diagnostic = Diagnostic::new(DiagnosticKind::ParseFailure, err.to_string()).emit();
                Ok(Translated::parse_failure(diagnostic))
            }
        }
    }

    fn analyze(&self, extraction: Extraction) -> Translated {
        let _phase = set_phase(TranslationPhase::Analysis);
        let analyzer = SignatureAnalyzer::new(&self.registry);
        let Extraction {
            mut signatures,
            mut diagnostics,
            candidates,
        } = extraction;

        for node in &mut signatures {
            analyzer.analyze(node);
            if let Some(analysis) = &node.analysis {
                diagnostics.extend(analysis.warnings.iter().cloned());
            }
        }

        Translated {
            nodes: signatures,
            diagnostics,
            candidates,
            parse_failed: false,
        }
    }

    /// Render each node to one line of output.
    pub fn render(&self, nodes: &[FunctionTypeNode]) -> Result<Vec<String>> {
        let _phase = set_phase(TranslationPhase::Rendering);
        nodes.iter().map(|node| self.renderer.render(node)).collect()
    }

    /// Translate `input` into `output`, replacing any existing content.
    ///
    /// Declarations that cannot be translated are skipped and reported in
    /// the returned report; they never fail the run.
    pub fn translate(&self, input: &Path, output: &Path) -> Result<TranslationReport> {
        let span = info_span!("translate", input = %input.display());
        let _enter = span.enter();

        let translated = self.extract(input)?;
        let lines = self.render(&translated.nodes)?;

        {
            let _phase = set_phase(TranslationPhase::Writing);
            io::write_lines(output, &lines)?;
        }
        debug!(output = %output.display(), lines = lines.len(), "Wrote output");

        let report = translated.report(input, Some(output));
        info!(
            signatures = report.signatures,
            skipped = report.skipped(),
            "Translated {}",
            input.display()
        );
        Ok(report)
    }
}

/// Translate `input` to `output` with default options.
pub fn translate(input: &Path, output: &Path) -> Result<TranslationReport> {
    Translator::default().translate(input, output)
}
