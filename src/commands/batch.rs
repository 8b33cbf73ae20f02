use super::resolve_options;
use crate::driver::{TranslationReport, Translator};
use crate::io;
use crate::io::output::OutputFormat;
use crate::io::walker::HeaderWalker;
use crate::observability::{
    record_skipped, record_written, set_phase, start_batch, TranslationPhase,
};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    /// Worker threads, 0 for one per core.
    pub jobs: usize,
    pub exclude: Vec<String>,
    pub strict: bool,
}

/// A header whose translation returned an error.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Reports in header path order.
    pub reports: Vec<TranslationReport>,
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn signatures(&self) -> usize {
        self.reports.iter().map(|r| r.signatures).sum()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().map(|r| r.skipped()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.reports.iter().all(TranslationReport::is_complete)
    }
}

/// Output file for `header`, mirroring its directory below `input_dir`.
pub fn output_path_for(
    header: &Path,
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> PathBuf {
    output_path_named(header, input_dir, output_dir, format, false)
}

fn output_path_named(
    header: &Path,
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
    keep_extension: bool,
) -> PathBuf {
    let relative = header.strip_prefix(input_dir).unwrap_or(header);
    let parent = relative.parent().unwrap_or_else(|| Path::new(""));
    let name = if keep_extension {
        relative.file_name()
    } else {
        relative.file_stem()
    };
    let name = name
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir
        .join(parent)
        .join(format!("{name}.{}", format.extension()))
}

/// Output file for each of `headers`, in the same order.
///
/// Headers that would share an output (`foo.h` and `foo.hpp` both map to
/// `foo.m`) keep their full file name instead: `foo.h.m` and `foo.hpp.m`.
pub fn plan_outputs(
    headers: &[PathBuf],
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Vec<PathBuf> {
    let defaults: Vec<PathBuf> = headers
        .iter()
        .map(|h| output_path_for(h, input_dir, output_dir, format))
        .collect();
    let claims = claim_counts(&defaults);

    headers
        .iter()
        .zip(&defaults)
        .map(|(header, output)| {
            if claims[output.as_path()] > 1 {
                output_path_named(header, input_dir, output_dir, format, true)
            } else {
                output.clone()
            }
        })
        .collect()
}

fn claim_counts(outputs: &[PathBuf]) -> HashMap<&Path, usize> {
    let mut claims = HashMap::new();
    for output in outputs {
        *claims.entry(output.as_path()).or_default() += 1;
    }
    claims
}

/// Indices of planned outputs still claimed by more than one header.
fn contested(outputs: &[PathBuf]) -> Vec<usize> {
    let claims = claim_counts(outputs);
    (0..outputs.len())
        .filter(|&i| claims[outputs[i].as_path()] > 1)
        .collect()
}

fn progress_bar(len: u64) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("Translating");
    bar
}

fn translate_one(
    translator: &Translator,
    header: &Path,
    output: &Path,
) -> Result<TranslationReport> {
    if let Some(parent) = output.parent() {
        io::ensure_dir(parent)?;
    }
    Ok(translator.translate(header, output)?)
}

/// Translate every header under `config.input_dir` without printing.
pub fn translate_tree(config: &BatchConfig) -> Result<BatchSummary> {
    let options = resolve_options(config.config.as_deref(), config.format)?;
    let translator = Translator::new(options);

    let headers = {
        let _phase = set_phase(TranslationPhase::FileDiscovery);
        HeaderWalker::new(config.input_dir.clone())
            .with_dialect(options.dialect)
            .with_ignore_patterns(config.exclude.clone())
            .walk()
            .with_context(|| format!("Failed to search {}", config.input_dir.display()))?
    };
    info!(headers = headers.len(), "Discovered headers");

    io::ensure_dir(&config.output_dir)?;
    start_batch(headers.len());

    let outputs = plan_outputs(
        &headers,
        &config.input_dir,
        &config.output_dir,
        options.format,
    );
    let mut summary = BatchSummary::default();
    let blocked = contested(&outputs);
    for &i in &blocked {
        record_skipped();
        summary.failures.push(BatchFailure {
            input: headers[i].clone(),
            error: format!(
                "output {} is claimed by more than one header",
                outputs[i].display()
            ),
        });
    }
    let jobs: Vec<(&PathBuf, &PathBuf)> = headers
        .iter()
        .zip(&outputs)
        .enumerate()
        .filter(|(i, _)| !blocked.contains(i))
        .map(|(_, job)| job)
        .collect();

    let mut builder = rayon::ThreadPoolBuilder::new();
    if config.jobs > 0 {
        builder = builder.num_threads(config.jobs);
    }
    let pool = builder.build().context("Failed to build worker pool")?;

    let bar = progress_bar(jobs.len() as u64);
    let results: Vec<(PathBuf, Result<TranslationReport>)> = pool.install(|| {
        jobs.par_iter()
            .map(|(header, output)| {
                let result = translate_one(&translator, header, output);
                if result.is_ok() {
                    record_written();
                } else {
                    record_skipped();
                }
                ((*header).clone(), result)
            })
            .progress_with(bar.clone())
            .collect()
    });
    bar.finish_and_clear();

    for (input, result) in results {
        match result {
            Ok(report) => summary.reports.push(report),
            Err(err) => {
                warn!(file = %input.display(), "Translation failed: {:#}", err);
                summary.failures.push(BatchFailure {
                    input,
                    error: format!("{err:#}"),
                });
            }
        }
    }
    Ok(summary)
}

pub fn run_batch(config: BatchConfig) -> Result<BatchSummary> {
    let summary = translate_tree(&config)?;
    print_summary(&summary);

    if config.strict && !summary.is_complete() {
        anyhow::bail!(
            "{} header(s) failed and {} declaration(s) were skipped",
            summary.failures.len(),
            summary.skipped()
        );
    }
    Ok(summary)
}

fn print_summary(summary: &BatchSummary) {
    for report in summary.reports.iter().filter(|r| !r.is_complete()) {
        eprintln!(
            "{} {} ({} skipped)",
            "partial".yellow(),
            report.input.display(),
            report.skipped()
        );
    }
    for failure in &summary.failures {
        eprintln!("{} {}: {}", "failed".red(), failure.input.display(), failure.error);
    }
    println!(
        "{} header(s), {} signature(s), {} skipped declaration(s), {} failure(s)",
        summary.reports.len() + summary.failures.len(),
        summary.signatures(),
        summary.skipped(),
        summary.failures.len()
    );
}
