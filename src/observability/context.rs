//! What the current thread is translating, kept for crash reports.
//!
//! Each rayon worker in batch mode holds its own [`TranslationContext`];
//! the [`BatchTally`] counters are process-wide.

use crate::inspector::Dialect;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static HEADERS_TOTAL: AtomicUsize = AtomicUsize::new(0);
static HEADERS_WRITTEN: AtomicUsize = AtomicUsize::new(0);
static HEADERS_SKIPPED: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CONTEXT: RefCell<TranslationContext> = const { RefCell::new(TranslationContext::new()) };
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationContext {
    pub phase: Option<TranslationPhase>,
    pub header: Option<PathBuf>,
    pub dialect: Option<Dialect>,
    pub declaration: Option<DeclarationSite>,
}

impl TranslationContext {
    pub const fn new() -> Self {
        Self {
            phase: None,
            header: None,
            dialect: None,
            declaration: None,
        }
    }
}

/// A declaration and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSite {
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationPhase {
    /// Finding headers in batch mode
    FileDiscovery,
    Parsing,
    /// Visiting declarations and building signatures
    Extraction,
    Analysis,
    Rendering,
    Writing,
}

impl std::fmt::Display for TranslationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FileDiscovery => "file_discovery",
            Self::Parsing => "parsing",
            Self::Extraction => "extraction",
            Self::Analysis => "analysis",
            Self::Rendering => "rendering",
            Self::Writing => "writing",
        };
        f.write_str(name)
    }
}

/// Value a guard puts back when it is dropped.
enum Saved {
    Phase(Option<TranslationPhase>),
    Header(Option<PathBuf>, Option<Dialect>),
    Declaration(Option<DeclarationSite>),
}

/// Restores the field it replaced when dropped, so guards nest.
#[must_use]
pub struct ContextGuard {
    saved: Option<Saved>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        CONTEXT.with(|ctx| {
            let mut ctx = ctx.borrow_mut();
            match saved {
                Saved::Phase(phase) => ctx.phase = phase,
                Saved::Header(header, dialect) => {
                    ctx.header = header;
                    ctx.dialect = dialect;
                }
                Saved::Declaration(site) => ctx.declaration = site,
            }
        });
    }
}

fn replace(update: impl FnOnce(&mut TranslationContext) -> Saved) -> ContextGuard {
    let saved = CONTEXT.with(|ctx| update(&mut ctx.borrow_mut()));
    ContextGuard { saved: Some(saved) }
}

pub fn set_phase(phase: TranslationPhase) -> ContextGuard {
    replace(|ctx| Saved::Phase(ctx.phase.replace(phase)))
}

/// Record the header being translated and the dialect it is parsed as.
pub fn set_current_header(path: &Path, dialect: Dialect) -> ContextGuard {
    replace(|ctx| {
        Saved::Header(
            ctx.header.replace(path.to_path_buf()),
            ctx.dialect.replace(dialect),
        )
    })
}

pub fn set_current_declaration(name: impl Into<String>, line: usize) -> ContextGuard {
    replace(|ctx| {
        Saved::Declaration(ctx.declaration.replace(DeclarationSite {
            name: name.into(),
            line,
        }))
    })
}

pub fn current_context() -> TranslationContext {
    CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Progress of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchTally {
    pub total: usize,
    /// Headers whose output file was written.
    pub written: usize,
    /// Headers that failed and produced no output.
    pub skipped: usize,
}

impl BatchTally {
    pub fn is_active(&self) -> bool {
        self.total > 0
    }
}

/// Reset the counters for a batch of `total` headers.
pub fn start_batch(total: usize) {
    HEADERS_TOTAL.store(total, Ordering::Relaxed);
    HEADERS_WRITTEN.store(0, Ordering::Relaxed);
    HEADERS_SKIPPED.store(0, Ordering::Relaxed);
}

pub fn record_written() {
    HEADERS_WRITTEN.fetch_add(1, Ordering::Relaxed);
}

pub fn record_skipped() {
    HEADERS_SKIPPED.fetch_add(1, Ordering::Relaxed);
}

pub fn batch_tally() -> BatchTally {
    BatchTally {
        total: HEADERS_TOTAL.load(Ordering::Relaxed),
        written: HEADERS_WRITTEN.load(Ordering::Relaxed),
        skipped: HEADERS_SKIPPED.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards_restore_in_reverse_order() {
        let _phase = set_phase(TranslationPhase::Parsing);
        {
            let _header = set_current_header(Path::new("include/math.h"), Dialect::C);
            let _decl = set_current_declaration("sqrt", 12);
            {
                let _inner = set_phase(TranslationPhase::Extraction);
                let ctx = current_context();
                assert_eq!(ctx.phase, Some(TranslationPhase::Extraction));
                assert_eq!(ctx.dialect, Some(Dialect::C));
                assert_eq!(
                    ctx.declaration,
                    Some(DeclarationSite {
                        name: "sqrt".to_string(),
                        line: 12
                    })
                );
            }
            assert_eq!(current_context().phase, Some(TranslationPhase::Parsing));
        }

        let ctx = current_context();
        assert_eq!(ctx.phase, Some(TranslationPhase::Parsing));
        assert!(ctx.header.is_none());
        assert!(ctx.dialect.is_none());
        assert!(ctx.declaration.is_none());
    }

    #[test]
    fn test_headers_do_not_leak_between_threads() {
        let _header = set_current_header(Path::new("a.h"), Dialect::Cpp);
        let other = std::thread::spawn(current_context).join().unwrap();
        assert!(other.header.is_none());
        assert_eq!(current_context().header, Some(PathBuf::from("a.h")));
    }

    #[test]
    fn test_batch_tally_counts_outcomes() {
        start_batch(3);
        record_written();
        record_written();
        record_skipped();
        let tally = batch_tally();
        assert!(tally.is_active());
        assert_eq!(
            tally,
            BatchTally {
                total: 3,
                written: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(TranslationPhase::FileDiscovery.to_string(), "file_discovery");
        assert_eq!(TranslationPhase::Writing.to_string(), "writing");
    }
}
