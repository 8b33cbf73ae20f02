//! Crash report naming the header, dialect and declaration in flight.

use super::context::{batch_tally, current_context, BatchTally, TranslationContext};
use std::fmt::Write as _;
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the crash-report panic hook. Call first thing in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
        let span = Span::current()
            .metadata()
            .map(|m| m.name().to_string());
        let report = CrashReport {
            message: panic_message(info),
            location,
            span,
            context: current_context(),
            tally: batch_tally(),
        };
        eprintln!("\n{}", report.render());
        if std::env::var_os("RUST_BACKTRACE").is_some() {
            eprintln!("{}", std::backtrace::Backtrace::capture());
        }
    }));
}

struct CrashReport {
    message: String,
    location: Option<String>,
    span: Option<String>,
    context: TranslationContext,
    tally: BatchTally,
}

impl CrashReport {
    fn render(&self) -> String {
        let mut out = String::new();
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let _ = writeln!(
            out,
            "cimport {VERSION} crashed ({}, {timestamp})",
            std::env::consts::OS
        );
        let _ = writeln!(out, "  panic: {}", self.message);
        if let Some(location) = &self.location {
            let _ = writeln!(out, "  at: {location}");
        }

        let ctx = &self.context;
        match ctx.phase {
            Some(phase) => {
                let _ = writeln!(out, "  phase: {phase}");
            }
            None => out.push_str("  phase: none, no header was being translated\n"),
        }
        if let Some(span) = &self.span {
            let _ = writeln!(out, "  span: {span}");
        }
        if let Some(header) = &ctx.header {
            let _ = write!(out, "  header: {}", header.display());
            if let Some(dialect) = ctx.dialect {
                let _ = write!(out, " ({dialect})");
            }
            out.push('\n');
        }
        if let Some(site) = &ctx.declaration {
            let _ = writeln!(out, "  declaration: {} at line {}", site.name, site.line);
        }
        if self.tally.is_active() {
            let _ = writeln!(
                out,
                "  batch: {} of {} headers written, {} skipped",
                self.tally.written, self.tally.total, self.tally.skipped
            );
        }

        if std::env::var_os("RUST_BACKTRACE").is_none() {
            out.push_str("Run with RUST_BACKTRACE=1 for a stack trace.");
        }
        out
    }
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
