//! Crash reports, log setup and per-thread translation context.
//!
//! ```ignore
//! use cimport::observability::{install_panic_hook, init_tracing, set_phase, TranslationPhase};
//!
//! install_panic_hook();
//! init_tracing(0);
//! let _phase = set_phase(TranslationPhase::Parsing);
//! // A panic here reports the phase and header being translated.
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    batch_tally, current_context, record_skipped, record_written, set_current_declaration,
    set_current_header, set_phase, start_batch, BatchTally, ContextGuard, DeclarationSite,
    TranslationContext, TranslationPhase,
};
pub use panic_hook::install_panic_hook;
pub use self::tracing::{init_tracing, level_for_verbosity};
