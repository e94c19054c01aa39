//! Anonymization engine.
//!
//! The engine turns one text plus a set of independently detected spans into a
//! single transformed text and an exact record of what changed where. It is
//! split into focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! spans ── validate (anonymizer.rs) ── reject malformed spans
//!                     │
//!                     v
//!          conflict::resolve (conflict.rs)
//!            - fixed visit order per ConflictPolicy
//!            - keep a span iff it misses every span kept so far
//!                     │
//!                     v
//!          for each kept span, rightmost first:
//!            dispatch::resolve_operator (dispatch.rs)
//!              exact type ─▶ "DEFAULT" ─▶ replace
//!            dispatch::prepare
//!              registry lookup, validate params, inject entity_type
//!            TextSplicer::splice (splicer.rs)
//!                     │
//!                     v
//!          TextSplicer::finish ── normalize offsets ──▶ EngineResult
//! ```
//!
//! ## Responsibilities by module
//!
//! - `conflict.rs`: decides which overlapping detections survive.
//! - `dispatch.rs`: maps entity types to validated, ready-to-run operators.
//! - `splicer.rs`: owns the mutable buffer and the substitution records.
//! - `anonymizer.rs`: input validation and the pipeline itself.
//! - `metrics.rs`: optional timing/debug data for a run.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events at `debug` (per run and per span) and
//! `trace` (per conflict). Events carry entity types, offsets and operator
//! names, never the text being anonymized.

#[path = "engine/anonymizer.rs"]
mod anonymizer;
#[path = "engine/conflict.rs"]
mod conflict;
#[path = "engine/dispatch.rs"]
mod dispatch;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/splicer.rs"]
mod splicer;

pub use anonymizer::Anonymizer;
pub use conflict::ConflictPolicy;
pub use metrics::{RunMetrics, RunResult};
