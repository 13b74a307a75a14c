//! Offline seed calibration for sevenhand.
//!
//! Classifies shuffle seeds into difficulty tiers through three staged
//! evaluations, then emits the artifacts the runtime consumes:
//!
//! 1. **Stage A** — a full blinded-heuristic game per seed (cheap, every
//!    seed), scoring under the model table.
//! 2. **Stage B** — ordered-deck rollout EV refinement for seeds near tier
//!    cutoffs (the privileged [`Rollout`] evaluator).
//! 3. **Stage C** — the order-unknown trace gate: each surviving seed must
//!    produce a runtime-faithful [`svh_dto::TraceArtifact`] that completes
//!    on the real deck.
//!
//! The pipeline is embarrassingly parallel over seeds; stages within a
//! seed are sequential. Everything is deterministic per run configuration.
mod artifacts;
mod cli;
mod pipeline;
mod records;
mod rollout;

pub use artifacts::*;
pub use cli::*;
pub use pipeline::*;
pub use records::*;
pub use rollout::*;

/// Per-stage progress bar: seed counts are what matter here, so show
/// position over length rather than a bare percentage.
pub fn progress(total: usize) -> indicatif::ProgressBar {
    let template = "{spinner:.green} {elapsed_precise} [{bar:40.green}] {pos}/{len} seeds";
    let bar = indicatif::ProgressBar::new(total as u64);
    bar.set_style(
        indicatif::ProgressStyle::with_template(template).expect("static template parses"),
    );
    bar.enable_steady_tick(std::time::Duration::from_millis(250));
    bar
}
