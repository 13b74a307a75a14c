//! Core type aliases, constants, and shared traits for sevenhand.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the sevenhand workspace, plus the process-wide
//! information-set context guard that keeps calibration-only components
//! out of runtime code paths.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Scores and per-category point values.
pub type Points = u32;
/// A 64-bit shuffle seed; together with [`PRNG_VERSION`] it uniquely
/// determines the full deck order.
pub type Seed = u64;
/// Draw probabilities and rates.
pub type Probability = f32;
/// Expected model scores produced by policy and rollout valuation.
pub type Expectation = f32;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Cards held at every step boundary.
pub const HAND_SIZE: usize = 7;
/// Cards consumed by a single play.
pub const PLAY_SIZE: usize = 5;
/// Plays available per game.
pub const PLAY_BUDGET: u8 = 4;
/// Total cards that may be discarded per game (counts cards, not actions).
pub const DISCARD_BUDGET: u8 = 10;
/// Standard deck, no jokers.
pub const DECK_SIZE: usize = 52;

// ============================================================================
// POLICY PARAMETERS
// ============================================================================
/// Most-promising completions kept when valuing a discard.
pub const COMPLETION_TOP_M: usize = 5;
/// Largest "discard the k worst" template considered by default.
pub const DISCARD_TEMPLATE_MAX: usize = 3;

// ============================================================================
// CALIBRATION PARAMETERS
// ============================================================================
/// Candidate actions evaluated per decision point in rollout refinement (K).
pub const ROLLOUT_CANDIDATES: usize = 10;
/// Deterministic rollouts per candidate (R).
pub const ROLLOUT_SAMPLES: usize = 128;
/// Half-width of the tier-cutoff band, as a fraction of the score spread,
/// inside which seeds are sent to stage-B refinement.
pub const BOUNDARY_BAND: f32 = 0.15;

// ============================================================================
// DETERMINISM CONTRACT
// Changing either identifier is a breaking change to every stored seed
// manifest and test golden.
// ============================================================================
/// Frozen identifier of the shuffle construction.
pub const PRNG_VERSION: &str = "splitmix64-xoshiro256starstar-fisheryates-v1";
/// Engine version recorded in calibration summaries.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// INFORMATION-SET CONTEXT
// Runtime code observes no artifact of draw order; calibration code may.
// The tag is process-wide, set once, and defaults to Runtime.
// ============================================================================
use std::sync::OnceLock;

/// Which information set this process is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Order-unknown: public projections only.
    Runtime,
    /// Ordered-deck access permitted (offline pipeline).
    Calibration,
}

static CONTEXT: OnceLock<Context> = OnceLock::new();

/// Declare the process context. First caller wins; later calls are ignored
/// so library code cannot widen its own privileges.
pub fn assume(context: Context) {
    let _ = CONTEXT.set(context);
}

/// The declared process context, defaulting to Runtime.
pub fn context() -> Context {
    CONTEXT.get().copied().unwrap_or(Context::Runtime)
}

/// Capability token for ordered-deck access.
///
/// Constructible only through [`Privilege::grant`], which is fatal outside
/// calibration context. Every privileged surface takes `&Privilege`, so a
/// runtime code path that reaches one is a deployment bug, not a game error.
pub struct Privilege(());

impl Privilege {
    /// Obtain the ordered-deck capability, or die trying.
    pub fn grant() -> Self {
        match context() {
            Context::Calibration => Self(()),
            Context::Runtime => {
                log::error!("calibration_component_in_runtime");
                panic!("calibration_component_in_runtime: ordered-deck access requested outside calibration context");
            }
        }
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_defaults_to_runtime() {
        assert_eq!(context(), Context::Runtime);
    }

    #[test]
    fn first_assumption_wins() {
        assume(Context::Runtime);
        assume(Context::Calibration);
        assert_eq!(context(), Context::Runtime);
    }

    #[test]
    #[should_panic]
    fn privilege_denied_at_runtime() {
        assume(Context::Runtime);
        let _ = Privilege::grant();
    }
}
