//! Order-unknown decision policy for sevenhand.
//!
//! Everything in this crate consumes [`svh_gameplay::Projection`] and
//! nothing else: the hand, the budgets, and the remaining deck as an
//! unordered multiset. The hidden draw order is unreachable from here by
//! construction, which is what makes runtime hints honest.
//!
//! ## Core Types
//!
//! - [`Heuristic`] — Candidate valuation and action selection
//! - [`Hint`] — A recommended action with its explanation payload
//! - [`Trace`] — A full hypothetical game under expected draws
//!
//! Candidate generation lives in [`options`]: the 21 five-of-seven play
//! subsets plus "discard the k worst" templates (full enumeration available
//! for search tooling, not the default).
pub mod options;

mod heuristic;
mod trace;

pub use heuristic::*;
pub use trace::*;
