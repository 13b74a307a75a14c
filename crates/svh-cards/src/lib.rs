//! Card representation, seeded shuffling, hand classification, and scoring.
//!
//! This crate provides the foundational types for the sevenhand engine.
//! All card representations are optimized for bijective encoding and fast
//! bitwise operations.
//!
//! ## Core Types
//!
//! - [`Card`] — A single card as a `(Rank, Suit)` tuple encoded in one byte
//! - [`Hand`] — An unordered set of cards as a 64-bit bitmask
//! - [`Deck`] — An ordered 52-card sequence with a monotone draw pointer
//! - [`HandIterator`] — Bit-permutation iterator over k-card subsets
//!
//! ## Evaluation
//!
//! - [`Evaluator`] — Bitwise 5-card classifier
//! - [`Ranking`] — Hand category (high card through straight flush)
//! - [`Scoring`] — Gameplay and model category→points tables
//!
//! ## Determinism
//!
//! [`Deck::shuffled`] is a pure function of the 64-bit seed: SplitMix64
//! expansion into xoshiro256**, Fisher–Yates with rejection sampling.
//! The construction is frozen under [`svh_core::PRNG_VERSION`].
mod card;
mod deck;
mod evaluator;
mod hand;
mod hands;
mod rank;
mod ranking;
mod scoring;
mod suit;

pub use card::*;
pub use deck::*;
pub use evaluator::*;
pub use hand::*;
pub use hands::*;
pub use rank::*;
pub use ranking::*;
pub use scoring::*;
pub use suit::*;
