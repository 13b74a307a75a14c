use super::card::Card;
use svh_core::DECK_SIZE;
use svh_core::Seed;
use rand_xoshiro::Xoshiro256StarStar;
use rand_xoshiro::rand_core::RngCore;
use rand_xoshiro::rand_core::SeedableRng;

/// An ordered 52-card sequence with a monotone draw pointer.
///
/// Only the engine sees the sequence; the remaining deck is the suffix from
/// the pointer. [`Deck::shuffled`] is a pure function of the seed: same
/// seed, everywhere, forever, yields the same permutation. The construction
/// is frozen under [`svh_core::PRNG_VERSION`] — changing the PRNG family or
/// its seeding invalidates every stored seed manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    pointer: usize,
}

impl Deck {
    /// Deterministic permutation of the full deck from a 64-bit seed.
    ///
    /// The seed is expanded via SplitMix64 into a xoshiro256** generator
    /// (the documented `seed_from_u64` construction), then Fisher–Yates
    /// runs from the top of the deck down.
    pub fn shuffled(seed: Seed) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut cards = (0..DECK_SIZE as u8).map(Card::from).collect::<Vec<Card>>();
        Self::permute(&mut cards, &mut rng);
        Self { cards, pointer: 0 }
    }

    /// Next card off the top, advancing the pointer.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.pointer).copied();
        if card.is_some() {
            self.pointer += 1;
        }
        card
    }

    /// The undrawn suffix, in order. Ordered-deck information: callers above
    /// the engine must go through a privileged view.
    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.pointer..]
    }

    /// How many cards are left to draw.
    pub fn size(&self) -> usize {
        self.cards.len() - self.pointer
    }

    /// Re-permute only the undrawn suffix with the same frozen construction.
    /// Used by the calibration rollout evaluator to sample alternate futures.
    pub fn riffle(&mut self, seed: Seed) {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let pointer = self.pointer;
        Self::permute(&mut self.cards[pointer..], &mut rng);
    }

    /// Fisher–Yates, high index down, with rejection-sampled uniforms.
    fn permute(cards: &mut [Card], rng: &mut Xoshiro256StarStar) {
        for i in (1..cards.len()).rev() {
            let j = Self::uniform(rng, i as u64 + 1) as usize;
            cards.swap(i, j);
        }
    }

    /// Uniform draw from `[0, bound)` by rejection sampling. Never modulo
    /// bias: values below `2^64 mod bound` are rejected and redrawn.
    fn uniform(rng: &mut Xoshiro256StarStar, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let sample = rng.next_u64();
            if sample >= threshold {
                return sample % bound;
            }
        }
    }
}

/// Explicit deck order, pointer at the top. For crafted scenarios and replay
/// of privileged calibration snapshots.
impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards, pointer: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_permutation() {
        for seed in [0u64, 1, 42, 123456, u64::MAX] {
            assert_eq!(Deck::shuffled(seed), Deck::shuffled(seed));
        }
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(Deck::shuffled(1), Deck::shuffled(2));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut seen = [false; 52];
        let mut deck = Deck::shuffled(0xDEADBEEF);
        while let Some(card) = deck.draw() {
            assert!(!seen[card.index() as usize]);
            seen[card.index() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn draws_advance_the_suffix() {
        let mut deck = Deck::shuffled(7);
        let first = deck.remaining()[0];
        assert_eq!(deck.draw(), Some(first));
        assert_eq!(deck.size(), 51);
        assert!(!deck.remaining().contains(&first));
    }

    #[test]
    fn riffle_preserves_the_drawn_prefix_and_suffix_set() {
        let mut deck = Deck::shuffled(99);
        let drawn = (0..7).map(|_| deck.draw().unwrap()).collect::<Vec<Card>>();
        let mut before = deck.remaining().to_vec();
        deck.riffle(1234);
        let mut after = deck.remaining().to_vec();
        for card in drawn {
            assert!(!after.contains(&card));
        }
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn uniform_respects_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        for bound in 1..64u64 {
            for _ in 0..100 {
                assert!(Deck::uniform(&mut rng, bound) < bound);
            }
        }
    }
}
