use super::card::Card;
use super::hands::HandIterator;
use svh_core::DECK_SIZE;

/// An unordered set of cards as a bitstring of 52 bits in a u64.
///
/// Each bit position is a card's compact index, so set union, intersection,
/// and membership are single instructions.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hand(u64);

impl Hand {
    /// The mask covering all 52 cards.
    pub const fn mask() -> u64 {
        (1 << DECK_SIZE) - 1
    }
    pub const fn empty() -> Self {
        Self(0)
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn insert(&mut self, card: Card) {
        self.0 |= u64::from(card);
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }
    /// Set union.
    pub fn add(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
    /// Every card not in this hand.
    pub fn complement(&self) -> Self {
        Self(!self.0 & Self::mask())
    }
    /// Iterate all k-card subsets of this hand in ascending bit order.
    pub fn subsets(&self, k: usize) -> HandIterator {
        HandIterator::from((k, self.complement()))
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n)
    }
}
impl From<Hand> for u64 {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

/// we SUM/OR the cards to get the bitstring
impl From<&[Card]> for Hand {
    fn from(cards: &[Card]) -> Self {
        Self(cards.iter().map(|c| u64::from(*c)).fold(0, |a, b| a | b))
    }
}
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::from(cards.as_slice())
    }
}
/// we pluck the 1s out of the bitstring and convert them to cards
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        let mut bits = hand.0;
        let mut cards = Vec::with_capacity(hand.size());
        while bits != 0 {
            cards.push(Card::from(bits.trailing_zeros() as u8));
            bits &= bits - 1;
        }
        cards
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in Vec::<Card>::from(*self) {
            write!(f, "{} ", card)?;
        }
        Ok(())
    }
}
