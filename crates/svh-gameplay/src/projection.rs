use svh_cards::Card;
use svh_core::DECK_SIZE;
use svh_core::Points;

/// The remaining deck as an unordered multiset of per-card counts.
///
/// Iteration is always in canonical deck order (rank-major 2→A, suit
/// S,H,D,C). That ordering is part of the external contract: it keeps the
/// serialized counts map byte-stable and ensures iteration order cannot
/// leak anything about the hidden draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts([u8; DECK_SIZE]);

impl Counts {
    pub const fn empty() -> Self {
        Self([0; DECK_SIZE])
    }
    /// Total cards in the multiset.
    pub fn total(&self) -> usize {
        self.0.iter().map(|&n| n as usize).sum()
    }
    pub fn of(&self, card: Card) -> u8 {
        self.0[card.index() as usize]
    }
    pub fn insert(&mut self, card: Card) {
        self.0[card.index() as usize] += 1;
    }
    /// Remove one copy. False if the card was absent.
    pub fn remove(&mut self, card: Card) -> bool {
        let slot = &mut self.0[card.index() as usize];
        if *slot > 0 {
            *slot -= 1;
            true
        } else {
            false
        }
    }
    /// Present cards with their counts, in canonical order.
    pub fn cards(&self) -> impl Iterator<Item = (Card, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(i, &n)| (Card::from(i as u8), n))
    }
    /// The multiset's weighted median in canonical order: the card an
    /// order-unknown projection "draws" when it must assume something.
    /// A projection of the future, not a prediction of it.
    pub fn expected(&self) -> Option<Card> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let target = (total - 1) / 2;
        let mut cumulative = 0usize;
        for (card, n) in self.cards() {
            cumulative += n as usize;
            if cumulative > target {
                return Some(card);
            }
        }
        unreachable!("nonempty multiset has a median")
    }
}

impl From<&[Card]> for Counts {
    fn from(cards: &[Card]) -> Self {
        let mut counts = Self::empty();
        for card in cards {
            counts.insert(*card);
        }
        counts
    }
}

/// The order-unknown public view of a game at a step boundary.
///
/// This is the complete information set available to runtime decision
/// code: everything the player sees, plus the unordered composition of the
/// remaining deck. Nothing here depends on the hidden draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub hand: Vec<Card>,
    pub plays: u8,
    pub discards: u8,
    pub score: Points,
    pub counts: Counts,
}

impl Projection {
    pub fn over(&self) -> bool {
        self.plays == 0
    }
    /// Cards left in the deck.
    pub fn remaining(&self) -> usize {
        self.counts.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(strs: &[&str]) -> Vec<Card> {
        strs.iter().map(|s| Card::try_from(*s).unwrap()).collect()
    }

    #[test]
    fn counts_iterate_canonically() {
        let counts = Counts::from(cards(&["AC", "2H", "2S", "KD"]).as_slice());
        let order = counts.cards().map(|(c, _)| c.to_string()).collect::<Vec<String>>();
        assert_eq!(order, vec!["2S", "2H", "KD", "AC"]);
    }

    #[test]
    fn insert_remove_round_trip() {
        let card = Card::try_from("7D").unwrap();
        let mut counts = Counts::empty();
        counts.insert(card);
        assert_eq!(counts.of(card), 1);
        assert!(counts.remove(card));
        assert!(!counts.remove(card));
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn expected_is_the_weighted_median() {
        let counts = Counts::from(cards(&["2S", "5H", "AC"]).as_slice());
        assert_eq!(counts.expected(), Some(Card::try_from("5H").unwrap()));
        assert_eq!(Counts::empty().expected(), None);
    }
}
