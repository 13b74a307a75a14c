use super::rank::Rank;
use super::suit::Suit;
use svh_core::Arbitrary;
use svh_core::DECK_SIZE;

/// A single playing card.
///
/// Encoded compactly as `rank * 4 + suit` in one byte (0..52), or as a
/// one-hot bit in a `u64` for set operations. The boundary encoding is the
/// two-character string `RS` (e.g. `"AS"`, `"7H"`).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    /// Compact index in canonical deck order (2S = 0, ..., AC = 51).
    pub fn index(&self) -> u8 {
        (self.rank as u8) * 4 + (self.suit as u8)
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.index()
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        debug_assert!((n as usize) < DECK_SIZE);
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

/// u64 one-hot bit
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}

/// str isomorphism ("AS", "7H")
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        let rank = chars.next().ok_or_else(|| format!("empty card str: {}", s))?;
        let suit = chars.next().ok_or_else(|| format!("truncated card str: {}", s))?;
        match chars.next() {
            Some(_) => Err(format!("overlong card str: {}", s)),
            None => Ok(Self {
                rank: Rank::try_from(rank)?,
                suit: Suit::try_from(suit)?,
            }),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl Arbitrary for Card {
    fn random() -> Self {
        Self::from(rand::random_range(0..DECK_SIZE as u8))
    }
}
