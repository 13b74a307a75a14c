/// A 5-card hand category.
///
/// Ordered weakest to strongest. Kickers are intentionally absent: scoring
/// depends only on the category, never on ranks within it.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOAK,
    Straight,
    Flush,
    FullHouse,
    FourOAK,
    StraightFlush,
}

impl Ranking {
    /// All categories, weakest first.
    pub const fn all() -> [Ranking; 9] {
        [
            Ranking::HighCard,
            Ranking::OnePair,
            Ranking::TwoPair,
            Ranking::ThreeOAK,
            Ranking::Straight,
            Ranking::Flush,
            Ranking::FullHouse,
            Ranking::FourOAK,
            Ranking::StraightFlush,
        ]
    }
    /// Stable wire label used in events, traces, and artifacts.
    pub const fn label(&self) -> &'static str {
        match self {
            Ranking::HighCard => "HIGH_CARD",
            Ranking::OnePair => "ONE_PAIR",
            Ranking::TwoPair => "TWO_PAIR",
            Ranking::ThreeOAK => "THREE_OF_A_KIND",
            Ranking::Straight => "STRAIGHT",
            Ranking::Flush => "FLUSH",
            Ranking::FullHouse => "FULL_HOUSE",
            Ranking::FourOAK => "FOUR_OF_A_KIND",
            Ranking::StraightFlush => "STRAIGHT_FLUSH",
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
