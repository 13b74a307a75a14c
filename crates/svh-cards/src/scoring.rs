use super::ranking::Ranking;
use svh_core::Points;

/// Category → points tables.
///
/// Gameplay is authoritative for the running score. Model collapses the
/// jackpot category (straight flush) into a flush so that policy and
/// calibration statistics are not distorted by a single outlier payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
    Gameplay,
    Model,
}

impl Scoring {
    pub const fn value(&self, ranking: Ranking) -> Points {
        match (self, ranking) {
            (Scoring::Model, Ranking::StraightFlush) => Self::Gameplay.value(Ranking::Flush),
            (_, Ranking::HighCard) => 50,
            (_, Ranking::OnePair) => 70,
            (_, Ranking::TwoPair) => 150,
            (_, Ranking::ThreeOAK) => 250,
            (_, Ranking::Straight) => 300,
            (_, Ranking::Flush) => 360,
            (_, Ranking::FullHouse) => 440,
            (_, Ranking::FourOAK) => 730,
            (_, Ranking::StraightFlush) => 999_999,
        }
    }
}
