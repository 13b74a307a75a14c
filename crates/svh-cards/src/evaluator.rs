use super::hand::Hand;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;
use svh_core::PLAY_SIZE;

/// Bitwise classifier for an exactly-5-card hand.
///
/// Using the compact Hand representation, we search for the strongest
/// category with bitwise operations, checking categories in priority order.
/// Order-independent by construction: the bitset has no order to leak.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    pub fn classify(&self) -> Ranking {
        debug_assert_eq!(self.0.size(), PLAY_SIZE, "classifier takes exactly 5 cards");
        None.or_else(|| self.find_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .unwrap_or(Ranking::HighCard)
    }

    ///

    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().map(|suit| {
            if Self::is_straight(self.suit_mask(suit)) {
                Ranking::StraightFlush
            } else {
                Ranking::Flush
            }
        })
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.multiplicities()
            .iter()
            .any(|&n| n == 4)
            .then_some(Ranking::FourOAK)
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        let counts = self.multiplicities();
        let trips = counts.iter().any(|&n| n == 3);
        let pairs = counts.iter().any(|&n| n == 2);
        (trips && pairs).then_some(Ranking::FullHouse)
    }
    fn find_straight(&self) -> Option<Ranking> {
        Self::is_straight(self.rank_mask()).then_some(Ranking::Straight)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.multiplicities()
            .iter()
            .any(|&n| n == 3)
            .then_some(Ranking::ThreeOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        (self.n_pairs() == 2).then_some(Ranking::TwoPair)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        (self.n_pairs() == 1).then_some(Ranking::OnePair)
    }

    ///

    /// Five consecutive ranks, with the wheel (A-2-3-4-5) as the one
    /// special case. No wrap-around straights.
    fn is_straight(ranks: u16) -> bool {
        const WHEEL: u16 = 0b_1000000001111;
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits > 0 || WHEEL == (WHEEL & ranks)
    }

    /// which ranks are in the hand, neglecting suit
    fn rank_mask(&self) -> u16 {
        Rank::all()
            .iter()
            .filter(|r| self.multiplicity(**r) > 0)
            .map(|r| u16::from(*r))
            .fold(0, |acc, r| acc | r)
    }
    /// which ranks are in the hand, restricted to one suit
    fn suit_mask(&self, suit: Suit) -> u16 {
        let bits = u64::from(self.0) & u64::from(suit);
        Rank::all()
            .iter()
            .filter(|r| bits >> ((**r as u8) * 4) & 0xF != 0)
            .map(|r| u16::from(*r))
            .fold(0, |acc, r| acc | r)
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        Suit::all()
            .into_iter()
            .find(|s| (u64::from(self.0) & u64::from(*s)).count_ones() as usize >= PLAY_SIZE)
    }
    /// how many cards of each rank, from nibble popcounts
    fn multiplicities(&self) -> [u8; 13] {
        let mut counts = [0u8; 13];
        for rank in Rank::all() {
            counts[rank as usize] = self.multiplicity(rank);
        }
        counts
    }
    fn multiplicity(&self, rank: Rank) -> u8 {
        (u64::from(self.0) >> ((rank as u8) * 4) & 0xF).count_ones() as u8
    }
    fn n_pairs(&self) -> usize {
        self.multiplicities().iter().filter(|&&n| n == 2).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    fn classify(cards: [&str; 5]) -> Ranking {
        let hand = Hand::from(
            cards
                .iter()
                .map(|s| Card::try_from(*s).unwrap())
                .collect::<Vec<Card>>(),
        );
        Evaluator::from(hand).classify()
    }

    #[test]
    fn high_card() {
        assert_eq!(classify(["AS", "KH", "QD", "JC", "9S"]), Ranking::HighCard);
    }

    #[test]
    fn one_pair() {
        assert_eq!(classify(["AS", "AH", "KD", "QC", "JS"]), Ranking::OnePair);
    }

    #[test]
    fn two_pair() {
        assert_eq!(classify(["AS", "AH", "KD", "KC", "QS"]), Ranking::TwoPair);
    }

    #[test]
    fn three_oak() {
        assert_eq!(classify(["AS", "AH", "AD", "KC", "QS"]), Ranking::ThreeOAK);
    }

    #[test]
    fn straight() {
        assert_eq!(classify(["TS", "JH", "QD", "KC", "AS"]), Ranking::Straight);
    }

    #[test]
    fn wheel_straight() {
        assert_eq!(classify(["AS", "2H", "3D", "4C", "5S"]), Ranking::Straight);
    }

    #[test]
    fn flush() {
        assert_eq!(classify(["AS", "KS", "QS", "JS", "9S"]), Ranking::Flush);
    }

    #[test]
    fn full_house() {
        assert_eq!(classify(["AS", "AH", "AD", "KC", "KS"]), Ranking::FullHouse);
    }

    #[test]
    fn four_oak() {
        assert_eq!(classify(["AS", "AH", "AD", "AC", "KS"]), Ranking::FourOAK);
    }

    #[test]
    fn straight_flush() {
        assert_eq!(
            classify(["5S", "6S", "7S", "8S", "9S"]),
            Ranking::StraightFlush
        );
    }

    #[test]
    fn wheel_straight_flush() {
        assert_eq!(
            classify(["AS", "2S", "3S", "4S", "5S"]),
            Ranking::StraightFlush
        );
    }

    #[test]
    fn royal_reports_as_straight_flush() {
        assert_eq!(
            classify(["TS", "JS", "QS", "KS", "AS"]),
            Ranking::StraightFlush
        );
    }

    #[test]
    fn no_wraparound_straight() {
        assert_eq!(classify(["QS", "KH", "AD", "2C", "3S"]), Ranking::HighCard);
    }

    #[test]
    fn order_independent() {
        let a = classify(["7H", "7C", "7S", "7D", "2C"]);
        let b = classify(["2C", "7D", "7S", "7C", "7H"]);
        assert_eq!(a, Ranking::FourOAK);
        assert_eq!(a, b);
    }
}
