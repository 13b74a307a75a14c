use super::options;
use svh_cards::Card;
use svh_cards::Evaluator;
use svh_cards::Hand;
use svh_cards::Rank;
use svh_cards::Scoring;
use svh_core::COMPLETION_TOP_M;
use svh_core::Expectation;
use svh_core::PLAY_SIZE;
use svh_core::Probability;
use svh_gameplay::Action;
use svh_gameplay::Projection;
use std::cmp::Ordering;

/// The explanation key attached to every heuristic recommendation.
pub const EXPLANATION: &str = "ai.reason.heuristic";

/// A recommended action with its explanation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    pub action: Action,
    pub rule: String,
    pub expectation: Expectation,
}

/// A candidate action with its order-unknown valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub action: Action,
    pub expectation: Expectation,
    pub variance: Expectation,
}

/// The order-unknown decision policy.
///
/// Plays are valued at their model score. Discards are valued by a
/// closed-form surrogate: every distinct remaining card is a single-draw
/// completion of the retained cards, the top few completions contribute
/// their hit probability, and the rest collapse into the mean completion
/// value. No sampling, no ordered-deck access, fully deterministic.
pub struct Heuristic;

impl Heuristic {
    /// The single best action, or None when the game is over.
    pub fn decide(projection: &Projection) -> Option<Hint> {
        let best = Self::rank(projection).into_iter().next()?;
        let rule = match &best.action {
            Action::Play(picks) => {
                let cards = picks.iter().map(|&i| projection.hand[i]).collect::<Vec<Card>>();
                Evaluator::from(Hand::from(cards)).classify().label().to_string()
            }
            Action::Discard(picks) => format!("discard_worst_{}", picks.len()),
        };
        log::debug!("[policy] {} ev={:.1}", best.action, best.expectation);
        Some(Hint {
            action: best.action,
            rule,
            expectation: best.expectation,
        })
    }

    /// Every candidate, best first, under the deterministic tie chain:
    /// expectation, then (with one play left) plays before discards, then
    /// lower variance, then fewer discards, then smallest index set.
    pub fn rank(projection: &Projection) -> Vec<Valuation> {
        let mut valuations = options::options(projection)
            .into_iter()
            .map(|action| Self::valuate(projection, action))
            .collect::<Vec<Valuation>>();
        valuations.sort_by(|a, b| Self::order(projection, a, b));
        valuations
    }

    /// Hand indices worst-first: the retention order driving the discard
    /// templates.
    pub fn retention(projection: &Projection) -> Vec<usize> {
        let mut indices = (0..projection.hand.len()).collect::<Vec<usize>>();
        indices.sort_by(|&a, &b| {
            let ka = Self::keep(projection, projection.hand[a]);
            let kb = Self::keep(projection, projection.hand[b]);
            ka.partial_cmp(&kb)
                .unwrap_or(Ordering::Equal)
                .then(projection.hand[a].index().cmp(&projection.hand[b].index()))
        });
        indices
    }

    fn valuate(projection: &Projection, action: Action) -> Valuation {
        match &action {
            Action::Play(picks) => {
                let cards = picks.iter().map(|&i| projection.hand[i]).collect::<Vec<Card>>();
                let ranking = Evaluator::from(Hand::from(cards)).classify();
                Valuation {
                    action,
                    expectation: Scoring::Model.value(ranking) as Expectation,
                    variance: 0.0,
                }
            }
            Action::Discard(picks) => {
                let (expectation, variance) = Self::surrogate(projection, picks);
                Valuation { action, expectation, variance }
            }
        }
    }

    /// Closed-form expected value of discarding `picks`.
    fn surrogate(projection: &Projection, picks: &[usize]) -> (Expectation, Expectation) {
        let retained = projection
            .hand
            .iter()
            .enumerate()
            .filter(|(i, _)| !picks.contains(i))
            .map(|(_, c)| *c)
            .collect::<Vec<Card>>();
        let draws = picks.len();
        let total = projection.counts.total();
        if total == 0 {
            return (0.0, 0.0);
        }
        // one completion per distinct remaining card
        let mut completions = projection
            .counts
            .cards()
            .map(|(card, copies)| {
                let value = Self::best_five(&retained, card) as Expectation;
                let hit = Self::at_least_one(copies as usize, total, draws);
                (card, value, hit, copies)
            })
            .collect::<Vec<(Card, Expectation, Probability, u8)>>();
        let weight = completions
            .iter()
            .map(|(_, _, _, copies)| *copies as Expectation)
            .sum::<Expectation>();
        let baseline = completions
            .iter()
            .map(|(_, value, _, copies)| value * *copies as Expectation)
            .sum::<Expectation>()
            / weight;
        // most promising first, deterministic on ties
        completions.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.index().cmp(&b.0.index()))
        });
        let top = &completions[..COMPLETION_TOP_M.min(completions.len())];
        let covered = top.iter().map(|(_, _, hit, _)| *hit).sum::<Probability>();
        let expectation = baseline
            + top
                .iter()
                .map(|(_, value, hit, _)| hit * (value - baseline))
                .sum::<Expectation>();
        let variance = top
            .iter()
            .map(|(_, value, hit, _)| hit * (value - expectation).powi(2))
            .sum::<Expectation>()
            + (1.0 - covered).max(0.0) * (baseline - expectation).powi(2);
        (expectation, variance)
    }

    /// Best model value among 5-card subsets of retained + the drawn card.
    fn best_five(retained: &[Card], drawn: Card) -> u32 {
        let mut cards = retained.to_vec();
        cards.push(drawn);
        if cards.len() == PLAY_SIZE {
            let ranking = Evaluator::from(Hand::from(cards)).classify();
            return Scoring::Model.value(ranking);
        }
        Hand::from(cards)
            .subsets(PLAY_SIZE)
            .map(|five| Scoring::Model.value(Evaluator::from(five).classify()))
            .max()
            .unwrap_or(0)
    }

    /// P(at least one of `copies` identical cards among `draws` uniform
    /// draws without replacement from `total` cards).
    fn at_least_one(copies: usize, total: usize, draws: usize) -> Probability {
        let mut miss = 1.0f32;
        for i in 0..draws {
            miss *= (total - copies - i) as f32 / (total - i) as f32;
        }
        1.0 - miss
    }

    /// How much a card is worth keeping: raw rank, plus pair, flush, and
    /// straight synergy with the rest of the hand.
    fn keep(projection: &Projection, card: Card) -> Expectation {
        let rank = u8::from(card.rank()) as Expectation / 12.0;
        let pairing = projection
            .hand
            .iter()
            .filter(|c| **c != card && c.rank() == card.rank())
            .count() as Expectation
            * 3.0;
        let suited = projection
            .hand
            .iter()
            .filter(|c| **c != card && c.suit() == card.suit())
            .count() as Expectation
            * 0.5;
        let running = projection
            .hand
            .iter()
            .filter(|c| **c != card && c.rank() != card.rank())
            .filter(|c| Self::adjacent(card.rank(), c.rank()))
            .count() as Expectation
            * 0.25;
        rank + pairing + suited + running
    }

    /// Within straight distance, counting the ace as both high and low.
    fn adjacent(a: Rank, b: Rank) -> bool {
        let (a, b) = (u8::from(a) as i8, u8::from(b) as i8);
        let direct = (a - b).abs() <= 2;
        let wheel_a = a == 12 && b <= 2;
        let wheel_b = b == 12 && a <= 2;
        direct || wheel_a || wheel_b
    }

    /// The deterministic preference chain from the ranking contract.
    fn order(projection: &Projection, a: &Valuation, b: &Valuation) -> Ordering {
        b.expectation
            .partial_cmp(&a.expectation)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                if projection.plays == 1 {
                    a.action.is_play().cmp(&b.action.is_play()).reverse()
                } else {
                    a.variance.partial_cmp(&b.variance).unwrap_or(Ordering::Equal)
                }
            })
            .then_with(|| {
                let da = if a.action.is_play() { 0 } else { a.action.arity() };
                let db = if b.action.is_play() { 0 } else { b.action.arity() };
                da.cmp(&db)
            })
            .then_with(|| a.action.indices().cmp(b.action.indices()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svh_gameplay::Counts;

    /// A projection with the given hand, the rest of the deck remaining.
    fn projected(hand: [&str; 7]) -> Projection {
        let hand = hand
            .iter()
            .map(|s| Card::try_from(*s).unwrap())
            .collect::<Vec<Card>>();
        let mut counts = Counts::empty();
        for n in 0..52u8 {
            let card = Card::from(n);
            if !hand.contains(&card) {
                counts.insert(card);
            }
        }
        Projection { hand, plays: 4, discards: 10, score: 0, counts }
    }

    #[test]
    fn plays_the_quads_when_dealt_them() {
        let projection = projected(["7H", "7C", "7S", "7D", "2C", "3C", "4C"]);
        let hint = Heuristic::decide(&projection).unwrap();
        assert!(hint.action.is_play());
        assert_eq!(hint.rule, "FOUR_OF_A_KIND");
        assert_eq!(hint.expectation, 730.0);
    }

    #[test]
    fn prefers_the_play_on_ties_with_one_play_left() {
        // play and best discard both sit at exactly 730: the tie chain
        // must resolve toward finishing the game
        let mut projection = projected(["7H", "7C", "7S", "7D", "2C", "3C", "4C"]);
        projection.plays = 1;
        let hint = Heuristic::decide(&projection).unwrap();
        assert!(hint.action.is_play());
    }

    #[test]
    fn no_hint_after_the_game_ends() {
        let mut projection = projected(["2S", "4H", "6D", "8C", "TS", "QH", "AD"]);
        projection.plays = 0;
        assert!(Heuristic::decide(&projection).is_none());
    }

    #[test]
    fn retention_keeps_pairs_over_lone_low_cards() {
        let projection = projected(["9S", "9H", "2C", "AD", "3D", "9C", "KS"]);
        let worst = Heuristic::retention(&projection);
        let lone_low = projection.hand.iter().position(|c| c.rank() == Rank::Two).unwrap();
        let paired = projection.hand.iter().position(|c| c.rank() == Rank::Nine).unwrap();
        let rank_of = |i: usize| worst.iter().position(|w| *w == i).unwrap();
        assert!(rank_of(lone_low) < rank_of(paired));
    }

    #[test]
    fn ranking_is_total_and_deterministic() {
        let projection = projected(["2S", "7H", "9D", "JC", "QS", "KH", "AD"]);
        let first = Heuristic::rank(&projection);
        let second = Heuristic::rank(&projection);
        assert_eq!(first, second);
        assert_eq!(first.len(), 21 + 3);
        assert!(first.windows(2).all(|w| w[0].expectation >= w[1].expectation));
    }

    #[test]
    fn completion_probability_bounds() {
        let p = Heuristic::at_least_one(1, 45, 3);
        assert!(p > 0.0 && p < 1.0);
        assert_eq!(Heuristic::at_least_one(0, 45, 3), 0.0);
    }

    #[test]
    fn hint_depends_only_on_the_public_projection() {
        svh_core::assume(svh_core::Context::Calibration);
        let privilege = svh_core::Privilege::grant();
        let (mut game, _) = svh_gameplay::Game::start(99, None);
        let untouched = game.projection();
        let before = Heuristic::decide(&untouched);
        game.riffle(0xABCDEF, &privilege);
        assert_eq!(game.projection(), untouched);
        let after = Heuristic::decide(&game.projection());
        assert_eq!(before, after);
    }
}
