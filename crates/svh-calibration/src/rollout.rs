use svh_cards::Scoring;
use svh_core::Points;
use svh_core::Privilege;
use svh_core::Seed;
use svh_gameplay::Action;
use svh_gameplay::Event;
use svh_gameplay::Game;
use svh_policy::Heuristic;
use std::cmp::Ordering;

/// Ordered-deck rollout EV evaluator. Calibration only.
///
/// Construction demands a [`Privilege`] token, so instantiating this type
/// on a runtime code path kills the process — that is the contract, not an
/// accident. Per decision point it takes the heuristic's top-K candidates,
/// applies each to a cloned game, and plays R deterministic rollouts to
/// terminal with the heuristic as the follow-on policy. Each rollout
/// re-permutes the undrawn suffix with a sub-seed mixed from the game seed
/// and the sample index, so aggregates measure the candidate against the
/// distribution of futures consistent with the public state.
pub struct Rollout {
    privilege: Privilege,
    samples: usize,
    candidates: usize,
}

/// Per-candidate aggregates over R terminal model scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub action: Action,
    pub mean: f32,
    pub std: f32,
    pub scores: Vec<Points>,
}

impl Rollout {
    pub fn new(samples: usize, candidates: usize) -> Self {
        Self {
            privilege: Privilege::grant(),
            samples,
            candidates,
        }
    }

    /// Aggregates for the top-K candidates at this decision point, best
    /// first: higher mean, then lower deviation, then action shape.
    pub fn evaluate(&self, game: &Game) -> Vec<Aggregate> {
        let ranked = Heuristic::rank(&game.projection());
        let mut aggregates = ranked
            .into_iter()
            .take(self.candidates)
            .map(|valuation| {
                let scores = (0..self.samples)
                    .map(|i| self.simulate(game.clone(), &valuation.action, i as u64))
                    .collect::<Vec<Points>>();
                let mean = scores.iter().map(|&s| s as f32).sum::<f32>() / scores.len() as f32;
                let std = (scores
                    .iter()
                    .map(|&s| (s as f32 - mean).powi(2))
                    .sum::<f32>()
                    / scores.len() as f32)
                    .sqrt();
                Aggregate { action: valuation.action, mean, std, scores }
            })
            .collect::<Vec<Aggregate>>();
        aggregates.sort_by(Self::order);
        if let Some(best) = aggregates.first() {
            log::debug!(
                "[rollout] seed={} best {} mean={:.1}",
                game.seed(),
                best.action,
                best.mean,
            );
        }
        aggregates
    }

    /// One rollout: re-permute the unseen future, apply the candidate, then
    /// follow the heuristic to terminal. Returns the terminal model score.
    fn simulate(&self, mut game: Game, action: &Action, sample: u64) -> Points {
        game.riffle(Self::subseed(game.seed(), sample), &self.privilege);
        let mut total = Self::model_points(
            &game.apply(action.clone()).expect("candidate actions are legal"),
        );
        while !game.over() {
            match Heuristic::decide(&game.projection()) {
                Some(hint) => {
                    let events = game.apply(hint.action).expect("policy actions are legal");
                    total += Self::model_points(&events);
                }
                None => break,
            }
        }
        total
    }

    /// Model-scored points carried by a transition's events.
    fn model_points(events: &[Event]) -> Points {
        events
            .iter()
            .map(|event| match event {
                Event::Scored { ranking, .. } => Scoring::Model.value(*ranking),
                _ => 0,
            })
            .sum()
    }

    /// Sub-seed for sample `i`, mixed so neighboring samples decorrelate.
    fn subseed(seed: Seed, sample: u64) -> Seed {
        seed ^ sample.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15)
    }

    fn order(a: &Aggregate, b: &Aggregate) -> Ordering {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.std.partial_cmp(&b.std).unwrap_or(Ordering::Equal))
            .then_with(|| {
                let da = if a.action.is_play() { 0 } else { a.action.arity() };
                let db = if b.action.is_play() { 0 } else { b.action.arity() };
                da.cmp(&db)
            })
            .then_with(|| a.action.indices().cmp(b.action.indices()))
    }
}
