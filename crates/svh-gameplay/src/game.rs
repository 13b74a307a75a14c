use super::action::Action;
use super::error::Error;
use super::event::Event;
use super::projection::Counts;
use super::projection::Projection;
use svh_cards::Card;
use svh_cards::Deck;
use svh_cards::Evaluator;
use svh_cards::Hand;
use svh_cards::Scoring;
use svh_core::DECK_SIZE;
use svh_core::DISCARD_BUDGET;
use svh_core::HAND_SIZE;
use svh_core::PLAY_BUDGET;
use svh_core::PLAY_SIZE;
use svh_core::Points;
use svh_core::Privilege;
use svh_core::Seed;

/// The authoritative state of one game.
///
/// Holds the single source of truth — the hidden ordered deck — and derives
/// every public observation through [`Game::projection`], which drops order.
/// Transitions validate fully before mutating anything, so a rejected
/// action leaves the state untouched. The action log makes any reached
/// state reproducible from `(seed, history)` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    seed: Seed,
    deck: Deck,
    hand: Vec<Card>,
    plays: u8,
    discards: u8,
    score: Points,
    target: Option<Points>,
    history: Vec<Action>,
}

/// Construction and replay.
impl Game {
    /// Shuffle from the seed, deal seven, arm the budgets.
    pub fn start(seed: Seed, target: Option<Points>) -> (Self, Vec<Event>) {
        log::debug!("[game] start seed={}", seed);
        Self::deal(seed, Deck::shuffled(seed), target)
    }

    /// Replay `history[..step]` from a fresh start. The returned state's log
    /// is the truncated prefix; the caller's future entries are gone.
    pub fn jump(
        seed: Seed,
        target: Option<Points>,
        history: &[Action],
        step: usize,
    ) -> Result<(Self, Vec<Event>), Error> {
        if step > history.len() {
            return Err(Error::JumpNotAllowed { step, len: history.len() });
        }
        let (mut game, mut events) = Self::start(seed, target);
        for action in &history[..step] {
            events.extend(game.apply(action.clone())?);
        }
        events.push(Event::Jumped { step });
        Ok((game, events))
    }

    fn deal(seed: Seed, mut deck: Deck, target: Option<Points>) -> (Self, Vec<Event>) {
        let hand = (0..HAND_SIZE).filter_map(|_| deck.draw()).collect();
        let game = Self {
            seed,
            deck,
            hand,
            plays: PLAY_BUDGET,
            discards: DISCARD_BUDGET,
            score: 0,
            target,
            history: Vec::new(),
        };
        game.invariants();
        (game, vec![Event::Started { seed }])
    }
}

/// Transitions.
impl Game {
    /// Validate, then transition. Validation errors leave the state
    /// untouched; the caller retries with a corrected action.
    pub fn apply(&mut self, action: Action) -> Result<Vec<Event>, Error> {
        self.validate(&action)?;
        let events = match &action {
            Action::Play(picks) => self.play(picks.clone()),
            Action::Discard(picks) => self.discard(picks.clone()),
        };
        self.history.push(action);
        self.invariants();
        Ok(events)
    }

    fn validate(&self, action: &Action) -> Result<(), Error> {
        if self.plays == 0 {
            return Err(Error::GameAlreadyEnded);
        }
        match action {
            Action::Play(picks) if picks.len() != PLAY_SIZE => {
                return Err(Error::PlayRequiresFive { given: picks.len() });
            }
            Action::Discard(picks) if picks.is_empty() || picks.len() > self.hand.len() => {
                return Err(Error::DiscardSizeInvalid { given: picks.len() });
            }
            _ => {}
        }
        let mut seen = [false; HAND_SIZE];
        for &index in action.indices() {
            if index >= self.hand.len() {
                return Err(Error::IndicesOutOfRange { index, len: self.hand.len() });
            }
            if seen[index] {
                return Err(Error::IndicesNotUnique { index });
            }
            seen[index] = true;
        }
        if let Action::Discard(picks) = action {
            if picks.len() > self.discards as usize {
                return Err(Error::DiscardBudgetExceeded {
                    given: picks.len(),
                    left: self.discards,
                });
            }
        }
        Ok(())
    }

    fn play(&mut self, picks: Vec<usize>) -> Vec<Event> {
        let selected = self.take(&picks);
        let ranking = Evaluator::from(Hand::from(selected)).classify();
        let points = Scoring::Gameplay.value(ranking);
        self.score += points;
        self.refill();
        self.plays -= 1;
        log::debug!("[game] play {} +{} -> {}", ranking, points, self.score);
        let mut events = vec![Event::Scored { ranking, points }];
        if self.plays == 0 {
            events.push(Event::Ended { score: self.score });
            if let Some(target) = self.target {
                events.push(if self.score >= target {
                    Event::Passed { score: self.score, target }
                } else {
                    Event::Failed { score: self.score, target }
                });
            }
        }
        events
    }

    fn discard(&mut self, picks: Vec<usize>) -> Vec<Event> {
        let count = picks.len();
        let _ = self.take(&picks);
        self.refill();
        self.discards -= count as u8;
        log::debug!("[game] discard {} ({} left)", count, self.discards);
        vec![Event::Discarded { count }]
    }

    /// Remove the selected cards from the hand, highest index first so the
    /// remaining positions stay stable. Remove-before-draw is normative.
    fn take(&mut self, picks: &[usize]) -> Vec<Card> {
        let mut sorted = picks.to_vec();
        sorted.sort_unstable();
        let cards = sorted.iter().map(|&i| self.hand[i]).collect::<Vec<Card>>();
        for &index in sorted.iter().rev() {
            self.hand.remove(index);
        }
        cards
    }

    fn refill(&mut self) {
        while self.hand.len() < HAND_SIZE {
            match self.deck.draw() {
                Some(card) => self.hand.push(card),
                None => break,
            }
        }
    }

    /// Cards permanently out of play so far.
    fn consumed(&self) -> usize {
        let played = (PLAY_BUDGET - self.plays) as usize * PLAY_SIZE;
        let discarded = (DISCARD_BUDGET - self.discards) as usize;
        played + discarded
    }

    /// Mass conservation and hand integrity, checked after every mutation.
    fn invariants(&self) {
        debug_assert_eq!(self.hand.len(), HAND_SIZE);
        debug_assert_eq!(Hand::from(self.hand.as_slice()).size(), self.hand.len());
        debug_assert_eq!(
            self.hand.len() + self.deck.size() + self.consumed(),
            DECK_SIZE,
        );
        debug_assert!(self
            .hand
            .iter()
            .all(|card| !self.deck.remaining().contains(card)));
    }
}

/// Public state accessors.
impl Game {
    pub fn seed(&self) -> Seed {
        self.seed
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn plays(&self) -> u8 {
        self.plays
    }
    pub fn discards(&self) -> u8 {
        self.discards
    }
    pub fn score(&self) -> Points {
        self.score
    }
    pub fn target(&self) -> Option<Points> {
        self.target
    }
    pub fn history(&self) -> &[Action] {
        &self.history
    }
    /// `len(history)`: the step index reported with every response.
    pub fn step(&self) -> usize {
        self.history.len()
    }
    pub fn over(&self) -> bool {
        self.plays == 0
    }
    /// The order-unknown public view. The only deck observation runtime
    /// code ever receives.
    pub fn projection(&self) -> Projection {
        Projection {
            hand: self.hand.clone(),
            plays: self.plays,
            discards: self.discards,
            score: self.score,
            counts: Counts::from(self.deck.remaining()),
        }
    }
}

/// Privileged ordered-deck surfaces. Calibration only.
impl Game {
    /// The undrawn suffix in draw order.
    pub fn ordered(&self, _: &Privilege) -> &[Card] {
        self.deck.remaining()
    }
    /// Re-permute the undrawn suffix to sample an alternate future.
    pub fn riffle(&mut self, seed: Seed, _: &Privilege) {
        self.deck.riffle(seed);
    }
}
