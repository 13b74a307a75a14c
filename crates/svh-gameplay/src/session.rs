use super::action::Action;
use super::error::Error;
use super::event::Event;
use super::game::Game;
use super::mode::Allowance;
use super::mode::Mode;
use super::mode::Tier;
use super::projection::Projection;
use svh_core::Points;
use svh_core::Seed;

/// One player's session: the game plus the bookkeeping that lives outside
/// the replayable path.
///
/// Hint and jump allowances are session-scoped. They are spent forward only
/// and are never refunded by jumping: replay reconstructs game state, not
/// assist budgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    mode: Mode,
    tier: Tier,
    game: Game,
    hints: Allowance,
    jumps: Allowance,
}

impl Session {
    /// Open a session. Challenge mode requires the tier target resolved
    /// from the seed manifest by the caller; practice passes None.
    pub fn start(
        seed: Seed,
        mode: Mode,
        tier: Tier,
        target: Option<Points>,
    ) -> (Self, Vec<Event>) {
        let target = match mode {
            Mode::Practice => None,
            Mode::Challenge => target,
        };
        let (game, events) = Game::start(seed, target);
        let session = Self {
            mode,
            tier,
            game,
            hints: mode.hints(tier),
            jumps: mode.jumps(tier),
        };
        (session, events)
    }

    /// Apply a player action; serialized per session by the caller.
    pub fn act(&mut self, action: Action) -> Result<Vec<Event>, Error> {
        self.game.apply(action)
    }

    /// Jump to step `k`, truncating any future history. Spends a jump unit
    /// after the step is validated and never hands it back.
    pub fn jump(&mut self, step: usize) -> Result<Vec<Event>, Error> {
        if step > self.game.step() {
            return Err(Error::JumpNotAllowed { step, len: self.game.step() });
        }
        if self.jumps.off() {
            return Err(Error::JumpNotAllowed { step, len: self.game.step() });
        }
        if !self.jumps.spend() {
            return Err(Error::JumpBudgetExhausted);
        }
        let history = self.game.history().to_vec();
        let (game, events) = Game::jump(self.game.seed(), self.game.target(), &history, step)?;
        self.game = game;
        Ok(events)
    }

    /// Spend a hint unit and surface the order-unknown view for the policy.
    pub fn advise(&mut self) -> Result<Projection, Error> {
        if !self.hints.spend() {
            return Err(Error::HintBudgetExhausted);
        }
        Ok(self.game.projection())
    }
}

/// Accessors for the response surface.
impl Session {
    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn tier(&self) -> Tier {
        self.tier
    }
    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn step(&self) -> usize {
        self.game.step()
    }
    pub fn hints(&self) -> Allowance {
        self.hints
    }
    pub fn jumps(&self) -> Allowance {
        self.jumps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play() -> Action {
        Action::Play(vec![0, 1, 2, 3, 4])
    }

    #[test]
    fn practice_ignores_targets_and_never_runs_dry() {
        let (mut session, _) = Session::start(3, Mode::Practice, Tier::Hard, Some(1000));
        assert_eq!(session.game().target(), None);
        for _ in 0..50 {
            assert!(session.advise().is_ok());
        }
    }

    #[test]
    fn challenge_hints_run_dry() {
        let (mut session, _) = Session::start(3, Mode::Challenge, Tier::Hard, Some(500));
        assert!(session.advise().is_ok());
        assert_eq!(session.advise(), Err(Error::HintBudgetExhausted));
    }

    #[test]
    fn jumps_are_not_refunded_by_jumping() {
        let (mut session, _) = Session::start(8, Mode::Challenge, Tier::Medium, Some(500));
        session.act(play()).unwrap();
        session.act(play()).unwrap();
        assert_eq!(session.jumps().left(), Some(2));
        session.jump(1).unwrap();
        assert_eq!(session.jumps().left(), Some(1));
        assert_eq!(session.step(), 1);
        session.jump(0).unwrap();
        assert_eq!(session.jumps().left(), Some(0));
        assert_eq!(session.jump(0), Err(Error::JumpBudgetExhausted));
    }

    #[test]
    fn jump_past_history_does_not_spend() {
        let (mut session, _) = Session::start(8, Mode::Challenge, Tier::Easy, Some(500));
        assert_eq!(
            session.jump(5),
            Err(Error::JumpNotAllowed { step: 5, len: 0 }),
        );
        assert_eq!(session.jumps().left(), Some(3));
    }

    #[test]
    fn acting_after_a_jump_extends_the_truncated_log() {
        let (mut session, _) = Session::start(21, Mode::Practice, Tier::Easy, None);
        session.act(Action::Discard(vec![0])).unwrap();
        session.act(Action::Discard(vec![1])).unwrap();
        session.jump(1).unwrap();
        session.act(play()).unwrap();
        assert_eq!(session.step(), 2);
        assert!(session.game().history()[1].is_play());
    }
}
