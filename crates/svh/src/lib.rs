//! Umbrella crate for the sevenhand workspace.
//!
//! Re-exports the whole stack behind one dependency: core aliases and the
//! information-set guard, the card model, the game engine, the
//! order-unknown policy, the boundary DTOs, and the calibration pipeline.
pub use svh_core::*;

pub use svh_calibration as calibration;
pub use svh_cards as cards;
pub use svh_dto as dto;
pub use svh_gameplay as gameplay;
pub use svh_policy as policy;

#[cfg(test)]
mod tests {
    use super::cards::Card;
    use super::dto::ApiResponse;
    use super::gameplay::Action;
    use super::gameplay::Mode;
    use super::gameplay::Session;
    use super::gameplay::Tier;
    use super::policy::Heuristic;

    /// A full practice game driven end-to-end through the public stack:
    /// session, projections, hints, and response envelopes.
    #[test]
    fn a_whole_game_through_the_public_surface() {
        let (mut session, events) = Session::start(123456, Mode::Practice, Tier::Medium, None);
        let response = ApiResponse::of(&session, &events);
        assert_eq!(response.state.hand.len(), 7);
        assert!(response.state.hand.iter().all(|s| Card::try_from(s.as_str()).is_ok()));
        while !session.game().over() {
            let projection = session.advise().unwrap();
            let hint = Heuristic::decide(&projection).unwrap();
            let events = session.act(hint.action).unwrap();
            let response = ApiResponse::of(&session, &events);
            assert_eq!(response.step_index, session.step());
        }
        assert!(session.game().score() >= 200);
    }

    /// The public response never contains ordered-deck information.
    #[test]
    fn responses_expose_counts_not_order() {
        let (session, events) = Session::start(99, Mode::Practice, Tier::Easy, None);
        let json = serde_json::to_string(&ApiResponse::of(&session, &events)).unwrap();
        assert!(json.contains("deck_remaining_counts"));
        assert!(!json.contains("draw_pointer"));
        assert!(!json.contains("deck_order"));
    }

    #[test]
    fn replaying_the_log_reproduces_the_session() {
        let (mut session, _) = Session::start(7777, Mode::Practice, Tier::Easy, None);
        session.act(Action::Discard(vec![0, 1])).unwrap();
        session.act(Action::Play(vec![0, 1, 2, 3, 4])).unwrap();
        let log = session.game().history().to_vec();
        let (replayed, _) =
            super::gameplay::Game::jump(7777, None, &log, log.len()).unwrap();
        assert_eq!(replayed.projection(), session.game().projection());
    }
}
