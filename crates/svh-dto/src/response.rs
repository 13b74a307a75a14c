use super::event::ApiEvent;
use super::state::ApiState;
use serde::Deserialize;
use serde::Serialize;
use svh_gameplay::Event;
use svh_gameplay::Session;

/// The envelope returned with every step-boundary response: public state,
/// the call's events in order, the step index, and the assist policies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub state: ApiState,
    pub events: Vec<ApiEvent>,
    pub step_index: usize,
    pub hint_policy: String,
    pub jump_policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_budget_total: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_budget_remaining: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump_budget_total: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump_budget_remaining: Option<u8>,
}

impl ApiResponse {
    pub fn of(session: &Session, events: &[Event]) -> Self {
        Self {
            state: ApiState::from(&session.game().projection()),
            events: events.iter().map(ApiEvent::from).collect(),
            step_index: session.step(),
            hint_policy: session.hints().label().to_string(),
            jump_policy: session.jumps().label().to_string(),
            hint_budget_total: session.hints().total(),
            hint_budget_remaining: session.hints().left(),
            jump_budget_total: session.jumps().total(),
            jump_budget_remaining: session.jumps().left(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svh_gameplay::Mode;
    use svh_gameplay::Tier;

    #[test]
    fn step_index_equals_history_length() {
        let (mut session, events) = Session::start(5, Mode::Practice, Tier::Easy, None);
        let response = ApiResponse::of(&session, &events);
        assert_eq!(response.step_index, 0);
        assert_eq!(response.hint_policy, "unlimited");
        let events = session
            .act(svh_gameplay::Action::Play(vec![0, 1, 2, 3, 4]))
            .unwrap();
        let response = ApiResponse::of(&session, &events);
        assert_eq!(response.step_index, 1);
    }

    #[test]
    fn limited_policies_expose_their_budgets() {
        let (session, events) = Session::start(5, Mode::Challenge, Tier::Medium, Some(700));
        let response = ApiResponse::of(&session, &events);
        assert_eq!(response.hint_policy, "limited");
        assert_eq!(response.hint_budget_total, Some(3));
        assert_eq!(response.jump_budget_remaining, Some(2));
    }

    #[test]
    fn practice_omits_budget_fields_in_json() {
        let (session, events) = Session::start(5, Mode::Practice, Tier::Easy, None);
        let json = serde_json::to_string(&ApiResponse::of(&session, &events)).unwrap();
        assert!(!json.contains("hint_budget_total"));
    }
}
