use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use svh_gameplay::Error;
use svh_gameplay::Event;

/// A structured message at the boundary: coarse type, stable message key,
/// and the key's parameters. UI strings are rendered elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub message_key: String,
    pub params: serde_json::Value,
}

impl From<&Event> for ApiEvent {
    fn from(event: &Event) -> Self {
        let params = match event {
            Event::Started { seed } => json!({ "seed": seed }),
            Event::Scored { ranking, points } => {
                json!({ "category": ranking.label(), "points": points })
            }
            Event::Discarded { count } => json!({ "count": count }),
            Event::Jumped { step } => json!({ "step": step }),
            Event::Ended { score } => json!({ "score": score }),
            Event::Passed { score, target } => json!({ "score": score, "target": target }),
            Event::Failed { score, target } => json!({ "score": score, "target": target }),
        };
        Self {
            kind: Self::class(event.key()),
            message_key: event.key().to_string(),
            params,
        }
    }
}

impl From<&Error> for ApiEvent {
    fn from(error: &Error) -> Self {
        let params = match error {
            Error::PlayRequiresFive { given } => json!({ "given": given }),
            Error::DiscardSizeInvalid { given } => json!({ "given": given }),
            Error::DiscardBudgetExceeded { given, left } => {
                json!({ "given": given, "left": left })
            }
            Error::IndicesOutOfRange { index, len } => json!({ "index": index, "len": len }),
            Error::IndicesNotUnique { index } => json!({ "index": index }),
            Error::JumpNotAllowed { step, len } => json!({ "step": step, "len": len }),
            _ => json!({}),
        };
        Self {
            kind: "error".to_string(),
            message_key: error.key().to_string(),
            params,
        }
    }
}

impl ApiEvent {
    /// The message key's namespace: `game`, `play`, `discard`, `error`, `ai`.
    fn class(key: &str) -> String {
        key.split('.').next().unwrap_or("game").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svh_cards::Ranking;

    #[test]
    fn scored_event_carries_category_and_points() {
        let event = Event::Scored { ranking: Ranking::FourOAK, points: 730 };
        let api = ApiEvent::from(&event);
        assert_eq!(api.kind, "play");
        assert_eq!(api.message_key, "play.scored");
        assert_eq!(api.params["category"], "FOUR_OF_A_KIND");
        assert_eq!(api.params["points"], 730);
    }

    #[test]
    fn errors_map_to_the_error_namespace() {
        let api = ApiEvent::from(&Error::DiscardBudgetExceeded { given: 4, left: 2 });
        assert_eq!(api.kind, "error");
        assert_eq!(api.message_key, "error.discard_budget_exceeded");
        assert_eq!(api.params["left"], 2);
    }
}
