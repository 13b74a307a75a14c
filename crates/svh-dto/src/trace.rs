use super::action::ApiAction;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use svh_policy::EXPLANATION;
use svh_policy::Trace;

/// The info-set tag every runtime-consumable trace must carry.
pub const ORDER_UNKNOWN: &str = "order_unknown";

/// A recorded sequence of policy decisions under the order-unknown
/// information set. Used for UI reveal and as the feasibility gate for
/// runtime seed pools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceArtifact {
    pub seed: u64,
    pub policy: String,
    pub info_set: String,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceStep {
    pub step_index: usize,
    pub recommended_action: ApiAction,
    pub explanation_key: String,
    pub params: serde_json::Value,
}

impl From<&Trace> for TraceArtifact {
    fn from(trace: &Trace) -> Self {
        Self {
            seed: trace.seed,
            policy: "heuristic".to_string(),
            info_set: ORDER_UNKNOWN.to_string(),
            steps: trace
                .steps
                .iter()
                .enumerate()
                .map(|(step_index, hint)| TraceStep {
                    step_index,
                    recommended_action: ApiAction::from(&hint.action),
                    explanation_key: EXPLANATION.to_string(),
                    params: json!({ "rule": hint.rule, "expectation": hint.expectation }),
                })
                .collect(),
        }
    }
}

impl TraceArtifact {
    /// Admission check for the runtime trace surface: artifacts that do not
    /// carry the order-unknown tag were built with privileged information
    /// and must never reach a player.
    pub fn admit(&self) -> Result<(), String> {
        if self.info_set == ORDER_UNKNOWN {
            Ok(())
        } else {
            Err("trace_artifact_missing_info_set_tag".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svh_gameplay::Game;

    #[test]
    fn artifacts_are_tagged_order_unknown() {
        let (game, _) = Game::start(77, None);
        let trace = Trace::from((77, game.projection()));
        let artifact = TraceArtifact::from(&trace);
        assert_eq!(artifact.info_set, "order_unknown");
        assert!(artifact.admit().is_ok());
        assert_eq!(artifact.steps[0].step_index, 0);
    }

    #[test]
    fn untagged_artifacts_are_rejected() {
        let (game, _) = Game::start(77, None);
        let trace = Trace::from((77, game.projection()));
        let mut artifact = TraceArtifact::from(&trace);
        artifact.info_set = "ordered".to_string();
        assert_eq!(
            artifact.admit(),
            Err("trace_artifact_missing_info_set_tag".to_string()),
        );
    }
}
