use super::action::ApiAction;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use svh_policy::EXPLANATION;
use svh_policy::Hint;

/// A policy recommendation at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiHint {
    pub action: ApiAction,
    pub explanation_key: String,
    pub params: serde_json::Value,
}

impl From<&Hint> for ApiHint {
    fn from(hint: &Hint) -> Self {
        Self {
            action: ApiAction::from(&hint.action),
            explanation_key: EXPLANATION.to_string(),
            params: json!({ "rule": hint.rule, "expectation": hint.expectation }),
        }
    }
}
