use serde::Deserialize;
use serde::Serialize;
use svh_gameplay::Action;
use svh_gameplay::Error;

/// An action as it crosses the boundary: a tagged type plus 0-based hand
/// indices. Shape validation happens here; semantic validation (ranges,
/// uniqueness, budgets) belongs to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub selected_indices: Vec<usize>,
}

impl From<&Action> for ApiAction {
    fn from(action: &Action) -> Self {
        Self {
            kind: match action {
                Action::Play(_) => "PLAY".to_string(),
                Action::Discard(_) => "DISCARD".to_string(),
            },
            selected_indices: action.indices().to_vec(),
        }
    }
}

impl TryFrom<&ApiAction> for Action {
    type Error = Error;
    fn try_from(api: &ApiAction) -> Result<Self, Error> {
        match api.kind.as_str() {
            "PLAY" => Ok(Action::Play(api.selected_indices.clone())),
            "DISCARD" => Ok(Action::Discard(api.selected_indices.clone())),
            _ => Err(Error::InvalidActionShape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_wire_shape() {
        let action = Action::Play(vec![0, 2, 4, 5, 6]);
        let api = ApiAction::from(&action);
        assert_eq!(api.kind, "PLAY");
        assert_eq!(Action::try_from(&api), Ok(action));
    }

    #[test]
    fn unknown_kind_is_a_shape_error() {
        let api = ApiAction { kind: "FOLD".to_string(), selected_indices: vec![0] };
        assert_eq!(Action::try_from(&api), Err(Error::InvalidActionShape));
    }

    #[test]
    fn json_field_names_match_the_contract() {
        let api = ApiAction::from(&Action::Discard(vec![1, 3]));
        let json = serde_json::to_string(&api).unwrap();
        assert_eq!(json, r#"{"type":"DISCARD","selected_indices":[1,3]}"#);
    }
}
