use serde::{Deserialize, Serialize};
use crate::domain::models::tree_node::{ToolRecommendation, RECOMMENDATION_NODE_ID, START_NODE_ID};

/// Snapshot of one questionnaire session.
///
/// Produced wholesale by the reducer on every action; never edited in place.
/// `selected_tools` and `show_recommendation` are derived from `history` and
/// `current_step_id` and are kept only so views can read them directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationState {
    pub current_step_id: String,
    pub history: Vec<HistoryEntry>,
    pub selected_tools: Vec<ToolRecommendation>,
    pub show_recommendation: bool,
}

/// One answered question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Node the answer was given at, never the terminal node.
    pub step_id: String,
    pub question: String,
    pub selected_option_text: String,
    pub tools: Vec<ToolRecommendation>,
}

/// Discrete user gesture fed into the reducer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NavigationAction {
    #[serde(rename_all = "camelCase")]
    SelectOption { option_text: String },
    GoBack,
    Restart,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NavigationPhase {
    Asking,
    Recommending,
}

impl NavigationState {
    pub fn initial() -> Self {
        Self {
            current_step_id: START_NODE_ID.to_string(),
            history: Vec::new(),
            selected_tools: Vec::new(),
            show_recommendation: false,
        }
    }

    pub fn phase(&self) -> NavigationPhase {
        if self.show_recommendation {
            NavigationPhase::Recommending
        } else {
            NavigationPhase::Asking
        }
    }

    pub fn is_initial(&self) -> bool {
        *self == Self::initial()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Checks that the cached fields agree with the history they derive from.
    pub fn is_consistent(&self) -> bool {
        self.show_recommendation == (self.current_step_id == RECOMMENDATION_NODE_ID)
            && self.selected_tools == collect_selected_tools(&self.history)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::initial()
    }
}

impl NavigationAction {
    pub fn select(option_text: impl Into<String>) -> Self {
        NavigationAction::SelectOption {
            option_text: option_text.into(),
        }
    }
}

/// Concatenates the tools of every entry, in history order.
pub fn collect_selected_tools(history: &[HistoryEntry]) -> Vec<ToolRecommendation> {
    history
        .iter()
        .flat_map(|entry| entry.tools.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(step_id: &str, tools: Vec<ToolRecommendation>) -> HistoryEntry {
        HistoryEntry {
            step_id: step_id.to_string(),
            question: format!("Question at {}", step_id),
            selected_option_text: "picked".to_string(),
            tools,
        }
    }

    fn tool(name: &str) -> ToolRecommendation {
        ToolRecommendation::new(name, "desc", vec![], "prompt", None)
    }

    #[test]
    fn test_initial_state() {
        let state = NavigationState::initial();

        assert_eq!(state.current_step_id, "start");
        assert!(state.history.is_empty());
        assert!(state.selected_tools.is_empty());
        assert!(!state.show_recommendation);
        assert_eq!(state.phase(), NavigationPhase::Asking);
        assert!(state.is_initial());
        assert!(!state.can_go_back());
        assert_eq!(NavigationState::default(), state);
    }

    #[test]
    fn test_collect_selected_tools_keeps_history_order() {
        let history = vec![
            entry("start", vec![]),
            entry("node_x", vec![tool("T1"), tool("T2")]),
            entry("node_y", vec![tool("T3")]),
        ];

        let names: Vec<String> = collect_selected_tools(&history)
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert_eq!(names, vec!["T1", "T2", "T3"]);
    }

    #[test]
    fn test_is_consistent() {
        let mut state = NavigationState::initial();
        assert!(state.is_consistent());

        state.show_recommendation = true;
        assert!(!state.is_consistent());

        state.current_step_id = "recommendation".to_string();
        assert!(state.is_consistent());

        state.history.push(entry("start", vec![tool("T1")]));
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_action_wire_format() {
        let select = NavigationAction::select("Editing & refining");
        let json = serde_json::to_value(&select).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "selectOption", "optionText": "Editing & refining" })
        );

        let back: NavigationAction = serde_json::from_str(r#"{ "kind": "goBack" }"#).unwrap();
        assert_eq!(back, NavigationAction::GoBack);

        let restart: NavigationAction = serde_json::from_str(r#"{ "kind": "restart" }"#).unwrap();
        assert_eq!(restart, NavigationAction::Restart);
    }
}
