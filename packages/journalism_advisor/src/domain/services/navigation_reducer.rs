use crate::domain::errors::{AdvisorError, AdvisorResult};
use crate::domain::models::{
    navigation_state::{collect_selected_tools, HistoryEntry, NavigationAction, NavigationState},
    tree_node::RECOMMENDATION_NODE_ID,
};
use crate::domain::services::decision_tree_store::DecisionTree;
use std::sync::Arc;

/// Pure state machine over a shared decision tree.
///
/// Every transition takes the previous state by reference and returns a new
/// one; nothing is mutated in place. Derived fields are always rebuilt from
/// the resulting history, which is what makes going back retract the tools
/// contributed by the popped step.
#[derive(Debug, Clone)]
pub struct NavigationReducer {
    tree: Arc<DecisionTree>,
}

impl NavigationReducer {
    pub fn new(tree: Arc<DecisionTree>) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &Arc<DecisionTree> {
        &self.tree
    }

    pub fn initial_state(&self) -> NavigationState {
        NavigationState::initial()
    }

    /// Applies one action.
    ///
    /// # Returns
    /// * `Ok(NavigationState)` - The state after the action
    /// * `Err(AdvisorError::InvalidOption)` - If a selected option is not offered by the current node
    /// * `Err(AdvisorError::NotFound)` - If the state points at a node the tree does not have
    /// * `Err(AdvisorError::CorruptHistory)` - If going back would land on the terminal node
    pub fn reduce(&self, state: &NavigationState, action: &NavigationAction) -> AdvisorResult<NavigationState> {
        match action {
            NavigationAction::SelectOption { option_text } => self.select_option(state, option_text),
            NavigationAction::GoBack => self.go_back(state),
            NavigationAction::Restart => Ok(self.restart()),
        }
    }

    pub fn select_option(&self, state: &NavigationState, option_text: &str) -> AdvisorResult<NavigationState> {
        let node = self.tree.get_node(&state.current_step_id)?;
        let option = node
            .find_option(option_text)
            .ok_or_else(|| AdvisorError::InvalidOption {
                step_id: state.current_step_id.clone(),
                option_text: option_text.to_string(),
            })?;

        let mut history = state.history.clone();
        history.push(HistoryEntry {
            step_id: node.id.clone(),
            question: node.question.clone(),
            selected_option_text: option.text.clone(),
            tools: option.tools().to_vec(),
        });

        Ok(derive_state(option.next.clone(), history))
    }

    /// Pops the last answer and returns to the node it was given at.
    /// With an empty history the state comes back unchanged.
    pub fn go_back(&self, state: &NavigationState) -> AdvisorResult<NavigationState> {
        let mut history = state.history.clone();
        let Some(previous) = history.pop() else {
            return Ok(state.clone());
        };

        // No answer can be given at the terminal node, so no entry may name it.
        if previous.step_id == RECOMMENDATION_NODE_ID {
            return Err(AdvisorError::CorruptHistory(format!(
                "entry {} records an answer at '{}'",
                history.len(),
                RECOMMENDATION_NODE_ID
            )));
        }

        Ok(derive_state(previous.step_id, history))
    }

    pub fn restart(&self) -> NavigationState {
        NavigationState::initial()
    }
}

fn derive_state(current_step_id: String, history: Vec<HistoryEntry>) -> NavigationState {
    let show_recommendation = current_step_id == RECOMMENDATION_NODE_ID;
    let selected_tools = collect_selected_tools(&history);
    NavigationState {
        current_step_id,
        history,
        selected_tools,
        show_recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::tree_node::{AnswerOption, ToolRecommendation, TreeNode};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn tool(name: &str) -> ToolRecommendation {
        ToolRecommendation::new(name, "desc", vec![], "prompt", Some("tip".to_string()))
    }

    /// start -> { "A" -> node_x, "B" -> node_y }, node_x -> { "C" -> recommendation [T1] }
    fn scenario_reducer() -> NavigationReducer {
        let nodes = BTreeMap::from([
            (
                "start".to_string(),
                TreeNode::new(
                    "start",
                    "Start question",
                    vec![
                        AnswerOption::to_node("A", "node_x"),
                        AnswerOption::to_node("B", "node_y"),
                    ],
                ),
            ),
            (
                "node_x".to_string(),
                TreeNode::new(
                    "node_x",
                    "X question",
                    vec![AnswerOption::to_recommendation("C", vec![tool("T1")])],
                ),
            ),
            (
                "node_y".to_string(),
                TreeNode::new(
                    "node_y",
                    "Y question",
                    vec![
                        AnswerOption::to_node("D", "node_x"),
                        AnswerOption::to_recommendation("E", vec![tool("T2"), tool("T3")]),
                    ],
                ),
            ),
        ]);
        NavigationReducer::new(Arc::new(DecisionTree::from_nodes(nodes).unwrap()))
    }

    #[test]
    fn test_select_option_appends_history() {
        let reducer = scenario_reducer();
        let state = reducer.select_option(&reducer.initial_state(), "A").unwrap();

        assert_eq!(state.current_step_id, "node_x");
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].step_id, "start");
        assert_eq!(state.history[0].question, "Start question");
        assert_eq!(state.history[0].selected_option_text, "A");
        assert!(state.history[0].tools.is_empty());
        assert!(state.selected_tools.is_empty());
        assert!(!state.show_recommendation);
    }

    #[test]
    fn test_select_option_reaches_recommendation() {
        let reducer = scenario_reducer();
        let state = reducer.select_option(&reducer.initial_state(), "A").unwrap();
        let state = reducer.select_option(&state, "C").unwrap();

        assert_eq!(state.current_step_id, "recommendation");
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.selected_tools, vec![tool("T1")]);
        assert!(state.show_recommendation);
    }

    #[test]
    fn test_select_unknown_option() {
        let reducer = scenario_reducer();
        let initial = reducer.initial_state();

        let result = reducer.select_option(&initial, "C");

        assert_eq!(
            result,
            Err(AdvisorError::InvalidOption {
                step_id: "start".to_string(),
                option_text: "C".to_string(),
            })
        );
    }

    #[test]
    fn test_select_at_terminal_is_invalid() {
        let reducer = scenario_reducer();
        let state = reducer.select_option(&reducer.initial_state(), "A").unwrap();
        let state = reducer.select_option(&state, "C").unwrap();

        assert!(matches!(
            reducer.select_option(&state, "C"),
            Err(AdvisorError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_go_back_retracts_tools() {
        let reducer = scenario_reducer();
        let state = reducer.select_option(&reducer.initial_state(), "B").unwrap();
        let state = reducer.select_option(&state, "E").unwrap();
        assert_eq!(state.selected_tools.len(), 2);

        let back = reducer.go_back(&state).unwrap();

        assert_eq!(back.current_step_id, "node_y");
        assert_eq!(back.history.len(), 1);
        assert!(back.selected_tools.is_empty());
        assert!(!back.show_recommendation);
    }

    #[test]
    fn test_go_back_on_empty_history_is_noop() {
        let reducer = scenario_reducer();
        let initial = reducer.initial_state();

        let state = reducer.go_back(&initial).unwrap();

        assert_eq!(state, initial);
    }

    #[test]
    fn test_go_back_rejects_terminal_entry() {
        let reducer = scenario_reducer();
        let mut state = reducer.select_option(&reducer.initial_state(), "A").unwrap();
        state.history.push(HistoryEntry {
            step_id: "recommendation".to_string(),
            question: "Done".to_string(),
            selected_option_text: "?".to_string(),
            tools: vec![],
        });

        assert!(matches!(
            reducer.go_back(&state),
            Err(AdvisorError::CorruptHistory(_))
        ));
    }

    #[test]
    fn test_restart_from_recommendation() {
        let reducer = scenario_reducer();
        let state = reducer.select_option(&reducer.initial_state(), "A").unwrap();
        let state = reducer.select_option(&state, "C").unwrap();

        let state = reducer.reduce(&state, &NavigationAction::Restart).unwrap();

        assert_eq!(state, NavigationState::initial());
    }

    #[test]
    fn test_reduce_dispatches_each_action() {
        let reducer = scenario_reducer();
        let initial = reducer.initial_state();

        let selected = reducer.reduce(&initial, &NavigationAction::select("A")).unwrap();
        assert_eq!(selected.current_step_id, "node_x");

        let back = reducer.reduce(&selected, &NavigationAction::GoBack).unwrap();
        assert_eq!(back, initial);
    }

    #[test]
    fn test_state_pointing_at_unknown_node() {
        let reducer = scenario_reducer();
        let mut state = reducer.initial_state();
        state.current_step_id = "ghost".to_string();

        assert_eq!(
            reducer.select_option(&state, "A"),
            Err(AdvisorError::NotFound("ghost".to_string()))
        );
    }

    /// Walks the tree using `choices` as indices into each node's options,
    /// going back instead wherever the flag is set. Restarts at the terminal node.
    fn walk(reducer: &NavigationReducer, choices: &[(usize, bool)]) -> Vec<NavigationState> {
        let mut states = vec![reducer.initial_state()];
        for &(choice, back) in choices {
            let current = states.last().unwrap().clone();
            let next = if back {
                reducer.go_back(&current).unwrap()
            } else {
                let node = reducer.tree().get_node(&current.current_step_id).unwrap();
                if node.options.is_empty() {
                    reducer.restart()
                } else {
                    let text = node.options[choice % node.options.len()].text.clone();
                    reducer.select_option(&current, &text).unwrap()
                }
            };
            states.push(next);
        }
        states
    }

    proptest! {
        #[test]
        fn prop_reachable_states_are_consistent(
            choices in proptest::collection::vec((0usize..4, proptest::bool::weighted(0.3)), 0..24)
        ) {
            let reducer = scenario_reducer();
            for state in walk(&reducer, &choices) {
                prop_assert!(state.is_consistent());
                prop_assert_eq!(
                    state.show_recommendation,
                    state.current_step_id == RECOMMENDATION_NODE_ID
                );
            }
        }

        #[test]
        fn prop_go_back_undoes_select(
            choices in proptest::collection::vec((0usize..4, proptest::bool::weighted(0.3)), 0..24),
            pick in 0usize..4
        ) {
            let reducer = scenario_reducer();
            let state = walk(&reducer, &choices).pop().unwrap();
            let node = reducer.tree().get_node(&state.current_step_id).unwrap();
            prop_assume!(!node.options.is_empty());

            let text = node.options[pick % node.options.len()].text.clone();
            let forward = reducer.select_option(&state, &text).unwrap();
            let back = reducer.go_back(&forward).unwrap();

            prop_assert_eq!(back, state);
        }

        #[test]
        fn prop_restart_always_yields_initial(
            choices in proptest::collection::vec((0usize..4, proptest::bool::weighted(0.3)), 0..24)
        ) {
            let reducer = scenario_reducer();
            let state = walk(&reducer, &choices).pop().unwrap();

            let restarted = reducer.reduce(&state, &NavigationAction::Restart).unwrap();

            prop_assert!(restarted.is_initial());
        }
    }
}
