use crate::domain::errors::AdvisorResult;
use crate::domain::models::{
    navigation_state::{HistoryEntry, NavigationAction, NavigationState},
    tree_node::{ToolRecommendation, TreeNode},
    Breadcrumb, RecommendationView, SessionView, StepView, ToolProfile,
};
use crate::domain::services::{
    decision_tree_store::DecisionTree,
    navigation_reducer::NavigationReducer,
    progress_estimator::ProgressEstimator,
    tool_catalog::ToolCatalog,
    workflow_picker::pick_random_workflow,
};
use random_source::RandomSource;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One user's walk through the questionnaire.
///
/// The session is the single writer of its [`NavigationState`]: it feeds
/// actions to the [`NavigationReducer`] and swaps in the returned state only
/// when the transition succeeds, so a rejected action leaves it untouched.
/// The tree and catalog are shared read-only between sessions.
pub struct AdvisorSession {
    session_id: String,
    reducer: NavigationReducer,
    progress: ProgressEstimator,
    catalog: Arc<ToolCatalog>,
    state: NavigationState,
}

impl AdvisorSession {
    pub fn new(tree: Arc<DecisionTree>, catalog: Arc<ToolCatalog>, progress: ProgressEstimator) -> Self {
        let session_id = uuid::Uuid::new_v4().to_string();
        let reducer = NavigationReducer::new(tree);
        let state = reducer.initial_state();
        info!(session_id = %session_id, "Advisor session started");

        Self {
            session_id,
            reducer,
            progress,
            catalog,
            state,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Applies one action and returns the resulting state.
    ///
    /// # Returns
    /// * `Ok(&NavigationState)` - The new current state
    /// * `Err(AdvisorError)` - The reducer's error; the state is unchanged
    pub fn dispatch(&mut self, action: NavigationAction) -> AdvisorResult<&NavigationState> {
        match self.reducer.reduce(&self.state, &action) {
            Ok(next) => {
                debug!(
                    session_id = %self.session_id,
                    action = ?action,
                    from = %self.state.current_step_id,
                    to = %next.current_step_id,
                    "Navigation transition"
                );
                if matches!(action, NavigationAction::Restart) {
                    info!(session_id = %self.session_id, "Advisor session restarted");
                }
                self.state = next;
                Ok(&self.state)
            }
            Err(err) => {
                warn!(session_id = %self.session_id, action = ?action, error = %err, "Rejected navigation action");
                Err(err)
            }
        }
    }

    pub fn select_option(&mut self, option_text: &str) -> AdvisorResult<&NavigationState> {
        self.dispatch(NavigationAction::select(option_text))
    }

    pub fn go_back(&mut self) -> AdvisorResult<&NavigationState> {
        self.dispatch(NavigationAction::GoBack)
    }

    pub fn restart(&mut self) -> AdvisorResult<&NavigationState> {
        self.dispatch(NavigationAction::Restart)
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_step_id(&self) -> &str {
        &self.state.current_step_id
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    pub fn selected_tools(&self) -> &[ToolRecommendation] {
        &self.state.selected_tools
    }

    pub fn show_recommendation(&self) -> bool {
        self.state.show_recommendation
    }

    pub fn tree(&self) -> &DecisionTree {
        self.reducer.tree()
    }

    pub fn current_node(&self) -> AdvisorResult<&TreeNode> {
        self.reducer.tree().get_node(&self.state.current_step_id)
    }

    pub fn progress(&self) -> u8 {
        self.progress.for_state(&self.state)
    }

    /// Everything a presentation layer needs to draw the current screen.
    pub fn view(&self) -> AdvisorResult<SessionView> {
        let breadcrumb: Vec<Breadcrumb> = self
            .state
            .history
            .iter()
            .map(|entry| Breadcrumb {
                question: entry.question.clone(),
                answer: entry.selected_option_text.clone(),
            })
            .collect();

        if self.state.show_recommendation {
            return Ok(SessionView::Recommending(RecommendationView {
                tools: self.state.selected_tools.clone(),
                progress: self.progress(),
                breadcrumb,
            }));
        }

        let node = self.current_node()?;
        Ok(SessionView::Asking(StepView {
            step_id: node.id.clone(),
            question: node.question.clone(),
            options: node.options.iter().map(|option| option.text.clone()).collect(),
            progress: self.progress(),
            breadcrumb,
            can_go_back: self.state.can_go_back(),
        }))
    }

    /// A random recommendation from the whole tree. Leaves the state alone.
    pub fn random_workflow<R>(&self, random: &mut R) -> Option<&ToolRecommendation>
    where
        R: RandomSource + ?Sized,
    {
        pick_random_workflow(self.reducer.tree(), random)
    }

    /// Profiles of every product named by the current recommendations.
    pub fn compare_tools(&self) -> Vec<&ToolProfile> {
        self.catalog.compare(
            self.state
                .selected_tools
                .iter()
                .flat_map(|tool| tool.tool_names.iter().map(String::as_str)),
        )
    }
}
