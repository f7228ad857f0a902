pub mod advisor_session;
pub mod decision_tree_store;
pub mod navigation_reducer;
pub mod progress_estimator;
pub mod tool_catalog;
pub mod workflow_picker;

pub use advisor_session::AdvisorSession;
pub use decision_tree_store::DecisionTree;
pub use navigation_reducer::NavigationReducer;
pub use progress_estimator::ProgressEstimator;
pub use tool_catalog::ToolCatalog;
pub use workflow_picker::{pick_random, pick_random_workflow};
