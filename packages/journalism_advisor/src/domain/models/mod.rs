pub mod advisor_config;
pub mod navigation_state;
pub mod tool_profile;
pub mod tree_node;
pub mod types;

pub use advisor_config::{AdvisorConfig, DEFAULT_ESTIMATED_TOTAL_STEPS};
pub use navigation_state::{collect_selected_tools, HistoryEntry, NavigationAction, NavigationPhase, NavigationState};
pub use tool_profile::ToolProfile;
pub use tree_node::{AnswerOption, ToolRecommendation, TreeNode, RECOMMENDATION_NODE_ID, START_NODE_ID};
pub use types::*;
