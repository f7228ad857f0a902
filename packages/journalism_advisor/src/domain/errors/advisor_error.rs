use thiserror::Error;

/// Errors raised while loading a decision tree or navigating it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("Node not found: {0}")]
    NotFound(String),

    /// The presentation layer submitted an option the current node does not offer.
    #[error("Option '{option_text}' is not available at step '{step_id}'")]
    InvalidOption { step_id: String, option_text: String },

    #[error("Decision tree has no root node '{0}'")]
    MissingRoot(String),

    #[error("Node stored under key '{key}' declares id '{id}'")]
    NodeIdMismatch { key: String, id: String },

    #[error("Option '{option_text}' of node '{node_id}' points to unknown node '{next}'")]
    DanglingReference {
        node_id: String,
        option_text: String,
        next: String,
    },

    #[error("Terminal node '{0}' must not offer options")]
    TerminalHasOptions(String),

    #[error("Node '{0}' has no options and is not the terminal node")]
    DeadEnd(String),

    #[error("Node '{node_id}' offers option '{option_text}' more than once")]
    DuplicateOption { node_id: String, option_text: String },

    #[error("Option '{option_text}' of node '{node_id}' must carry tools exactly when it leads to the terminal node")]
    ToolsMismatch { node_id: String, option_text: String },

    #[error("Cycle detected through node '{0}'")]
    CycleDetected(String),

    /// History recorded a step that can never be a departure point.
    #[error("Corrupt navigation history: {0}")]
    CorruptHistory(String),

    #[error("Invalid configuration for '{0}': {1}")]
    InvalidConfig(String, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        AdvisorError::Io(err.to_string())
    }
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
