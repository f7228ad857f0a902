use serde::{Deserialize, Serialize};

/// Well-known id of the first question.
pub const START_NODE_ID: &str = "start";

/// Reserved id marking the end of a branch.
pub const RECOMMENDATION_NODE_ID: &str = "recommendation";

pub const DEFAULT_RECOMMENDATION_QUESTION: &str = "Here are your recommended tools and approaches:";

/// One question screen of the decision tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeNode {
    /// Filled from the mapping key when the source omits it.
    #[serde(default)]
    pub id: String,
    pub question: String,
    /// Display order is significant.
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

/// A selectable answer at a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerOption {
    pub text: String,
    pub next: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolRecommendation>>,
}

/// A bundle of suggested products for one use case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ToolRecommendation {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tool_names: Vec<String>,
    /// Template with bracketed placeholders such as `[TOPIC]`. Never parsed.
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, question: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            options,
        }
    }

    /// The implicit end-of-branch node.
    pub fn terminal() -> Self {
        Self::new(RECOMMENDATION_NODE_ID, DEFAULT_RECOMMENDATION_QUESTION, Vec::new())
    }

    pub fn is_terminal(&self) -> bool {
        self.id == RECOMMENDATION_NODE_ID
    }

    pub fn find_option(&self, text: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.text == text)
    }

    pub fn option_texts(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.text.as_str()).collect()
    }
}

impl AnswerOption {
    /// An option leading to another question.
    pub fn to_node(text: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: next.into(),
            tools: None,
        }
    }

    /// An option that ends the branch with recommendations.
    pub fn to_recommendation(text: impl Into<String>, tools: Vec<ToolRecommendation>) -> Self {
        Self {
            text: text.into(),
            next: RECOMMENDATION_NODE_ID.to_string(),
            tools: Some(tools),
        }
    }

    pub fn leads_to_recommendation(&self) -> bool {
        self.next == RECOMMENDATION_NODE_ID
    }

    /// Tools carried by this option, empty when it leads to another question.
    pub fn tools(&self) -> &[ToolRecommendation] {
        self.tools.as_deref().unwrap_or(&[])
    }
}

impl ToolRecommendation {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tool_names: Vec<String>,
        prompt: impl Into<String>,
        tips: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tool_names,
            prompt: prompt.into(),
            tips,
        }
    }
}
