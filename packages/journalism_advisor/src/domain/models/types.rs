use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use crate::domain::models::tree_node::ToolRecommendation;

/// A previous answer, shown as context above the current question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Breadcrumb {
    pub question: String,
    pub answer: String,
}

/// What a presentation layer needs to render a question screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepView {
    pub step_id: String,
    pub question: String,
    pub options: Vec<String>,
    pub progress: u8,
    pub breadcrumb: Vec<Breadcrumb>,
    pub can_go_back: bool,
}

/// What a presentation layer needs to render the final screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationView {
    pub tools: Vec<ToolRecommendation>,
    pub progress: u8,
    pub breadcrumb: Vec<Breadcrumb>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SessionView {
    Asking(StepView),
    Recommending(RecommendationView),
}

/// Shape of a loaded decision tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeStats {
    pub node_count: usize,
    pub option_count: usize,
    pub recommendation_count: usize,
    /// Fewest answers needed to reach the terminal node.
    pub min_depth: usize,
    /// Most answers needed to reach the terminal node.
    pub max_depth: usize,
}

impl SessionView {
    pub fn progress(&self) -> u8 {
        match self {
            SessionView::Asking(step) => step.progress,
            SessionView::Recommending(recommendation) => recommendation.progress,
        }
    }
}

fn write_breadcrumb(f: &mut Formatter<'_>, breadcrumb: &[Breadcrumb]) -> fmt::Result {
    for crumb in breadcrumb {
        writeln!(f, "  {} → {}", crumb.question, crumb.answer)?;
    }
    Ok(())
}

impl Display for ToolRecommendation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  {}", self.description)?;
        if !self.tool_names.is_empty() {
            writeln!(f, "  Recommended tools: {}", self.tool_names.join(", "))?;
        }
        writeln!(f, "  Suggested prompt: {}", self.prompt)?;
        if let Some(ref tips) = self.tips {
            writeln!(f, "  Pro tips: {}", tips)?;
        }
        Ok(())
    }
}

impl Display for StepView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{:>3}%] {}", self.progress, self.question)?;
        write_breadcrumb(f, &self.breadcrumb)?;
        for (i, option) in self.options.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, option)?;
        }
        Ok(())
    }
}

impl Display for RecommendationView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{:>3}%] Your recommended tools", self.progress)?;
        write_breadcrumb(f, &self.breadcrumb)?;
        writeln!(f)?;
        for tool in &self.tools {
            write!(f, "{}", tool)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for SessionView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SessionView::Asking(step) => step.fmt(f),
            SessionView::Recommending(recommendation) => recommendation.fmt(f),
        }
    }
}

impl Display for TreeStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {}", self.node_count)?;
        writeln!(f, "Options: {}", self.option_count)?;
        writeln!(f, "Recommendations: {}", self.recommendation_count)?;
        writeln!(f, "Steps to a recommendation: {}..={}", self.min_depth, self.max_depth)
    }
}
