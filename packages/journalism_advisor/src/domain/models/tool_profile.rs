use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison sheet for one AI product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolProfile {
    pub name: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub best_for: Vec<String>,
    pub pricing: String,
}

impl fmt::Display for ToolProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Strengths:")?;
        for strength in &self.strengths {
            writeln!(f, "    + {}", strength)?;
        }
        writeln!(f, "  Weaknesses:")?;
        for weakness in &self.weaknesses {
            writeln!(f, "    - {}", weakness)?;
        }
        writeln!(f, "  Best for: {}", self.best_for.join(", "))?;
        writeln!(f, "  Pricing: {}", self.pricing)
    }
}
