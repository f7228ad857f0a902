use crate::domain::errors::AdvisorResult;
use crate::domain::models::ToolProfile;
use std::path::Path;
use tracing::info;

const BUILTIN_CATALOG: &str = include_str!("../../../data/tool_profiles.json");

/// Product comparison sheets, looked up by the labels used in recommendations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolCatalog {
    profiles: Vec<ToolProfile>,
}

impl ToolCatalog {
    pub fn from_profiles(profiles: Vec<ToolProfile>) -> Self {
        Self { profiles }
    }

    pub fn from_json_str(json: &str) -> AdvisorResult<Self> {
        let profiles: Vec<ToolProfile> = serde_json::from_str(json)?;
        Ok(Self::from_profiles(profiles))
    }

    pub fn from_path(path: &Path) -> AdvisorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), profiles = catalog.profiles.len(), "Loaded tool catalog");
        Ok(catalog)
    }

    pub fn builtin() -> AdvisorResult<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn profiles(&self) -> &[ToolProfile] {
        &self.profiles
    }

    /// Resolves a product label to its profile.
    ///
    /// An exact name wins. Otherwise the longest profile name that prefixes the
    /// label at a word boundary is used, so "Grok 3 (DeepSearch)" finds "Grok 3".
    pub fn profile_for(&self, label: &str) -> Option<&ToolProfile> {
        if let Some(profile) = self.profiles.iter().find(|p| p.name == label) {
            return Some(profile);
        }

        self.profiles
            .iter()
            .filter(|p| {
                label.starts_with(p.name.as_str())
                    && label[p.name.len()..]
                        .chars()
                        .next()
                        .is_none_or(|c| !c.is_alphanumeric())
            })
            .max_by_key(|p| p.name.len())
    }

    /// Profiles for the given labels, deduplicated, in first-seen order.
    /// Labels without a profile are skipped.
    pub fn compare<'a, I>(&self, labels: I) -> Vec<&ToolProfile>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut resolved: Vec<&ToolProfile> = Vec::new();
        for label in labels {
            if let Some(profile) = self.profile_for(label) {
                if !resolved.iter().any(|p| p.name == profile.name) {
                    resolved.push(profile);
                }
            }
        }
        resolved
    }
}
