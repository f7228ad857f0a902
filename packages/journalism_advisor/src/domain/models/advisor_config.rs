use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::domain::errors::{AdvisorError, AdvisorResult};

/// Observed average depth of the journalism tree.
pub const DEFAULT_ESTIMATED_TOTAL_STEPS: u32 = 4;

/// Settings shared by every presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisorConfig {
    /// Alternative decision tree file; the built-in tree is used when absent.
    pub tree_path: Option<PathBuf>,
    /// Alternative tool profile file; the built-in catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
    /// Calibration constant for the progress estimate.
    pub estimated_total_steps: u32,
}

impl AdvisorConfig {
    pub fn new(estimated_total_steps: u32) -> AdvisorResult<Self> {
        let config = Self {
            estimated_total_steps,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_tree_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tree_path = Some(path.into());
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    pub fn validate(&self) -> AdvisorResult<()> {
        Self::check_estimated_total_steps(self.estimated_total_steps)?;
        Ok(())
    }

    /// The progress constant divides the answered-question count, so it must be at least 1.
    pub fn check_estimated_total_steps(steps: u32) -> AdvisorResult<u32> {
        if steps == 0 {
            return Err(AdvisorError::InvalidConfig(
                "estimated_total_steps".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        Ok(steps)
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            tree_path: None,
            catalog_path: None,
            estimated_total_steps: DEFAULT_ESTIMATED_TOTAL_STEPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();

        assert!(config.tree_path.is_none());
        assert!(config.catalog_path.is_none());
        assert_eq!(config.estimated_total_steps, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_steps_rejected() {
        let result = AdvisorConfig::new(0);

        if let Err(AdvisorError::InvalidConfig(field, _)) = result {
            assert_eq!(field, "estimated_total_steps");
        } else {
            panic!("Expected InvalidConfig error for estimated_total_steps");
        }
    }

    #[test]
    fn test_check_estimated_total_steps() {
        tokio_test::assert_ok!(AdvisorConfig::check_estimated_total_steps(1));
        let err = tokio_test::assert_err!(AdvisorConfig::check_estimated_total_steps(0));
        assert_eq!(
            err,
            AdvisorError::InvalidConfig("estimated_total_steps".to_string(), "must be at least 1".to_string())
        );
    }

    #[test]
    fn test_builder_paths() {
        let config = AdvisorConfig::new(3)
            .unwrap()
            .with_tree_path("/tmp/tree.json")
            .with_catalog_path("/tmp/catalog.json");

        assert_eq!(config.estimated_total_steps, 3);
        assert_eq!(config.tree_path, Some(PathBuf::from("/tmp/tree.json")));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
    }
}
