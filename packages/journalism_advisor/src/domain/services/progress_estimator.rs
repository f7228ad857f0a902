use crate::domain::errors::AdvisorResult;
use crate::domain::models::{AdvisorConfig, NavigationState, DEFAULT_ESTIMATED_TOTAL_STEPS};

/// Maps answered-question count to a 0-100 progress figure.
///
/// Branch depth varies, so this is a cosmetic estimate calibrated by the
/// expected number of steps, not a structural guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEstimator {
    estimated_total_steps: u32,
}

impl ProgressEstimator {
    pub fn new(estimated_total_steps: u32) -> AdvisorResult<Self> {
        let estimated_total_steps = AdvisorConfig::check_estimated_total_steps(estimated_total_steps)?;
        Ok(Self { estimated_total_steps })
    }

    pub fn from_config(config: &AdvisorConfig) -> AdvisorResult<Self> {
        Self::new(config.estimated_total_steps)
    }

    pub fn estimated_total_steps(&self) -> u32 {
        self.estimated_total_steps
    }

    /// `min(100, round(history_length / N * 100))`, or 100 once recommending.
    /// Halves round up.
    pub fn estimate(&self, history_length: usize, show_recommendation: bool) -> u8 {
        if show_recommendation {
            return 100;
        }

        let steps = u64::from(self.estimated_total_steps);
        let taken = history_length as u64;
        if taken >= steps {
            return 100;
        }

        ((taken * 200 + steps) / (2 * steps)) as u8
    }

    pub fn for_state(&self, state: &NavigationState) -> u8 {
        self.estimate(state.history.len(), state.show_recommendation)
    }
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self {
            estimated_total_steps: DEFAULT_ESTIMATED_TOTAL_STEPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_history_is_zero() {
        let estimator = ProgressEstimator::default();
        assert_eq!(estimator.estimate(0, false), 0);
    }

    #[test]
    fn test_recommending_is_complete() {
        let estimator = ProgressEstimator::default();
        assert_eq!(estimator.estimate(0, true), 100);
        assert_eq!(estimator.estimate(2, true), 100);
    }

    #[test]
    fn test_default_calibration() {
        let estimator = ProgressEstimator::default();

        assert_eq!(estimator.estimated_total_steps(), 4);
        assert_eq!(estimator.estimate(1, false), 25);
        assert_eq!(estimator.estimate(2, false), 50);
        assert_eq!(estimator.estimate(3, false), 75);
        assert_eq!(estimator.estimate(4, false), 100);
        assert_eq!(estimator.estimate(9, false), 100);
    }

    #[test]
    fn test_rounding() {
        let three = ProgressEstimator::new(3).unwrap();
        assert_eq!(three.estimate(1, false), 33);
        assert_eq!(three.estimate(2, false), 67);

        let eight = ProgressEstimator::new(8).unwrap();
        assert_eq!(eight.estimate(1, false), 13); // 12.5 rounds up
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = tokio_test::assert_err!(ProgressEstimator::new(0));
        let config = AdvisorConfig {
            estimated_total_steps: 0,
            ..AdvisorConfig::default()
        };

        assert_eq!(Err(err), config.validate());
        assert!(ProgressEstimator::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = tokio_test::assert_ok!(AdvisorConfig::new(6));
        let estimator = tokio_test::assert_ok!(ProgressEstimator::from_config(&config));
        assert_eq!(estimator.estimated_total_steps(), 6);
    }

    #[test]
    fn test_for_state() {
        let estimator = ProgressEstimator::default();
        assert_eq!(estimator.for_state(&NavigationState::initial()), 0);
    }

    proptest! {
        #[test]
        fn prop_estimate_is_bounded_and_monotonic(steps in 1u32..10, length in 0usize..1000) {
            let estimator = ProgressEstimator::new(steps).unwrap();
            let current = estimator.estimate(length, false);
            let next = estimator.estimate(length + 1, false);

            prop_assert!(current <= 100);
            prop_assert!(current <= next);
            prop_assert_eq!(estimator.estimate(length, true), 100);
        }
    }
}
