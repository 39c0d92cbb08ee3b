use std::time::Duration;

use crate::ReadinessSimulation;

/// Configuration of a form host.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use dynform::FormConfig;
///
/// let config = FormConfig::default()
///     .with_mount_id("signup")
///     .with_readiness_delay(Duration::from_millis(250))
///     .with_failure_probability(0.0);
///
/// assert_eq!(config.mount_id, "signup");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    /// Id of the host element the form is mounted into.
    pub mount_id: String,
    /// How long the loading phase lasts before readiness is decided.
    pub readiness_delay: Duration,
    /// Chance in `0.0..=1.0` that readiness fails.
    pub failure_probability: f64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            mount_id: "app".to_string(),
            readiness_delay: Duration::from_secs(1),
            failure_probability: 0.1,
        }
    }
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mount_id(mut self, mount_id: impl Into<String>) -> Self {
        self.mount_id = mount_id.into();
        self
    }

    pub fn with_readiness_delay(mut self, delay: Duration) -> Self {
        self.readiness_delay = delay;
        self
    }

    /// Set the failure chance. Values outside `0.0..=1.0` are clamped; NaN counts as 0.
    pub fn with_failure_probability(mut self, probability: f64) -> Self {
        self.failure_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    /// The readiness simulation described by this configuration.
    pub fn readiness(&self) -> ReadinessSimulation {
        ReadinessSimulation::new(self.readiness_delay, self.failure_probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FormConfig::default();
        assert_eq!(config.mount_id, "app");
        assert_eq!(config.readiness_delay, Duration::from_secs(1));
        assert_eq!(config.failure_probability, 0.1);
    }

    #[test]
    fn failure_probability_is_clamped() {
        assert_eq!(FormConfig::new().with_failure_probability(3.0).failure_probability, 1.0);
        assert_eq!(FormConfig::new().with_failure_probability(-1.0).failure_probability, 0.0);
        assert_eq!(
            FormConfig::new()
                .with_failure_probability(f64::NAN)
                .failure_probability,
            0.0
        );
    }
}
