use crate::types::Sample;

/// 默认振动阈值 (g)
pub const DEFAULT_THRESHOLD_G: f64 = 1.0;

/// Trips when the magnitude of a sample is strictly above `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTrigger {
    threshold: f64,
}

impl MotionTrigger {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 严格大于：模长恰好等于阈值时不触发
    pub fn evaluate(&self, sample: &Sample) -> bool {
        sample.magnitude() > self.threshold
    }
}

impl Default for MotionTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_G)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_gravity_does_not_trip() {
        let trigger = MotionTrigger::default();
        assert!(!trigger.evaluate(&Sample::new(0.0, 0.0, 1.0)));
        assert!(!trigger.evaluate(&Sample::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn diagonal_unit_sample_trips() {
        let trigger = MotionTrigger::default();
        assert!(trigger.evaluate(&Sample::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn custom_threshold() {
        let trigger = MotionTrigger::new(2.0);
        assert!(!trigger.evaluate(&Sample::new(1.0, 1.0, 1.0)));
        assert!(trigger.evaluate(&Sample::new(0.0, 0.0, 2.01)));
        assert!(!trigger.evaluate(&Sample::new(0.0, 0.0, 0.0)));
    }
}
