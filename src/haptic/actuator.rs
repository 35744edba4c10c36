use log::debug;

/// 触觉输出错误
#[derive(Debug, thiserror::Error)]
pub enum HapticError {
    #[error("Audio output unavailable: {0}")]
    OutputUnavailable(String),
}

/// Fire-and-forget pulse output. Overlapping pulses are the implementor's
/// concern.
pub trait HapticActuator {
    fn pulse(&mut self);
}

/// 没有输出设备时使用，只记录脉冲
#[derive(Debug, Default)]
pub struct LoggedPulse {
    fired: u64,
}

impl LoggedPulse {
    #[cfg(test)]
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl HapticActuator for LoggedPulse {
    fn pulse(&mut self) {
        self.fired += 1;
        debug!("Haptic pulse #{}", self.fired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_pulse_counts() {
        let mut actuator = LoggedPulse::default();
        actuator.pulse();
        actuator.pulse();
        assert_eq!(actuator.fired(), 2);
    }
}
