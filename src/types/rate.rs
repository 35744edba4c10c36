use std::time::Duration;

/// 传感器更新间隔，只有两个固定档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateSetting {
    /// 1000ms
    #[default]
    Slow,
    /// 50ms
    Fast,
}

impl RateSetting {
    pub fn interval(&self) -> Duration {
        match self {
            RateSetting::Slow => Duration::from_millis(1000),
            RateSetting::Fast => Duration::from_millis(50),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RateSetting::Slow => "Slow",
            RateSetting::Fast => "Fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_intervals() {
        assert_eq!(RateSetting::Slow.interval(), Duration::from_millis(1000));
        assert_eq!(RateSetting::Fast.interval(), Duration::from_millis(50));
        assert_eq!(RateSetting::default(), RateSetting::Slow);
    }
}
