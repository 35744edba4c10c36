pub mod actuator;
pub mod tone;

pub use actuator::{HapticActuator, LoggedPulse};
pub use tone::TonePulse;

use log::{info, warn};

use crate::config::HapticConfig;

/// 按配置选择触觉输出：优先音频短音，不可用时退回日志
pub fn build_actuator(config: &HapticConfig) -> Box<dyn HapticActuator> {
    if !config.enabled {
        info!("Haptic tone disabled by config, pulses are logged only");
        return Box::new(LoggedPulse::default());
    }

    match TonePulse::new(config) {
        Ok(tone) => {
            info!("Haptic tone initialized successfully");
            Box::new(tone)
        }
        Err(e) => {
            warn!("Failed to initialize haptic tone: {}", e);
            Box::new(LoggedPulse::default())
        }
    }
}
