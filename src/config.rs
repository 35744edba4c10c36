use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::motion::trigger::DEFAULT_THRESHOLD_G;
use crate::motion::window::DEFAULT_CAPACITY;

/// 应用配置管理模块
/// 集中管理所有配置项，提供默认值和配置验证

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "motionscope.toml";

/// 主配置结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub plot: PlotConfig,
    pub motion: MotionConfig,
    pub startup: StartupConfig,
    pub simulator: SimulatorConfig,
    pub haptic: HapticConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
}

/// 绘图配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub plot_height: f32,
    pub plot_width: f32,
    pub colors: PlotColors,
}

/// 绘图颜色配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotColors {
    pub x_axis: [u8; 3],
    pub y_axis: [u8; 3],
    pub z_axis: [u8; 3],
}

/// 窗口长度和振动阈值
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub window_capacity: usize,
    pub threshold_g: f64,
}

/// 启动配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// 启动时自动订阅传感器
    pub auto_subscribe: bool,
}

/// 模拟加速度计配置
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub noise_g: f64,
    /// 每个样本开始一次晃动的概率
    pub shake_probability: f64,
    pub shake_amplitude_g: f64,
    pub shake_samples: u32,
}

/// 触觉（短音）配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HapticConfig {
    pub enabled: bool,
    pub tone_hz: f32,
    pub duration_ms: u64,
    pub volume: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 420.0,
            height: 860.0,
            title: "MotionScope - Accelerometer".to_string(),
            resizable: true,
            vsync: true,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            plot_height: 200.0,
            plot_width: 300.0,
            colors: PlotColors::default(),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            x_axis: [255, 0, 0],    // 红色
            y_axis: [0, 255, 0],    // 绿色
            z_axis: [0, 0, 255],    // 蓝色
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_CAPACITY,
            threshold_g: DEFAULT_THRESHOLD_G,
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            auto_subscribe: true,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            noise_g: 0.03,
            shake_probability: 0.02,
            shake_amplitude_g: 1.2,
            shake_samples: 8,
        }
    }
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tone_hz: 180.0,
            duration_ms: 80,
            volume: 0.4,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(ConfigError::IoError)?;

        Self::from_toml_str(&content)
    }

    /// 解析配置文本，未写出的字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)
            .map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.plot.plot_height <= 0.0 || self.plot.plot_width <= 0.0 {
            return Err(ConfigError::ValidationError("Plot dimensions must be positive".to_string()));
        }

        if self.motion.window_capacity == 0 {
            return Err(ConfigError::ValidationError("Window capacity must be positive".to_string()));
        }

        if !self.motion.threshold_g.is_finite() || self.motion.threshold_g <= 0.0 {
            return Err(ConfigError::ValidationError("Threshold must be a positive number of g".to_string()));
        }

        let sim = &self.simulator;
        if !(0.0..=1.0).contains(&sim.shake_probability) {
            return Err(ConfigError::ValidationError("Shake probability must be within 0..=1".to_string()));
        }

        // NaN 和无穷大会让随机数范围失效，工作线程直接 panic
        let amplitude_ok = |g: f64| g.is_finite() && g >= 0.0;
        if !amplitude_ok(sim.noise_g) || !amplitude_ok(sim.shake_amplitude_g) {
            return Err(ConfigError::ValidationError("Simulator amplitudes must be finite and not negative".to_string()));
        }

        let tone_hz = self.haptic.tone_hz;
        if !tone_hz.is_finite() || tone_hz <= 0.0 || self.haptic.duration_ms == 0 {
            return Err(ConfigError::ValidationError("Haptic tone needs a positive frequency and duration".to_string()));
        }

        if !(0.0..=1.0).contains(&self.haptic.volume) {
            return Err(ConfigError::ValidationError("Haptic volume must be within 0..=1".to_string()));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 配置管理器
#[derive(Debug)]
pub struct ConfigManager {
    config: AppConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建配置管理器
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            config_path: None,
        }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(&path)?;
        Ok(Self {
            config,
            config_path: Some(path.as_ref().to_path_buf()),
        })
    }

    /// 文件存在时加载，否则使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::new())
        }
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.motion.window_capacity, 50);
        assert_eq!(config.motion.threshold_g, 1.0);
        assert!(config.startup.auto_subscribe);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [motion]
            threshold_g = 1.5

            [haptic]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.motion.threshold_g, 1.5);
        assert_eq!(config.motion.window_capacity, 50);
        assert!(!config.haptic.enabled);
        assert_eq!(config.haptic.duration_ms, 80);
        assert_eq!(config.plot.colors.x_axis, [255, 0, 0]);
    }

    #[test]
    fn rejects_zero_capacity() {
        let result = AppConfig::from_toml_str("[motion]\nwindow_capacity = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_bad_threshold() {
        let mut config = AppConfig::default();
        config.motion.threshold_g = 0.0;
        assert!(config.validate().is_err());
        config.motion.threshold_g = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_simulator_and_haptic_values() {
        let mut config = AppConfig::default();
        config.simulator.shake_probability = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.haptic.volume = 2.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.haptic.duration_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_simulator_values() {
        for text in [
            "[simulator]\nnoise_g = nan\n",
            "[simulator]\nshake_amplitude_g = inf\n",
            "[simulator]\nnoise_g = -inf\n",
            "[haptic]\ntone_hz = nan\n",
            "[haptic]\ntone_hz = inf\n",
        ] {
            let result = AppConfig::from_toml_str(text);
            assert!(matches!(result, Err(ConfigError::ValidationError(_))), "{}", text);
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = AppConfig::from_toml_str("[motion\nthreshold_g = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let manager = ConfigManager::load_or_default("does/not/exist/motionscope.toml").unwrap();
        assert!(manager.config_path().is_none());
        assert_eq!(manager.get_config().motion.window_capacity, 50);
    }
}
