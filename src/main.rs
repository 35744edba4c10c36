mod app;
mod config;
mod haptic;
mod logger;
mod motion;
mod plotter;
mod sensor;
mod types;

use std::env;
use std::path::PathBuf;
use eframe::egui;
use log::{error, info, warn};

use app::{MotionApp, ViewModel};
use config::{ConfigManager, DEFAULT_CONFIG_PATH};
use sensor::SimulatedAccelerometer;

fn main() {
    logger::init_logger();
    info!("Application starting");

    // 第一个参数为配置文件路径
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match ConfigManager::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };
    match config.config_path() {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config at {}, using defaults", config_path.display()),
    }
    let settings = config.get_config().clone();

    let sensor = match SimulatedAccelerometer::new(&settings.simulator) {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("Accelerometer failed: {}", e);
            std::process::exit(1);
        }
    };
    let actuator = haptic::build_actuator(&settings.haptic);

    let mut view_model = ViewModel::new(Box::new(sensor), actuator, &settings.motion);
    if settings.startup.auto_subscribe {
        // 与挂载时自动订阅一致；失败时保持停止状态，由状态栏提示
        if let Err(e) = view_model.subscribe() {
            warn!("Initial subscribe failed: {}", e);
        }
    }

    let options = eframe::NativeOptions {
        vsync: settings.window.vsync,
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window.title.clone())
            .with_inner_size([settings.window.width, settings.window.height])
            .with_resizable(settings.window.resizable),
        ..Default::default()
    };

    let app = MotionApp::new(view_model, &settings.plot);
    if let Err(e) = eframe::run_native(
        &settings.window.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    ) {
        error!("GUI failed: {}", e);
        std::process::exit(1);
    }

    // 窗口关闭时 MotionApp 已被释放，订阅和传感器线程随之结束
    info!("GUI closed, shutting down");
}
