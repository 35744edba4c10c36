pub mod app_core;
pub mod ui;
pub mod view_model;

pub use app_core::MotionApp;
pub use view_model::ViewModel;
