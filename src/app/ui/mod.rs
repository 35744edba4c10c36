pub mod status_bar;
pub mod main_panel;
pub mod control_bar;

pub use status_bar::render_status_bar;
pub use main_panel::render_main_panel;
pub use control_bar::render_control_bar;
