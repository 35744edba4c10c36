use eframe::egui;
use crate::app::app_core::MotionApp;

pub fn render_status_bar(app: &mut MotionApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(32.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                let vm = &app.view_model;
                ui.label("Status:");

                let (status_text, status_color) = if vm.is_active() {
                    ("Sampling", egui::Color32::from_rgb(0, 150, 0)) // 绿色
                } else {
                    ("Stopped", egui::Color32::from_rgb(150, 0, 0)) // 红色
                };
                ui.colored_label(status_color, status_text);

                ui.separator();
                let rate = vm.rate();
                ui.label(format!("Rate: {} ({}ms)", rate.label(), rate.interval().as_millis()));

                ui.separator();
                ui.label(format!("Threshold: {:.2}g", vm.threshold()));

                ui.separator();
                let window = vm.window();
                ui.label(format!("Window: {}/{}", window.len(), window.capacity()));

                ui.separator();
                let stats = vm.stats();
                ui.label(format!("Samples: {}  Pulses: {}", stats.accepted, stats.pulses));
                if stats.stale_skipped > 0 {
                    ui.label(format!("Skipped: {}", stats.stale_skipped));
                }
            });

            // 传感器不可用时显示原因
            if let Some(error) = app.view_model.last_error() {
                ui.colored_label(egui::Color32::from_rgb(200, 0, 0), format!("Sensor unavailable: {}", error));
            }
            ui.add_space(4.0);
        });
}
