use eframe::egui;
use crate::app::app_core::MotionApp;
use crate::types::Axis;

pub fn render_main_panel(app: &mut MotionApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label("Accelerometer: (in gs where 1g = 9.81 m/s^2)");

            // 每轴最新读数
            let latest = app.view_model.latest_sample();
            for axis in Axis::ALL {
                let text = match latest {
                    Some(sample) => format!("{}: {:.4}", axis.label().to_lowercase(), sample.component(axis)),
                    None => format!("{}: -", axis.label().to_lowercase()),
                };
                ui.label(text);
            }
        });

        if app.view_model.window().is_empty() {
            ui.vertical_centered(|ui| {
                ui.colored_label(egui::Color32::GRAY, "waiting for data...");
            });
        }

        ui.add_space(8.0);

        let capacity = app.view_model.window().capacity();
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                for (axis, chart) in &app.charts {
                    let values = app.view_model.window_snapshot(*axis);
                    chart.ui(ui, &values, capacity);
                    ui.add_space(6.0);
                }
            });
        });
    });
}
