use eframe::egui;
use crate::app::app_core::MotionApp;
use crate::types::RateSetting;

const BUTTON_HEIGHT: f32 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Toggle,
    Slow,
    Fast,
}

pub fn render_control_bar(app: &mut MotionApp, ctx: &egui::Context) {
    let mut intent = None;

    egui::TopBottomPanel::bottom("control_bar")
        .min_height(BUTTON_HEIGHT + 10.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            let active = app.view_model.is_active();
            let rate = app.view_model.rate();

            ui.columns(3, |columns| {
                let toggle_text = if active { "On" } else { "Off" };
                let buttons = [
                    (Intent::Toggle, egui::Button::new(toggle_text).selected(active)),
                    (Intent::Slow, egui::Button::new("Slow").selected(rate == RateSetting::Slow)),
                    (Intent::Fast, egui::Button::new("Fast").selected(rate == RateSetting::Fast)),
                ];

                for (column, (kind, button)) in columns.iter_mut().zip(buttons) {
                    let width = column.available_width();
                    if column.add_sized([width, BUTTON_HEIGHT], button).clicked() {
                        intent = Some(kind);
                    }
                }
            });
            ui.add_space(5.0);
        });

    // 渲染结束后再修改状态
    match intent {
        Some(Intent::Toggle) => app.request_toggle(),
        Some(Intent::Slow) => app.request_slow(),
        Some(Intent::Fast) => app.request_fast(),
        None => {}
    }
}
