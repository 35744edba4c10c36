use std::time::Duration;
use eframe::{egui, Frame};
use log::warn;

use crate::config::PlotConfig;
use crate::plotter::AxisChart;
use crate::types::{Axis, RateSetting};
use super::view_model::ViewModel;

/// 最慢的重绘间隔，快速档位时跟随采样间隔
const MAX_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct MotionApp {
    pub view_model: ViewModel,

    pub charts: Vec<(Axis, AxisChart)>,
}

impl MotionApp {
    pub fn new(view_model: ViewModel, plot: &PlotConfig) -> Self {
        let charts = Axis::ALL
            .iter()
            .map(|&axis| {
                let color = match axis {
                    Axis::X => plot.colors.x_axis,
                    Axis::Y => plot.colors.y_axis,
                    Axis::Z => plot.colors.z_axis,
                };
                (axis, AxisChart::new(axis.label(), color, plot.plot_width, plot.plot_height))
            })
            .collect();

        Self {
            view_model,
            charts,
        }
    }

    pub fn request_toggle(&mut self) {
        // 失败原因已记录在 view model 中，状态栏会显示
        if let Err(e) = self.view_model.toggle() {
            warn!("Toggle failed: {}", e);
        }
    }

    pub fn request_slow(&mut self) {
        self.view_model.set_rate(RateSetting::Slow);
    }

    pub fn request_fast(&mut self) {
        self.view_model.set_rate(RateSetting::Fast);
    }
}

impl eframe::App for MotionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 设置明亮模式主题
        ctx.set_visuals(egui::Visuals::light());

        // 先处理到达的样本再渲染
        self.view_model.pump();

        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_control_bar(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);

        let repaint = self.view_model.rate().interval().min(MAX_REPAINT_INTERVAL);
        ctx.request_repaint_after(repaint);
    }
}
