use egui_plot::{Line, Plot, PlotBounds, PlotPoints};
use egui::Color32;

/// 格式化数字为固定宽度的 y 轴标签
fn format_fixed_width_y_label(value: f64) -> String {
    let abs_value = value.abs();
    // 根据数值大小选择格式，全部固定为6字符宽度
    if abs_value >= 1000.0 {
        format!("{:-6.1e}", value)
    } else if abs_value >= 100.0 {
        format!("{:-6.0}", value)
    } else if abs_value >= 10.0 {
        format!("{:-6.1}", value)
    } else {
        format!("{:-6.2}", value)
    }
}

/// 计算动态Y轴范围，上下各留 5% 边距
pub fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let (y_min, y_max) = values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), &val| (min.min(val), max.max(val))
    );

    let range = (y_max - y_min).max(0.1);
    Some((y_min - range * 0.05, y_max + range * 0.05))
}

/// 索引0是最旧的数据，画在最左侧
pub fn chart_points(values: &[f64]) -> Vec<[f64; 2]> {
    values
        .iter()
        .enumerate()
        .map(|(i, &y)| [i as f64, y])
        .collect()
}

/// One scrolling line chart for a single axis.
#[derive(Debug, Clone)]
pub struct AxisChart {
    title: String,
    color: Color32,
    width: f32,
    height: f32,
}

impl AxisChart {
    pub fn new(title: &str, color: [u8; 3], width: f32, height: f32) -> Self {
        Self {
            title: title.to_string(),
            color: Color32::from_rgb(color[0], color[1], color[2]),
            width,
            height,
        }
    }

    /// `capacity` fixes the x range so the line scrolls once the window is full.
    pub fn ui(&self, ui: &mut egui::Ui, values: &[f64], capacity: usize) {
        let bounds = value_bounds(values);
        let x_max = capacity.saturating_sub(1).max(1) as f64;

        Plot::new(&self.title)
            .width(self.width)
            .height(self.height)
            .y_axis_label(self.title.as_str())
            .x_axis_formatter(|v, _| format!("{:.0}", v.value))
            .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let Some((y_min, y_max)) = bounds else {
                    return;
                };

                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [0.0, y_min],
                    [x_max, y_max],
                ));

                let points = chart_points(values);
                plot_ui.line(Line::new(self.title.as_str(), PlotPoints::from(points)).color(self.color).width(1.5));
            });
    }
}
