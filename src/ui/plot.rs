use eframe::egui::{Color32, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use crate::data::series::from_plot_seconds;
use crate::state::AppState;

const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);

// ---------------------------------------------------------------------------
// Sensor time-series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart title and the sensor_value-over-time plot.
pub fn sensor_plot(ui: &mut Ui, state: &AppState) {
    let chart = &state.chart;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    Plot::new("sensor_plot")
        .x_axis_label("Timestamp")
        .y_axis_label("Sensor Value")
        // Two-line tick labels stay readable where a rotated label would.
        .x_axis_formatter(|mark, _range| format_time(mark.value, "%Y-%m-%d\n%H:%M"))
        .label_formatter(|_name, value| {
            format!(
                "{}\n{:.2}",
                format_time(value.x, "%Y-%m-%d %H:%M:%S"),
                value.y
            )
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if chart.points.is_empty() {
                return;
            }
            let line = Line::new(PlotPoints::from(chart.points.clone()))
                .name("sensor_value")
                .color(SKY_BLUE)
                .width(1.5);
            let markers = Points::new(PlotPoints::from(chart.points.clone()))
                .shape(MarkerShape::Circle)
                .radius(3.0)
                .color(SKY_BLUE);
            plot_ui.line(line);
            plot_ui.points(markers);
        });
}

fn format_time(secs: f64, fmt: &str) -> String {
    from_plot_seconds(secs)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}
