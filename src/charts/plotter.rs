//! Chart Plotter Module
//! Draws the current figure interactively using egui_plot, with the pie and
//! heatmap painted directly since egui_plot has no element for them.

use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::charts::figure::{correlation_rgb, ChartFigure, HistBin, PieSlice};

/// Primary series color.
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

/// Color palette for pie slices.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Renders a [`ChartFigure`] into an egui panel.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw(ui: &mut egui::Ui, figure: &ChartFigure) {
        let height = (ui.available_height() - 10.0).max(200.0);
        match figure {
            ChartFigure::Histogram { column, bins } => {
                Self::draw_histogram(ui, column, bins, height)
            }
            ChartFigure::Line { column, values } => Self::draw_line(ui, column, values, height),
            ChartFigure::Scatter {
                x_column,
                y_column,
                points,
            } => Self::draw_scatter(ui, x_column, y_column, points, height),
            ChartFigure::Pie { slices, .. } => Self::draw_pie(ui, slices, height),
            ChartFigure::Heatmap { columns, matrix } => {
                Self::draw_heatmap(ui, columns, matrix, height)
            }
        }
    }

    fn draw_histogram(ui: &mut egui::Ui, column: &str, bins: &[HistBin], height: f32) {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|b| {
                Bar::new((b.start + b.end) / 2.0, b.count as f64).width(b.end - b.start)
            })
            .collect();

        Plot::new("histogram")
            .height(height)
            .allow_scroll(false)
            .x_axis_label(column.to_string())
            .y_axis_label("Frequency")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(ACCENT_COLOR.gamma_multiply(0.8))
                        .name(column),
                );
            });
    }

    fn draw_line(ui: &mut egui::Ui, column: &str, values: &[f64], height: f32) {
        let points: PlotPoints = values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect();

        Plot::new("line")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Row")
            .y_axis_label(column.to_string())
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(ACCENT_COLOR).width(2.0).name(column));
            });
    }

    fn draw_scatter(
        ui: &mut egui::Ui,
        x_column: &str,
        y_column: &str,
        points: &[[f64; 2]],
        height: f32,
    ) {
        let plot_points: PlotPoints = points.iter().copied().collect();

        Plot::new("scatter")
            .height(height)
            .allow_scroll(false)
            .x_axis_label(x_column.to_string())
            .y_axis_label(y_column.to_string())
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(plot_points)
                        .radius(4.0)
                        .color(ACCENT_COLOR.gamma_multiply(0.9)),
                );
            });
    }

    fn draw_pie(ui: &mut egui::Ui, slices: &[PieSlice], height: f32) {
        let total: f64 = slices.iter().map(|s| s.count as f64).sum();
        if total == 0.0 {
            ui.label("No values to chart");
            return;
        }

        let desired = Vec2::new(ui.available_width(), height);
        let (response, painter) = ui.allocate_painter(desired, Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.35;
        let text_color = ui.visuals().text_color();

        let mut start = -std::f64::consts::FRAC_PI_2;
        for (i, slice) in slices.iter().enumerate() {
            let sweep = slice.count as f64 / total * std::f64::consts::TAU;
            let color = PALETTE[i % PALETTE.len()];

            // Triangle fan keeps wide slices (> half the pie) rendering correctly.
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            let point_at = |angle: f64| {
                center
                    + Vec2::new(angle.cos() as f32, angle.sin() as f32) * radius
            };
            for k in 0..steps {
                let a0 = start + sweep * k as f64 / steps as f64;
                let a1 = start + sweep * (k + 1) as f64 / steps as f64;
                painter.add(Shape::convex_polygon(
                    vec![center, point_at(a0), point_at(a1)],
                    color,
                    Stroke::NONE,
                ));
            }

            let mid = start + sweep / 2.0;
            let label_pos: Pos2 = center
                + Vec2::new(mid.cos() as f32, mid.sin() as f32) * (radius * 1.2);
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                format!("{} ({:.1}%)", slice.label, slice.count as f64 / total * 100.0),
                FontId::proportional(13.0),
                text_color,
            );

            start += sweep;
        }
    }

    fn draw_heatmap(ui: &mut egui::Ui, columns: &[String], matrix: &[Vec<f64>], height: f32) {
        let n = columns.len();
        if n == 0 {
            return;
        }

        let desired = Vec2::new(ui.available_width(), height);
        let (response, painter) = ui.allocate_painter(desired, Sense::hover());
        let rect = response.rect;
        let text_color = ui.visuals().text_color();

        let label_w = 110.0_f32;
        let label_h = 24.0_f32;
        let cell = ((rect.width() - label_w) / n as f32)
            .min((rect.height() - label_h) / n as f32)
            .max(10.0);
        let origin = rect.left_top() + Vec2::new(label_w, label_h);

        // Column headers along the top, row names down the left side.
        for (i, name) in columns.iter().enumerate() {
            painter.text(
                origin + Vec2::new((i as f32 + 0.5) * cell, -label_h / 2.0),
                Align2::CENTER_CENTER,
                name,
                FontId::proportional(12.0),
                text_color,
            );
            painter.text(
                origin + Vec2::new(-6.0, (i as f32 + 0.5) * cell),
                Align2::RIGHT_CENTER,
                name,
                FontId::proportional(12.0),
                text_color,
            );
        }

        for row in 0..n {
            for col in 0..n {
                let value = matrix[row][col];
                let (r, g, b) = correlation_rgb(value);
                let cell_rect = egui::Rect::from_min_size(
                    origin + Vec2::new(col as f32 * cell, row as f32 * cell),
                    Vec2::splat(cell),
                );
                painter.rect_filled(cell_rect, 0.0, Color32::from_rgb(r, g, b));
                painter.text(
                    cell_rect.center(),
                    Align2::CENTER_CENTER,
                    if value.is_nan() {
                        "-".to_string()
                    } else {
                        format!("{value:.2}")
                    },
                    FontId::proportional(12.0),
                    Color32::BLACK,
                );
            }
        }
    }
}
