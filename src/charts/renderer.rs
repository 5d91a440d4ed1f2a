//! Chart Renderer
//! Owns the most recently rendered figure and exports it to a PNG file with
//! plotters. The figure is overwritten on every render and consumed read-only
//! by the save action; saving always writes to the caller-supplied path.

use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::charts::figure::{correlation_rgb, ChartError, ChartFigure, HistBin, PieSlice};

/// Exported image size in pixels.
const EXPORT_SIZE: (u32, u32) = (1000, 700);

/// Slice colors for pie charts, mirroring the interactive palette.
const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),
    RGBColor(52, 152, 219),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(121, 85, 72),
    RGBColor(96, 125, 139),
];

/// Stateless chart building plus one piece of mutable state: the last
/// rendered figure.
#[derive(Default)]
pub struct ChartRenderer {
    last: Option<ChartFigure>,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn histogram(&mut self, column: &str, values: &[f64]) {
        self.last = Some(ChartFigure::histogram(column, values));
    }

    pub fn line(&mut self, column: &str, values: Vec<f64>) {
        self.last = Some(ChartFigure::line(column, values));
    }

    pub fn scatter(&mut self, x_column: &str, y_column: &str, points: Vec<[f64; 2]>) {
        self.last = Some(ChartFigure::scatter(x_column, y_column, points));
    }

    pub fn pie(&mut self, column: &str, labels: &[String]) {
        self.last = Some(ChartFigure::pie(column, labels));
    }

    /// Fails with [`ChartError::InsufficientData`] when fewer than two numeric
    /// columns exist; the previously rendered figure is kept in that case.
    pub fn correlation_heatmap(
        &mut self,
        series: Vec<(String, Vec<f64>)>,
    ) -> Result<(), ChartError> {
        self.last = Some(ChartFigure::correlation_heatmap(series)?);
        Ok(())
    }

    /// The figure currently on screen, if any.
    pub fn last_figure(&self) -> Option<&ChartFigure> {
        self.last.as_ref()
    }

    /// Export the last rendered figure as a PNG at `path`.
    pub fn save_last_rendered(&self, path: &Path) -> Result<(), ChartError> {
        let figure = self.last.as_ref().ok_or(ChartError::NothingRendered)?;
        render_png(figure, path, EXPORT_SIZE).map_err(|e| ChartError::Render(e.to_string()))?;
        log::info!("chart saved to {path:?}");
        Ok(())
    }
}

fn render_png(figure: &ChartFigure, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&figure.title(), ("sans-serif", 28))?;

    match figure {
        ChartFigure::Histogram { column, bins } => draw_histogram(&root, column, bins)?,
        ChartFigure::Line { column, values } => draw_line(&root, column, values)?,
        ChartFigure::Scatter {
            x_column,
            y_column,
            points,
        } => draw_scatter(&root, x_column, y_column, points)?,
        ChartFigure::Pie { slices, .. } => draw_pie(&root, slices)?,
        ChartFigure::Heatmap { columns, matrix } => draw_heatmap(&root, columns, matrix)?,
    }

    root.present()?;
    Ok(())
}

fn draw_histogram(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    column: &str,
    bins: &[HistBin],
) -> Result<()> {
    let Some(first) = bins.first() else {
        return Ok(());
    };
    let x_range = first.start..bins[bins.len() - 1].end;
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, 0.0..y_max * 1.05 + 1.0)?;
    chart
        .configure_mesh()
        .x_desc(column)
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        let mut bar = Rectangle::new(
            [(b.start, 0.0), (b.end, b.count as f64)],
            PALETTE[1].mix(0.6).filled(),
        );
        bar.set_margin(0, 0, 0, 1);
        bar
    }))?;
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLACK.stroke_width(1))
    }))?;
    Ok(())
}

fn draw_line(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    column: &str,
    values: &[f64],
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in values {
        y_min = y_min.min(v);
        y_max = y_max.max(v);
    }
    if y_min == y_max {
        y_min -= 0.5;
        y_max += 0.5;
    }
    let x_max = (values.len() as f64 - 1.0).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)?;
    chart.configure_mesh().x_desc("Row").y_desc(column).draw()?;

    chart.draw_series(LineSeries::new(
        values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
        PALETTE[1].stroke_width(2),
    ))?;
    Ok(())
}

fn draw_scatter(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    x_column: &str,
    y_column: &str,
    points: &[[f64; 2]],
) -> Result<()> {
    if points.is_empty() {
        return Ok(());
    }
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        x_min = x_min.min(p[0]);
        x_max = x_max.max(p[0]);
        y_min = y_min.min(p[1]);
        y_max = y_max.max(p[1]);
    }
    if x_min == x_max {
        x_min -= 0.5;
        x_max += 0.5;
    }
    if y_min == y_max {
        y_min -= 0.5;
        y_max += 0.5;
    }

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc(x_column)
        .y_desc(y_column)
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new((p[0], p[1]), 4, PALETTE[1].mix(0.8).filled())),
    )?;
    Ok(())
}

fn draw_pie(root: &DrawingArea<BitMapBackend<'_>, Shift>, slices: &[PieSlice]) -> Result<()> {
    if slices.is_empty() {
        return Ok(());
    }
    let (w, h) = root.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let radius = (w.min(h) as f64) * 0.35;

    let sizes: Vec<f64> = slices.iter().map(|s| s.count as f64).collect();
    let labels: Vec<String> = slices.iter().map(|s| s.label.clone()).collect();
    let colors: Vec<RGBColor> = (0..slices.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 18).into_font());
    pie.percentages(("sans-serif", 14).into_font().color(&BLACK));
    root.draw(&pie)?;
    Ok(())
}

fn draw_heatmap(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    columns: &[String],
    matrix: &[Vec<f64>],
) -> Result<()> {
    let n = columns.len();
    let names = columns.to_vec();

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(0.0..n as f64, 0.0..n as f64)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|v| label_for(&names, *v))
        .y_label_formatter(&|v| label_for(&names, *v))
        .draw()?;

    // Row 0 of the matrix is drawn at the top.
    chart.draw_series((0..n).flat_map(move |i| {
        (0..n).map(move |j| {
            let (r, g, b) = correlation_rgb(matrix[j][i]);
            Rectangle::new(
                [
                    (i as f64, (n - j) as f64),
                    ((i + 1) as f64, (n - j - 1) as f64),
                ],
                RGBColor(r, g, b).filled(),
            )
        })
    }))?;

    chart.draw_series((0..n).flat_map(move |i| {
        (0..n).map(move |j| {
            let value = matrix[j][i];
            let text = if value.is_nan() {
                "-".to_string()
            } else {
                format!("{value:.2}")
            };
            Text::new(
                text,
                (i as f64 + 0.35, (n - j) as f64 - 0.45),
                ("sans-serif", 16).into_font(),
            )
        })
    }))?;
    Ok(())
}

fn label_for(names: &[String], v: f64) -> String {
    let idx = v.floor() as usize;
    if v.fract() != 0.0 || idx >= names.len() {
        return String::new();
    }
    names[idx].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_without_a_rendered_chart_fails() {
        let renderer = ChartRenderer::new();
        let err = renderer
            .save_last_rendered(Path::new("/tmp/never-written.png"))
            .unwrap_err();
        assert!(matches!(err, ChartError::NothingRendered));
    }

    #[test]
    fn heatmap_failure_keeps_the_previous_figure() {
        let mut renderer = ChartRenderer::new();
        renderer.histogram("age", &[1.0, 2.0, 3.0]);

        let one_column = vec![("age".to_string(), vec![1.0, 2.0])];
        let err = renderer.correlation_heatmap(one_column).unwrap_err();
        assert!(matches!(err, ChartError::InsufficientData));
        assert!(matches!(
            renderer.last_figure(),
            Some(ChartFigure::Histogram { .. })
        ));
    }

    #[test]
    fn each_render_overwrites_the_last_figure() {
        let mut renderer = ChartRenderer::new();
        renderer.histogram("age", &[1.0]);
        renderer.line("age", vec![1.0, 2.0]);
        assert!(matches!(
            renderer.last_figure(),
            Some(ChartFigure::Line { .. })
        ));
    }
}
