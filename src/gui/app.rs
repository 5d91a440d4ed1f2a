//! Main Application
//! Composes the Data Handler and Chart Renderer behind a control panel and a
//! chart viewer. All UI actions arrive as explicit commands from the panel;
//! every core error is mapped to a status message and never crashes the app.

use egui::SidePanel;

use crate::charts::ChartRenderer;
use crate::data::DataHandler;
use crate::gui::control_panel::{parse_range, ChartKind, ControlPanel, ControlPanelAction};
use crate::gui::ChartViewer;
use crate::stats::SummaryStats;

/// Main application window.
pub struct ExplorerApp {
    data: DataHandler,
    renderer: ChartRenderer,
    control_panel: ControlPanel,
}

impl ExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            data: DataHandler::new(),
            renderer: ChartRenderer::new(),
            control_panel: ControlPanel::new(),
        }
    }

    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match self.data.load(&path) {
            Ok(()) => {
                self.control_panel
                    .update_columns(self.data.numeric_columns(), self.data.categorical_columns());
                self.control_panel.set_status(format!(
                    "Loaded {} rows, {} columns",
                    self.data.row_count(),
                    self.data.column_names().len()
                ));
                self.control_panel.selections.csv_path = Some(path);
            }
            Err(e) => self.control_panel.set_status(format!("Error: {e}")),
        }
    }

    /// Recompute the stats box for the selected column over the current view.
    fn refresh_stats(&mut self) {
        let column = self.control_panel.selections.stats_column.clone();
        if column.is_empty() {
            self.control_panel.stats_text.clear();
            return;
        }

        match self.data.stats(&column) {
            Ok(stats) => {
                self.control_panel.stats_text = format_stats(&column, &stats);
                if stats.count == 0 {
                    self.control_panel
                        .set_status("No rows in the filtered view");
                }
            }
            Err(e) => self.control_panel.set_status(format!("Error: {e}")),
        }
    }

    fn handle_apply_filter(&mut self) {
        let column = self.control_panel.selections.stats_column.clone();
        if column.is_empty() {
            self.control_panel.set_status("Select a column to filter");
            return;
        }

        let (min, max) = match parse_range(
            &self.control_panel.selections.min_input,
            &self.control_panel.selections.max_input,
        ) {
            Ok(bounds) => bounds,
            Err(e) => {
                self.control_panel.set_status(format!("Invalid range: {e}"));
                return;
            }
        };

        match self.data.filter_by_range(&column, min, max) {
            Ok(()) => {
                if self.data.view_row_count() == 0 {
                    self.control_panel.set_status("No data in selected range");
                } else {
                    self.control_panel.set_status(format!(
                        "Filter applied: {} of {} rows",
                        self.data.view_row_count(),
                        self.data.row_count()
                    ));
                }
                self.refresh_stats();
            }
            Err(e) => self.control_panel.set_status(format!("Error: {e}")),
        }
    }

    fn handle_show_chart(&mut self, kind: ChartKind) {
        let selections = self.control_panel.selections.clone();
        let result = match kind {
            ChartKind::Histogram | ChartKind::Line => {
                let column = selections.stats_column;
                if column.is_empty() {
                    self.control_panel.set_status("Select a column to chart");
                    return;
                }
                self.data.numeric_view_values(&column).map(|values| {
                    match kind {
                        ChartKind::Line => self.renderer.line(&column, values),
                        _ => self.renderer.histogram(&column, &values),
                    }
                })
            }
            ChartKind::Scatter => {
                if selections.scatter_x.is_empty() || selections.scatter_y.is_empty() {
                    self.control_panel.set_status("Select scatter X and Y columns");
                    return;
                }
                self.data
                    .numeric_view_pairs(&selections.scatter_x, &selections.scatter_y)
                    .map(|points| {
                        self.renderer
                            .scatter(&selections.scatter_x, &selections.scatter_y, points)
                    })
            }
            ChartKind::Pie => {
                if selections.pie_column.is_empty() {
                    self.control_panel.set_status("Select a pie chart column");
                    return;
                }
                self.data
                    .view_labels(&selections.pie_column)
                    .map(|labels| self.renderer.pie(&selections.pie_column, &labels))
            }
            ChartKind::Heatmap => {
                match self
                    .renderer
                    .correlation_heatmap(self.data.numeric_view_series())
                {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        self.control_panel.set_status(format!("Error: {e}"));
                        return;
                    }
                }
            }
        };

        match result {
            Ok(()) => {
                let title = self
                    .renderer
                    .last_figure()
                    .map(|f| f.title())
                    .unwrap_or_default();
                self.control_panel.set_status(format!("Rendered: {title}"));
            }
            Err(e) => self.control_panel.set_status(format!("Error: {e}")),
        }
    }

    fn handle_save_chart(&mut self) {
        if self.renderer.last_figure().is_none() {
            self.control_panel
                .set_status("Error: no chart has been rendered yet");
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG files", &["png"])
            .set_file_name("chart.png")
            .save_file()
        else {
            return;
        };

        match self.renderer.save_last_rendered(&path) {
            Ok(()) => self
                .control_panel
                .set_status(format!("Chart saved to {}", path.display())),
            Err(e) => self.control_panel.set_status(format!("Error: {e}")),
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::StatsColumnChanged => self.refresh_stats(),
                        ControlPanelAction::ApplyFilter => self.handle_apply_filter(),
                        ControlPanelAction::ShowChart(kind) => self.handle_show_chart(kind),
                        ControlPanelAction::SaveChart => self.handle_save_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ChartViewer::show(ui, self.renderer.last_figure());
        });
    }
}

/// Format a stats record the way pandas' `describe` prints one.
fn format_stats(column: &str, stats: &SummaryStats) -> String {
    let fmt = |v: f64| {
        if v.is_nan() {
            "NaN".to_string()
        } else {
            format!("{v:.6}")
        }
    };
    format!(
        "{column}\n\
         count  {}\n\
         mean   {}\n\
         std    {}\n\
         min    {}\n\
         25%    {}\n\
         50%    {}\n\
         75%    {}\n\
         max    {}",
        stats.count,
        fmt(stats.mean),
        fmt(stats.std),
        fmt(stats.min),
        fmt(stats.q1),
        fmt(stats.median),
        fmt(stats.q3),
        fmt(stats.max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_stats_like_describe() {
        let stats = SummaryStats {
            count: 2,
            mean: 35.0,
            std: 7.0710678118654755,
            min: 30.0,
            q1: 32.5,
            median: 35.0,
            q3: 37.5,
            max: 40.0,
        };
        let text = format_stats("age", &stats);
        assert!(text.starts_with("age\n"));
        assert!(text.contains("count  2"));
        assert!(text.contains("mean   35.000000"));
        assert!(text.contains("75%    37.500000"));
    }

    #[test]
    fn empty_stats_format_reports_nan_fields() {
        let text = format_stats("age", &SummaryStats::default());
        assert!(text.contains("count  0"));
        assert!(text.contains("mean   NaN"));
    }
}
