//! Control Panel Widget
//! Left side panel with all input controls and settings. Every user action is
//! returned as a [`ControlPanelAction`] for the app to dispatch; the panel
//! itself never touches the data handler or the renderer.

use std::path::PathBuf;

use egui::{Color32, ComboBox, RichText};
use thiserror::Error;

/// Filter bounds that failed presentation-layer validation.
#[derive(Error, Debug, PartialEq)]
pub enum RangeInputError {
    #[error("{0:?} is not a number")]
    NotNumeric(String),
    #[error("minimum is greater than maximum")]
    Inverted,
}

/// Parse and validate the min/max filter inputs. The Data Handler itself does
/// not check `min <= max`, so this runs before it is called.
pub fn parse_range(min: &str, max: &str) -> Result<(f64, f64), RangeInputError> {
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| RangeInputError::NotNumeric(s.trim().to_string()))
    };
    let lo = parse(min)?;
    let hi = parse(max)?;
    if lo > hi {
        return Err(RangeInputError::Inverted);
    }
    Ok((lo, hi))
}

/// Current user selections, read by the app when dispatching an action.
#[derive(Default, Clone)]
pub struct Selections {
    pub csv_path: Option<PathBuf>,
    pub stats_column: String,
    pub scatter_x: String,
    pub scatter_y: String,
    pub pie_column: String,
    pub min_input: String,
    pub max_input: String,
}

/// Left side control panel with file selection, filter and chart controls.
pub struct ControlPanel {
    pub selections: Selections,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub stats_text: String,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selections: Selections::default(),
            numeric_columns: Vec::new(),
            categorical_columns: Vec::new(),
            stats_text: String::new(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the column selectors after a CSV load.
    pub fn update_columns(&mut self, numeric: Vec<String>, categorical: Vec<String>) {
        self.numeric_columns = numeric;
        self.categorical_columns = categorical;
        self.selections.stats_column.clear();
        self.selections.scatter_x.clear();
        self.selections.scatter_y.clear();
        self.selections.pie_column.clear();
        self.stats_text.clear();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the control panel and report the action the user triggered.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Visual Data Explorer")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .selections
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.selections.csv_path.is_some() {
                            ui.visuals().text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Column & Statistics =====
        ui.label(RichText::new("🔎 Column Statistics").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Column:");
            if Self::column_combo(
                ui,
                "stats_col",
                &self.numeric_columns,
                &mut self.selections.stats_column,
            ) {
                action = ControlPanelAction::StatsColumnChanged;
            }
        });

        if !self.stats_text.is_empty() {
            ui.add_space(5.0);
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(&self.stats_text).monospace().size(12.0));
                });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Range Filter =====
        ui.label(RichText::new("🧮 Value Range Filter").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Min:");
            ui.add(
                egui::TextEdit::singleline(&mut self.selections.min_input).desired_width(60.0),
            );
            ui.label("Max:");
            ui.add(
                egui::TextEdit::singleline(&mut self.selections.max_input).desired_width(60.0),
            );
            if ui.button("Apply Filter").clicked() {
                action = ControlPanelAction::ApplyFilter;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Charts =====
        ui.label(RichText::new("📈 Charts").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui.button("Histogram").clicked() {
                action = ControlPanelAction::ShowChart(ChartKind::Histogram);
            }
            if ui.button("Line Plot").clicked() {
                action = ControlPanelAction::ShowChart(ChartKind::Line);
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Scatter X:");
            Self::column_combo(
                ui,
                "scatter_x",
                &self.numeric_columns,
                &mut self.selections.scatter_x,
            );
        });
        ui.horizontal(|ui| {
            ui.label("Scatter Y:");
            Self::column_combo(
                ui,
                "scatter_y",
                &self.numeric_columns,
                &mut self.selections.scatter_y,
            );
            if ui.button("Scatter Plot").clicked() {
                action = ControlPanelAction::ShowChart(ChartKind::Scatter);
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Pie Column:");
            Self::column_combo(
                ui,
                "pie_col",
                &self.categorical_columns,
                &mut self.selections.pie_column,
            );
            if ui.button("Pie Chart").clicked() {
                action = ControlPanelAction::ShowChart(ChartKind::Pie);
            }
        });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button("Correlation Heatmap").clicked() {
                action = ControlPanelAction::ShowChart(ChartKind::Heatmap);
            }
            ui.add_space(5.0);
            if ui.button("💾 Save Last Chart").clicked() {
                action = ControlPanelAction::SaveChart;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Status =====
        let status_color = if self.status.contains("Error") || self.status.contains("Invalid") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") || self.status.contains("saved") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Draw a column selector; true when the selection changed.
    fn column_combo(
        ui: &mut egui::Ui,
        id: &str,
        columns: &[String],
        selected: &mut String,
    ) -> bool {
        let mut changed = false;
        ComboBox::from_id_salt(id)
            .width(140.0)
            .selected_text(selected.clone())
            .show_ui(ui, |ui| {
                for col in columns {
                    if ui.selectable_label(selected == col, col).clicked() {
                        *selected = col.clone();
                        changed = true;
                    }
                }
            });
        changed
    }
}

/// Actions triggered by the control panel, dispatched by the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    StatsColumnChanged,
    ApplyFilter,
    ShowChart(ChartKind),
    SaveChart,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Histogram,
    Line,
    Scatter,
    Pie,
    Heatmap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_valid_range() {
        assert_eq!(parse_range("25", " 45.5 "), Ok((25.0, 45.5)));
        assert_eq!(parse_range("-1", "-1"), Ok((-1.0, -1.0)));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(
            parse_range("abc", "45"),
            Err(RangeInputError::NotNumeric("abc".to_string()))
        );
        assert_eq!(
            parse_range("1", ""),
            Err(RangeInputError::NotNumeric(String::new()))
        );
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(parse_range("45", "25"), Err(RangeInputError::Inverted));
    }
}
