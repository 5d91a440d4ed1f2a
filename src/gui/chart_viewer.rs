//! Chart Viewer Widget
//! Central panel showing the most recently rendered chart.

use egui::{Color32, RichText};

use crate::charts::{ChartFigure, ChartPlotter};

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, figure: Option<&ChartFigure>) {
        let Some(figure) = figure else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("No chart rendered")
                        .size(20.0)
                        .color(Color32::GRAY),
                );
            });
            return;
        };

        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(figure.title()).size(18.0).strong());
                    ui.add_space(8.0);
                    ChartPlotter::draw(ui, figure);
                });
            });
    }
}
