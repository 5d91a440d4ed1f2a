//! Visual Data Explorer - interactive CSV statistics, filtering and charts.

mod charts;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::ExplorerApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Visual Data Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Visual Data Explorer",
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc)))),
    )
}
