//! Charts module - figure building, interactive drawing and PNG export

mod figure;
mod plotter;
mod renderer;

pub use figure::{ChartError, ChartFigure};
pub use plotter::ChartPlotter;
pub use renderer::ChartRenderer;
