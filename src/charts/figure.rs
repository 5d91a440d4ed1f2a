//! Chart figures.
//!
//! A [`ChartFigure`] is an owned snapshot of everything needed to draw one
//! chart: the selected column name(s) plus the prepared series taken from the
//! filtered view at render time. The interactive plotter and the PNG exporter
//! both consume the same figure, so a saved chart always matches what was on
//! screen even if the filter changed afterwards.

use std::collections::HashMap;

use thiserror::Error;

use crate::stats;

/// Default bin count for histograms.
pub const HISTOGRAM_BINS: usize = 10;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("need at least two numeric columns for a correlation heatmap")]
    InsufficientData,
    #[error("no chart has been rendered yet")]
    NothingRendered,
    #[error("failed to export chart: {0}")]
    Render(String),
}

/// One histogram bar: `[start, end)` with the last bin closed on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct HistBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub enum ChartFigure {
    Histogram {
        column: String,
        bins: Vec<HistBin>,
    },
    Line {
        column: String,
        values: Vec<f64>,
    },
    Scatter {
        x_column: String,
        y_column: String,
        points: Vec<[f64; 2]>,
    },
    Pie {
        column: String,
        slices: Vec<PieSlice>,
    },
    Heatmap {
        columns: Vec<String>,
        matrix: Vec<Vec<f64>>,
    },
}

impl ChartFigure {
    pub fn histogram(column: &str, values: &[f64]) -> Self {
        ChartFigure::Histogram {
            column: column.to_string(),
            bins: bin_values(values, HISTOGRAM_BINS),
        }
    }

    pub fn line(column: &str, values: Vec<f64>) -> Self {
        ChartFigure::Line {
            column: column.to_string(),
            values,
        }
    }

    pub fn scatter(x_column: &str, y_column: &str, points: Vec<[f64; 2]>) -> Self {
        ChartFigure::Scatter {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            points,
        }
    }

    pub fn pie(column: &str, labels: &[String]) -> Self {
        ChartFigure::Pie {
            column: column.to_string(),
            slices: count_slices(labels),
        }
    }

    /// Pearson correlation heatmap over all numeric columns of the view.
    /// Fails before anything is built when fewer than two columns exist.
    pub fn correlation_heatmap(series: Vec<(String, Vec<f64>)>) -> Result<Self, ChartError> {
        if series.len() < 2 {
            return Err(ChartError::InsufficientData);
        }
        let matrix = stats::correlation_matrix(&series);
        Ok(ChartFigure::Heatmap {
            columns: series.into_iter().map(|(name, _)| name).collect(),
            matrix,
        })
    }

    /// Chart title shown above the plot and in the exported image.
    pub fn title(&self) -> String {
        match self {
            ChartFigure::Histogram { column, .. } => format!("{column} - Histogram"),
            ChartFigure::Line { column, .. } => format!("{column} - Line Plot"),
            ChartFigure::Scatter {
                x_column, y_column, ..
            } => format!("{x_column} vs {y_column} - Scatter Plot"),
            ChartFigure::Pie { column, .. } => format!("{column} - Pie Chart"),
            ChartFigure::Heatmap { .. } => "Correlation Heatmap".to_string(),
        }
    }
}

/// Split `values` into `n_bins` equal-width bins. A degenerate range
/// (all values equal) is widened by half a unit on each side.
pub fn bin_values(values: &[f64], n_bins: usize) -> Vec<HistBin> {
    if values.is_empty() || n_bins == 0 {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Category counts sorted by count descending, label ascending on ties.
fn count_slices(labels: &[String]) -> Vec<PieSlice> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.as_str()).or_default() += 1;
    }

    let mut slices: Vec<PieSlice> = counts
        .into_iter()
        .map(|(label, count)| PieSlice {
            label: label.to_string(),
            count,
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    slices
}

/// Diverging blue-white-red color for a correlation value in [-1, 1].
/// NaN (undefined correlation) maps to gray.
pub fn correlation_rgb(r: f64) -> (u8, u8, u8) {
    if r.is_nan() {
        return (150, 150, 150);
    }
    let cold = (59.0, 76.0, 192.0);
    let mid = (221.0, 221.0, 221.0);
    let warm = (180.0, 4.0, 38.0);

    let lerp = |a: (f64, f64, f64), b: (f64, f64, f64), t: f64| {
        (
            (a.0 + (b.0 - a.0) * t) as u8,
            (a.1 + (b.1 - a.1) * t) as u8,
            (a.2 + (b.2 - a.2) * t) as u8,
        )
    };

    let r = r.clamp(-1.0, 1.0);
    if r < 0.0 {
        lerp(mid, cold, -r)
    } else {
        lerp(mid, warm, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_the_range_and_count_everything() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 9.9, 10.0];
        let bins = bin_values(&values, 10);

        assert_eq!(bins.len(), 10);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[9].end, 10.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        // The max value lands in the last (closed) bin.
        assert_eq!(bins[9].count, 2);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let bins = bin_values(&[3.0, 3.0, 3.0], 10);
        assert_eq!(bins[0].start, 2.5);
        assert_eq!(bins[9].end, 3.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn no_values_means_no_bins() {
        assert!(bin_values(&[], 10).is_empty());
    }

    #[test]
    fn pie_slices_sorted_by_count_then_label() {
        let labels: Vec<String> = ["NY", "LA", "NY", "SF"].iter().map(|s| s.to_string()).collect();
        let figure = ChartFigure::pie("city", &labels);

        let ChartFigure::Pie { slices, .. } = figure else {
            panic!("expected pie figure");
        };
        assert_eq!(
            slices,
            vec![
                PieSlice { label: "NY".into(), count: 2 },
                PieSlice { label: "LA".into(), count: 1 },
                PieSlice { label: "SF".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn heatmap_needs_two_numeric_columns() {
        let one = vec![("age".to_string(), vec![1.0, 2.0])];
        assert!(matches!(
            ChartFigure::correlation_heatmap(one),
            Err(ChartError::InsufficientData)
        ));

        let two = vec![
            ("age".to_string(), vec![1.0, 2.0, 3.0]),
            ("income".to_string(), vec![2.0, 4.0, 6.0]),
        ];
        let figure = ChartFigure::correlation_heatmap(two).unwrap();
        let ChartFigure::Heatmap { columns, matrix } = figure else {
            panic!("expected heatmap figure");
        };
        assert_eq!(columns, vec!["age", "income"]);
        assert!((matrix[0][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn titles_name_the_selected_columns() {
        assert_eq!(
            ChartFigure::histogram("age", &[1.0]).title(),
            "age - Histogram"
        );
        assert_eq!(
            ChartFigure::scatter("a", "b", Vec::new()).title(),
            "a vs b - Scatter Plot"
        );
    }

    #[test]
    fn correlation_colors_diverge() {
        assert_eq!(correlation_rgb(1.0), (180, 4, 38));
        assert_eq!(correlation_rgb(-1.0), (59, 76, 192));
        assert_eq!(correlation_rgb(0.0), (221, 221, 221));
        assert_eq!(correlation_rgb(f64::NAN), (150, 150, 150));
    }
}
