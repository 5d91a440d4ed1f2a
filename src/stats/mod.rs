//! Stats module - descriptive statistics and correlation

mod calculator;

pub use calculator::{correlation_matrix, pearson, percentile, summary, SummaryStats};
