//! Data Handler: single source of truth for the loaded dataset and the active
//! range filter.
//!
//! Owns the [`Table`] and the filtered view (a vector of row indices into the
//! full table). Loading a new file replaces both; applying a filter recomputes
//! the view from the full table, so a new filter replaces any previous one
//! instead of intersecting with it.

use std::path::Path;

use crate::data::error::{DataError, DataResult};
use crate::data::table::{Column, ColumnData, Table};
use crate::stats::{self, SummaryStats};

#[derive(Default)]
pub struct DataHandler {
    table: Option<Table>,
    view: Vec<usize>,
}

impl DataHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Load a CSV file, replacing any previously loaded table entirely and
    /// resetting the view to the full table (no filter active).
    pub fn load(&mut self, path: &Path) -> DataResult<()> {
        let table = Table::from_path(path)?;
        log::info!(
            "loaded {:?}: {} rows, {} columns",
            path,
            table.height(),
            table.columns().len()
        );
        self.view = (0..table.height()).collect();
        self.table = Some(table);
        Ok(())
    }

    /// Row count of the full table (0 when nothing is loaded).
    pub fn row_count(&self) -> usize {
        self.table.as_ref().map_or(0, Table::height)
    }

    /// Row count of the current filtered view.
    pub fn view_row_count(&self) -> usize {
        self.view.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.table.as_ref().map(Table::column_names).unwrap_or_default()
    }

    /// Names of all numeric columns, in table column order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.classified_columns(true)
    }

    /// Names of all categorical columns, in table column order.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.classified_columns(false)
    }

    fn classified_columns(&self, numeric: bool) -> Vec<String> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        table
            .columns()
            .iter()
            .filter(|c| c.is_numeric() == numeric)
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Replace the view with the rows of the full table whose value in
    /// `column` lies in `[min, max]` inclusive. NaN cells never match, and
    /// `min > max` yields an empty view. On error the previous view is kept.
    pub fn filter_by_range(&mut self, column: &str, min: f64, max: f64) -> DataResult<()> {
        let values = self.numeric_column(column)?;
        let view: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v >= min && v <= max)
            .map(|(i, _)| i)
            .collect();
        log::info!(
            "filter {column} in [{min}, {max}]: {} of {} rows",
            view.len(),
            values.len()
        );
        self.view = view;
        Ok(())
    }

    /// Descriptive statistics for `column` over the current view. An empty
    /// view yields count 0 with all other fields NaN.
    pub fn stats(&self, column: &str) -> DataResult<SummaryStats> {
        let values = self.numeric_view_values(column)?;
        Ok(stats::summary(&values))
    }

    /// Values of a numeric column restricted to the view, NaN cells dropped.
    pub fn numeric_view_values(&self, column: &str) -> DataResult<Vec<f64>> {
        let values = self.numeric_column(column)?;
        Ok(self
            .view
            .iter()
            .map(|&i| values[i])
            .filter(|v| !v.is_nan())
            .collect())
    }

    /// Row-aligned (x, y) pairs over the view; pairs with a NaN cell on either
    /// side are dropped.
    pub fn numeric_view_pairs(&self, x: &str, y: &str) -> DataResult<Vec<[f64; 2]>> {
        let xs = self.numeric_column(x)?;
        let ys = self.numeric_column(y)?;
        Ok(self
            .view
            .iter()
            .map(|&i| [xs[i], ys[i]])
            .filter(|p| !p[0].is_nan() && !p[1].is_nan())
            .collect())
    }

    /// Cell text of a column restricted to the view, for category counting.
    /// Numeric columns are formatted per cell so any column can feed a pie.
    pub fn view_labels(&self, column: &str) -> DataResult<Vec<String>> {
        let col = self.column(column)?;
        Ok(match col.data() {
            ColumnData::Categorical(values) => {
                self.view.iter().map(|&i| values[i].clone()).collect()
            }
            ColumnData::Numeric(values) => self
                .view
                .iter()
                .map(|&i| values[i])
                .filter(|v| !v.is_nan())
                .map(|v| v.to_string())
                .collect(),
        })
    }

    /// All numeric columns over the view, NaN kept for row alignment.
    /// Input for the correlation heatmap.
    pub fn numeric_view_series(&self) -> Vec<(String, Vec<f64>)> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        table
            .columns()
            .iter()
            .filter_map(|c| match c.data() {
                ColumnData::Numeric(values) => Some((
                    c.name().to_string(),
                    self.view.iter().map(|&i| values[i]).collect(),
                )),
                ColumnData::Categorical(_) => None,
            })
            .collect()
    }

    fn column(&self, name: &str) -> DataResult<&Column> {
        self.table
            .as_ref()
            .and_then(|t| t.column(name))
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    fn numeric_column(&self, name: &str) -> DataResult<&[f64]> {
        match self.column(name)?.data() {
            ColumnData::Numeric(values) => Ok(values),
            ColumnData::Categorical(_) => Err(DataError::NotNumeric(name.to_string())),
        }
    }

    #[cfg(test)]
    pub(crate) fn load_str(&mut self, content: &str) -> DataResult<()> {
        let table = Table::from_reader(content.as_bytes())?;
        self.view = (0..table.height()).collect();
        self.table = Some(table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "age,city\n20,NY\n30,LA\n40,NY\n50,SF\n";

    fn loaded() -> DataHandler {
        let mut handler = DataHandler::new();
        handler.load_str(SAMPLE).unwrap();
        handler
    }

    #[test]
    fn classification_partitions_all_columns() {
        let handler = loaded();
        let numeric = handler.numeric_columns();
        let categorical = handler.categorical_columns();

        assert_eq!(numeric, vec!["age"]);
        assert_eq!(categorical, vec!["city"]);

        let mut all = numeric;
        all.extend(categorical);
        all.sort();
        let mut expected = handler.column_names();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn no_table_means_empty_classification() {
        let handler = DataHandler::new();
        assert!(handler.numeric_columns().is_empty());
        assert!(handler.categorical_columns().is_empty());
        assert_eq!(handler.row_count(), 0);
    }

    #[test]
    fn range_filter_is_exact_and_inclusive() {
        let mut handler = loaded();
        handler.filter_by_range("age", 25.0, 45.0).unwrap();
        assert_eq!(handler.numeric_view_values("age").unwrap(), vec![30.0, 40.0]);

        // Inclusive bounds keep exact endpoint matches.
        handler.filter_by_range("age", 20.0, 50.0).unwrap();
        assert_eq!(handler.view_row_count(), 4);
    }

    #[test]
    fn inverted_bounds_yield_empty_view() {
        let mut handler = loaded();
        handler.filter_by_range("age", 45.0, 25.0).unwrap();
        assert_eq!(handler.view_row_count(), 0);
    }

    #[test]
    fn new_filter_replaces_previous_one() {
        let mut handler = loaded();
        handler.filter_by_range("age", 25.0, 35.0).unwrap();
        assert_eq!(handler.view_row_count(), 1);

        // Recomputed from the full table, not intersected with the 25..35 view.
        handler.filter_by_range("age", 35.0, 55.0).unwrap();
        assert_eq!(handler.numeric_view_values("age").unwrap(), vec![40.0, 50.0]);
    }

    #[test]
    fn scenario_filter_then_stats() {
        let mut handler = loaded();
        handler.filter_by_range("age", 25.0, 45.0).unwrap();

        let stats = handler.stats("age").unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 35.0);
        assert_eq!(stats.min, 30.0);
        assert_eq!(stats.max, 40.0);
    }

    #[test]
    fn scenario_out_of_range_filter_then_stats() {
        let mut handler = loaded();
        handler.filter_by_range("age", 1000.0, 2000.0).unwrap();
        assert_eq!(handler.view_row_count(), 0);

        let stats = handler.stats("age").unwrap();
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn unknown_column_fails_and_keeps_view() {
        let mut handler = loaded();
        handler.filter_by_range("age", 25.0, 45.0).unwrap();

        let err = handler.filter_by_range("salary", 0.0, 1.0).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(_)));
        assert_eq!(handler.numeric_view_values("age").unwrap(), vec![30.0, 40.0]);

        let err = handler.stats("salary").unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(_)));
    }

    #[test]
    fn categorical_column_is_rejected_for_filter_and_stats() {
        let mut handler = loaded();
        let err = handler.filter_by_range("city", 0.0, 1.0).unwrap_err();
        assert!(matches!(err, DataError::NotNumeric(_)));
        assert!(matches!(handler.stats("city"), Err(DataError::NotNumeric(_))));
    }

    #[test]
    fn nan_cells_never_match_a_range() {
        let mut handler = DataHandler::new();
        handler.load_str("v\n1\n\n3\n").unwrap();
        handler.filter_by_range("v", f64::NEG_INFINITY, f64::INFINITY).unwrap();
        assert_eq!(handler.view_row_count(), 2);
    }

    #[test]
    fn pairs_drop_rows_with_missing_cells() {
        let mut handler = DataHandler::new();
        handler.load_str("x,y\n1,10\n2,\n3,30\n").unwrap();
        let pairs = handler.numeric_view_pairs("x", "y").unwrap();
        assert_eq!(pairs, vec![[1.0, 10.0], [3.0, 30.0]]);
    }

    #[test]
    fn view_labels_follow_the_filter() {
        let mut handler = loaded();
        handler.filter_by_range("age", 25.0, 45.0).unwrap();
        assert_eq!(handler.view_labels("city").unwrap(), vec!["LA", "NY"]);
    }

    #[test]
    fn load_replaces_table_and_resets_view() {
        let mut handler = loaded();
        handler.filter_by_range("age", 25.0, 45.0).unwrap();

        handler.load_str("height\n1.6\n1.8\n").unwrap();
        assert_eq!(handler.numeric_columns(), vec!["height"]);
        assert_eq!(handler.view_row_count(), 2);
    }

    #[test]
    fn load_from_disk_and_missing_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{SAMPLE}").unwrap();

        let mut handler = DataHandler::new();
        handler.load(file.path()).unwrap();
        assert_eq!(handler.row_count(), 4);

        let err = handler
            .load(Path::new("/nonexistent/definitely-missing.csv"))
            .unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
        // A failed load keeps the previous table.
        assert_eq!(handler.row_count(), 4);
    }
}
