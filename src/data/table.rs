//! In-memory table model and CSV parsing.
//!
//! A [`Table`] is an ordered collection of named, typed columns loaded once from
//! a CSV file with a header row. Column types are inferred from the raw cell
//! text: a column is numeric when every non-empty cell parses as a float and at
//! least one such cell exists, otherwise it is categorical.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data::error::{DataError, DataResult};

/// Values of one column, homogeneous after type inference.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Missing cells are stored as NaN so row alignment is preserved.
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

/// A single named column.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }
}

/// The full in-memory dataset. Rectangular and immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// Load a table from a CSV file at `path`.
    pub fn from_path(path: &Path) -> DataResult<Table> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a table from any reader. The first row supplies column names;
    /// ragged rows are rejected by the CSV reader and surfaced as a parse error.
    pub fn from_reader<R: Read>(reader: R) -> DataResult<Table> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(DataError::NoColumns);
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in rdr.records() {
            let record = record?;
            for (i, field) in record.iter().enumerate() {
                cells[i].push(field.to_string());
            }
        }

        let height = cells.first().map_or(0, Vec::len);
        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| {
                let data = if is_numeric_column(&raw) {
                    ColumnData::Numeric(
                        raw.iter()
                            .map(|c| parse_numeric(c).unwrap_or(f64::NAN))
                            .collect(),
                    )
                } else {
                    ColumnData::Categorical(raw)
                };
                Column { name, data }
            })
            .collect();

        Ok(Table { columns, height })
    }

    /// Number of rows shared by every column.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Parse one cell as a number. Empty cells are treated as missing.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Pure type-inference predicate over the raw cell text of one column:
/// numeric iff all non-empty cells parse as floats and at least one exists.
pub fn is_numeric_column(raw: &[String]) -> bool {
    let mut saw_value = false;
    for cell in raw {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.parse::<f64>().is_err() {
            return false;
        }
        saw_value = true;
    }
    saw_value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_csv() {
        let content = "name,age\nAlice,30\nBob,25\n";
        let table = Table::from_reader(content.as_bytes()).unwrap();

        assert_eq!(table.height(), 2);
        assert_eq!(table.column_names(), vec!["name", "age"]);
        assert!(!table.column("name").unwrap().is_numeric());
        assert!(table.column("age").unwrap().is_numeric());
    }

    #[test]
    fn infers_float_columns() {
        let content = "score\n95.5\n87.0\n-3e2\n";
        let table = Table::from_reader(content.as_bytes()).unwrap();

        match table.column("score").unwrap().data() {
            ColumnData::Numeric(values) => assert_eq!(values, &[95.5, 87.0, -300.0]),
            other => panic!("expected numeric column, got {other:?}"),
        }
    }

    #[test]
    fn mixed_column_is_categorical() {
        let content = "v\n1\ntwo\n3\n";
        let table = Table::from_reader(content.as_bytes()).unwrap();
        assert!(!table.column("v").unwrap().is_numeric());
    }

    #[test]
    fn empty_cells_in_numeric_column_become_nan() {
        let content = "v\n1.5\n\n2.5\n";
        let table = Table::from_reader(content.as_bytes()).unwrap();
        match table.column("v").unwrap().data() {
            ColumnData::Numeric(values) => {
                assert_eq!(values.len(), 3);
                assert!(values[1].is_nan());
            }
            other => panic!("expected numeric column, got {other:?}"),
        }
    }

    #[test]
    fn all_blank_column_is_categorical() {
        let content = "a,b\n1,\n2,\n";
        let table = Table::from_reader(content.as_bytes()).unwrap();
        assert!(!table.column("b").unwrap().is_numeric());
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let content = "name,note\n\"Doe, John\",\"says \"\"hi\"\"\"\n";
        let table = Table::from_reader(content.as_bytes()).unwrap();
        match table.column("name").unwrap().data() {
            ColumnData::Categorical(values) => assert_eq!(values[0], "Doe, John"),
            other => panic!("expected categorical column, got {other:?}"),
        }
    }

    #[test]
    fn ragged_rows_fail() {
        let content = "a,b\n1,2\n3\n";
        let err = Table::from_reader(content.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn header_only_csv_is_an_empty_table() {
        let content = "a,b\n";
        let table = Table::from_reader(content.as_bytes()).unwrap();
        assert_eq!(table.height(), 0);
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn numeric_predicate_is_pure_over_raw_cells() {
        let numeric: Vec<String> = ["1", " 2.5 ", "", "-7"].iter().map(|s| s.to_string()).collect();
        let text: Vec<String> = ["1", "x"].iter().map(|s| s.to_string()).collect();
        let blanks: Vec<String> = ["", " "].iter().map(|s| s.to_string()).collect();

        assert!(is_numeric_column(&numeric));
        assert!(!is_numeric_column(&text));
        assert!(!is_numeric_column(&blanks));
    }
}
