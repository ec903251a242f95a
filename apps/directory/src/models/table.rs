//! Tabular upload data after parsing.
//!
//! A `Table` keeps columns and rows positionally aligned: `rows[r][c]` is the
//! raw value of column `c` in row `r`, `None` when the cell was missing.

/// Parsed upload: ordered, unique column names and ordered rows of raw cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// One non-empty field of a row, in original column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub column: &'a str,
    pub value: String,
}

/// A cleaned row: trimmed values, empty and `nan` cells filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record<'a> {
    pub fields: Vec<Field<'a>>,
}

impl Table {
    /// Builds a table. Rows shorter than the header are padded with `None`,
    /// longer rows are truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Removes every column whose cells are `None` in all rows.
    ///
    /// With zero rows every column counts as empty. Returns the dropped names.
    pub fn drop_empty_columns(&mut self) -> Vec<String> {
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|c| self.rows.iter().any(|row| row[c].is_some()))
            .collect();

        let mut dropped = Vec::new();
        let mut kept_columns = Vec::with_capacity(self.columns.len());
        for (column, keep) in self.columns.drain(..).zip(&keep) {
            if *keep {
                kept_columns.push(column);
            } else {
                dropped.push(column);
            }
        }
        self.columns = kept_columns;

        for row in &mut self.rows {
            let mut c = 0;
            row.retain(|_| {
                let k = keep[c];
                c += 1;
                k
            });
        }

        dropped
    }

    /// Builds the `Record` for row `index` (0-based).
    pub fn record(&self, index: usize) -> Record<'_> {
        let fields = self
            .columns
            .iter()
            .zip(&self.rows[index])
            .filter_map(|(column, cell)| {
                let value = cell.as_deref()?.trim();
                if value.is_empty() || value.eq_ignore_ascii_case("nan") {
                    return None;
                }
                Some(Field {
                    column: column.as_str(),
                    value: value.to_string(),
                })
            })
            .collect();
        Record { fields }
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        (0..self.rows.len()).map(move |i| self.record(i))
    }
}

impl Record<'_> {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
