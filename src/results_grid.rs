/// Results Grid Module for hotelsql
///
/// Renders query results as plain tab-separated text: one header line of
/// column names, then one line per row, each cell followed by a tab.

use crate::core::db::QueryResult;

/// Text shown for SQL NULL
pub const NULL_TEXT: &str = "NULL";

/// Represents a row of cells in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub row_index: usize,
}

/// Represents the entire grid structure.
#[derive(Debug, Clone, Default)]
pub struct ResultsGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultsGrid {
    /// Creates a new, empty ResultsGrid.
    pub fn new() -> Self {
        ResultsGrid::default()
    }

    /// Sets the headers for the grid.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        self.headers = headers;
    }

    /// Adds a row to the grid. NULL cells are shown as `NULL`.
    pub fn add_row(&mut self, row: Vec<Option<String>>) {
        let cells = row
            .into_iter()
            .map(|cell| cell.unwrap_or_else(|| NULL_TEXT.to_string()))
            .collect();
        self.rows.push(Row {
            cells,
            row_index: self.rows.len(),
        });
    }

    /// Renders the grid. An empty grid renders as nothing at all, header
    /// included.
    pub fn render(&self) -> String {
        let mut output = String::new();
        if self.rows.is_empty() {
            return output;
        }
        push_line(&mut output, &self.headers);
        for row in &self.rows {
            push_line(&mut output, &row.cells);
        }
        output
    }
}

fn push_line(output: &mut String, cells: &[String]) {
    for cell in cells {
        output.push_str(cell);
        output.push('\t');
    }
    output.push('\n');
}

impl From<&QueryResult> for ResultsGrid {
    fn from(result: &QueryResult) -> Self {
        let mut grid = ResultsGrid::new();
        grid.set_headers(result.columns.clone());
        for row in &result.rows {
            grid.add_row(row.clone());
        }
        grid
    }
}
