//! Tokenization of a raw tab-delimited export into an addressable grid.
//!
//! Nothing here is trimmed, typed, or validated; the grid is the unfiltered
//! source of truth that the builders interrogate cell by cell.

/// An ordered sequence of rows, each an ordered sequence of raw cell strings.
#[derive(Debug, Clone)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
}

impl RawGrid {
    /// Splits the document on line breaks, then each line on tab characters.
    pub fn from_text(text: &str) -> Self {
        let rows = text
            .split('\n')
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell accessor that never fails: out-of-range coordinates read as the
    /// empty string, which downstream coercion treats as zero/absent.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Reads `cells[col]`, tolerating short rows the same way [`RawGrid::cell`]
/// does. Row-relative reads in the builders go through this.
pub fn cell_at(cells: &[String], col: usize) -> &str {
    cells.get(col).map(String::as_str).unwrap_or("")
}
