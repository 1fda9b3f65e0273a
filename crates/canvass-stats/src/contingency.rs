use serde::Serialize;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ContingencyTableError {
    #[display("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Observed joint-frequency counts of two categorical variables.
///
/// Rows index the categories of the first variable, columns the categories of
/// the second. The dimensions are fixed at construction and may be zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<Vec<u64>>")]
pub struct ContingencyTable {
    num_rows: usize,
    num_cols: usize,
    /// Row-major counts.
    counts: Vec<u64>,
}

impl From<ContingencyTable> for Vec<Vec<u64>> {
    fn from(table: ContingencyTable) -> Self {
        table.rows().map(<[u64]>::to_vec).collect()
    }
}

impl ContingencyTable {
    /// Creates a table of zero counts.
    #[must_use]
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            counts: vec![0; num_rows * num_cols],
        }
    }

    /// Creates a table from rows of observed counts.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_stats::contingency::ContingencyTable;
    /// let table = ContingencyTable::from_rows(&[[3_u64, 1, 0], [2, 2, 4]]).unwrap();
    /// assert_eq!(table.num_rows(), 2);
    /// assert_eq!(table.num_cols(), 3);
    /// assert_eq!(table.row_totals(), [4, 8]);
    /// assert_eq!(table.col_totals(), [5, 3, 4]);
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ContingencyTableError>
    where
        R: AsRef<[u64]>,
    {
        let num_cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut counts = Vec::with_capacity(rows.len() * num_cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != num_cols {
                return Err(ContingencyTableError::RaggedRow {
                    row: i,
                    expected: num_cols,
                    actual: row.len(),
                });
            }
            counts.extend_from_slice(row);
        }
        Ok(Self {
            num_rows: rows.len(),
            num_cols,
            counts,
        })
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the observed count of a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.counts[self.index(row, col)]
    }

    /// Records one more observation in a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    pub fn increment(&mut self, row: usize, col: usize) {
        let index = self.index(row, col);
        self.counts[index] += 1;
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "cell ({row}, {col}) out of bounds for {}x{} table",
            self.num_rows,
            self.num_cols
        );
        row * self.num_cols + col
    }

    /// Returns an iterator over the rows of observed counts.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        (0..self.num_rows).map(|row| &self.counts[row * self.num_cols..(row + 1) * self.num_cols])
    }

    #[must_use]
    pub fn row_totals(&self) -> Vec<u64> {
        self.rows().map(|row| row.iter().sum()).collect()
    }

    #[must_use]
    pub fn col_totals(&self) -> Vec<u64> {
        (0..self.num_cols)
            .map(|col| self.rows().map(|row| row[col]).sum())
            .collect()
    }

    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Computes the expected frequency of every cell under independence.
    ///
    /// `E[i][j] = rowTotal[i] * colTotal[j] / grandTotal`. When the grand
    /// total is zero every expected frequency is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_stats::contingency::ContingencyTable;
    /// let table = ContingencyTable::from_rows(&[[10_u64, 0], [0, 10]]).unwrap();
    /// assert_eq!(table.expected_frequencies(), [[5.0, 5.0], [5.0, 5.0]]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn expected_frequencies(&self) -> Vec<Vec<f64>> {
        let row_totals = self.row_totals();
        let col_totals = self.col_totals();
        let grand_total = self.grand_total();
        row_totals
            .iter()
            .map(|&row_total| {
                col_totals
                    .iter()
                    .map(|&col_total| {
                        if grand_total == 0 {
                            0.0
                        } else {
                            row_total as f64 * col_total as f64 / grand_total as f64
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Computes Pearson's chi-square statistic `Σ (O − E)² / E`.
    ///
    /// Cells whose expected frequency is zero (an empty row, an empty column,
    /// or an empty table) contribute nothing, so the result is always finite.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_stats::contingency::ContingencyTable;
    /// let table = ContingencyTable::new(2, 2);
    /// assert_eq!(table.chi_square_statistic(), 0.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn chi_square_statistic(&self) -> f64 {
        self.rows()
            .zip(self.expected_frequencies())
            .flat_map(|(observed, expected)| observed.iter().copied().zip(expected))
            .filter(|(_, expected)| *expected > 0.0)
            .map(|(observed, expected)| (observed as f64 - expected).powi(2) / expected)
            .sum()
    }

    /// Degrees of freedom of the table, `(rows − 1) × (cols − 1)`.
    ///
    /// Computed from the table dimensions, not from the rows and columns that
    /// actually received observations. Zero when either dimension is at most one.
    #[must_use]
    pub fn degrees_of_freedom(&self) -> usize {
        self.num_rows.saturating_sub(1) * self.num_cols.saturating_sub(1)
    }
}
