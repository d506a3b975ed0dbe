//! Binomial coefficients and dense grids shared by the time-multiplexing
//! model.
//!
//! The coefficient is evaluated through the log-gamma function,
//! Γ(n+1)/(Γ(k+1)Γ(n−k+1)), rather than integer factorials: the
//! time-multiplexing sums evaluate it over whole (k, l) grids, and the
//! factorials of the largest rows overflow long before their ratios do.

use statrs::function::gamma::ln_gamma;

/// Binomial coefficient n-choose-k for real arguments.
///
/// Returns 0 outside 0 ≤ k ≤ n, which the triangular sums rely on to mask
/// entries above the diagonal.
pub fn binomial_coefficient(n: f64, k: f64) -> f64 {
    if n < 0.0 || k < 0.0 || k > n {
        return 0.0;
    }
    (ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0)).exp()
}

/// Dense row-major matrix of f64 values, stored flat.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// All-zero grid with the given dimensions.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Sum each row, collapsing the grid to a vector of length `rows`.
    pub fn row_sums(&self) -> Vec<f64> {
        self.data
            .chunks(self.cols)
            .map(|row| row.iter().sum())
            .collect()
    }

    /// Contract a length-`rows` weight vector against the grid:
    /// out[j] = Σ_i weights[i] · grid[i][j].
    pub fn contract_rows(&self, weights: &[f64]) -> Vec<f64> {
        assert_eq!(
            weights.len(),
            self.rows,
            "weight vector must match row count"
        );
        let mut out = vec![0.0; self.cols];
        for (row, &w) in self.data.chunks(self.cols).zip(weights) {
            for (acc, &v) in out.iter_mut().zip(row) {
                *acc += w * v;
            }
        }
        out
    }
}
