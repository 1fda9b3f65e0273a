use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF as _};

use crate::contingency::ContingencyTable;

/// p-values strictly below this level are statistically significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Outcome of a chi-square test of independence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChiSquareTest {
    /// Pearson's chi-square statistic.
    pub statistic: f64,
    /// Degrees of freedom of the reference distribution.
    pub degrees_of_freedom: usize,
    /// Probability of a statistic at least this large under independence.
    pub p_value: f64,
    /// Whether `p_value < SIGNIFICANCE_LEVEL`.
    pub is_significant: bool,
}

impl ChiSquareTest {
    /// Runs the test on an observed contingency table.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_stats::{chi_square::ChiSquareTest, contingency::ContingencyTable};
    /// let table = ContingencyTable::from_rows(&[[5_u64, 5], [5, 5]]).unwrap();
    /// let test = ChiSquareTest::from_table(&table);
    /// assert_eq!(test.statistic, 0.0);
    /// assert_eq!(test.p_value, 1.0);
    /// assert!(!test.is_significant);
    /// ```
    #[must_use]
    pub fn from_table(table: &ContingencyTable) -> Self {
        Self::from_statistic(table.chi_square_statistic(), table.degrees_of_freedom())
    }

    /// Builds the test outcome from an already computed statistic.
    #[must_use]
    pub fn from_statistic(statistic: f64, degrees_of_freedom: usize) -> Self {
        let p_value = p_value(statistic, degrees_of_freedom);
        Self {
            statistic,
            degrees_of_freedom,
            p_value,
            is_significant: p_value < SIGNIFICANCE_LEVEL,
        }
    }
}

/// Upper-tail probability `1 − CDF(statistic)` of the chi-square distribution.
///
/// With zero degrees of freedom no deviation is possible and the p-value is 1.
///
/// # Examples
///
/// ```
/// # use canvass_stats::chi_square::p_value;
/// assert!((p_value(3.841, 1) - 0.05).abs() < 1e-3);
/// assert_eq!(p_value(12.0, 0), 1.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn p_value(statistic: f64, degrees_of_freedom: usize) -> f64 {
    if degrees_of_freedom == 0 || statistic <= 0.0 {
        return 1.0;
    }
    match ChiSquared::new(degrees_of_freedom as f64) {
        Ok(distribution) => distribution.sf(statistic).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_table_values() {
        // Critical values at the 5% level
        assert_close(p_value(3.841, 1), 0.05, 1e-4);
        assert_close(p_value(5.991, 2), 0.05, 1e-4);
        assert_close(p_value(12.592, 6), 0.05, 1e-4);
        // Critical values at the 1% level
        assert_close(p_value(6.635, 1), 0.01, 1e-4);
        assert_close(p_value(9.210, 2), 0.01, 1e-4);
    }

    #[test]
    fn test_two_degrees_of_freedom_closed_form() {
        // For df = 2 the survival function is exp(-x / 2)
        for x in [0.5, 1.0, 4.0, 10.0] {
            assert_close(p_value(x, 2), (-x / 2.0_f64).exp(), 1e-10);
        }
    }

    #[test]
    fn test_zero_statistic() {
        assert_eq!(p_value(0.0, 1), 1.0);
        assert_eq!(p_value(0.0, 6), 1.0);
    }

    #[test]
    fn test_zero_degrees_of_freedom() {
        let test = ChiSquareTest::from_statistic(25.0, 0);
        assert_eq!(test.p_value, 1.0);
        assert!(!test.is_significant);
    }

    #[test]
    fn test_perfect_association() {
        let table = ContingencyTable::from_rows(&[[10_u64, 0], [0, 10]]).unwrap();
        let test = ChiSquareTest::from_table(&table);
        assert_close(test.statistic, 20.0, 1e-12);
        assert_eq!(test.degrees_of_freedom, 1);
        assert_close(test.p_value, 7.744e-6, 1e-8);
        assert!(test.is_significant);
    }

    #[test]
    fn test_threshold_is_strict() {
        let below = ChiSquareTest::from_statistic(3.85, 1);
        let above = ChiSquareTest::from_statistic(3.83, 1);
        assert!(below.is_significant);
        assert!(!above.is_significant);
    }

    #[test]
    fn test_serialize_field_names() {
        let test = ChiSquareTest::from_statistic(0.0, 1);
        let json = serde_json::to_value(test).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "statistic": 0.0,
                "degreesOfFreedom": 1,
                "pValue": 1.0,
                "isSignificant": false
            })
        );
    }
}
