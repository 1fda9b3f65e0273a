use std::{cmp::Ordering, slice};

use serde::Serialize;

/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency, dispersion,
/// and spread for a dataset of `f64` values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    ///
    /// For an even number of values this is the average of the two middle values.
    pub median: f64,
    /// The most frequent value, or every value tied for the highest frequency.
    pub mode: Mode,
    /// The minimum and maximum values in the dataset.
    pub range: ValueRange,
    /// The population variance of the dataset.
    pub variance: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
}

/// The smallest and largest value of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    /// The smallest value.
    pub min: f64,
    /// The largest value.
    pub max: f64,
}

/// The mode of a dataset.
///
/// Serialized as a bare number for a single mode and as an array when several
/// values share the highest frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Mode {
    /// Exactly one value has the highest frequency.
    Single(f64),
    /// Several values share the highest frequency, in ascending order.
    Multiple(Vec<f64>),
}

impl Mode {
    /// Returns the modal values in ascending order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Single(value) => slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }

    #[must_use]
    pub fn is_multimodal(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    /// `NaN` values are ignored.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values. The values will be collected and sorted internally.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_stats::descriptive::{DescriptiveStats, Mode};
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0, 4.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.range.min, 1.0);
    /// assert_eq!(stats.range.max, 5.0);
    /// assert_eq!(stats.median, 3.5);
    /// assert_eq!(stats.mode, Mode::Single(4.0));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step.
    /// Use this when you already have sorted data to avoid unnecessary work.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order or contains `NaN`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_stats::descriptive::DescriptiveStats;
    /// let mut values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// values.sort_by(f64::total_cmp);
    /// let stats = DescriptiveStats::from_sorted(&values).unwrap();
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;

        // Shifting by `min` keeps the mean of identical values exact
        let shifted_sum = sorted_values.iter().map(|v| v - min).sum::<f64>();
        let mean = if shifted_sum.is_finite() {
            (min + shifted_sum / n).clamp(min, max)
        } else {
            // `max - min` overflows for values of opposite sign near `f64::MAX`
            sorted_values.iter().sum::<f64>() / n
        };
        let median = median_of_sorted(sorted_values);
        let mode = mode_of_sorted(sorted_values);
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            mean,
            median,
            mode,
            range: ValueRange { min, max },
            variance,
            std_dev,
        })
    }
}

fn median_of_sorted(sorted_values: &[f64]) -> f64 {
    let mid = sorted_values.len() / 2;
    if sorted_values.len() % 2 == 0 {
        (sorted_values[mid - 1] + sorted_values[mid]) / 2.0
    } else {
        sorted_values[mid]
    }
}

#[expect(clippy::float_cmp)]
fn mode_of_sorted(sorted_values: &[f64]) -> Mode {
    let mut best_count = 0;
    let mut modes = vec![];
    for run in sorted_values.chunk_by(|a, b| a == b) {
        match run.len().cmp(&best_count) {
            Ordering::Greater => {
                best_count = run.len();
                modes.clear();
                modes.push(run[0]);
            }
            Ordering::Equal => modes.push(run[0]),
            Ordering::Less => {}
        }
    }
    match modes.as_slice() {
        [single] => Mode::Single(*single),
        _ => Mode::Multiple(modes),
    }
}
