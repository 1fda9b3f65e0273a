use std::ops::Range;

use serde::Serialize;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range into fixed-width bins aligned to
/// multiples of the bin width and counts the values falling into each bin.
/// Only bins that received at least one value are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The non-empty bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
///
/// Each bin represents a range of values and the count of data points falling within that range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with fixed-width bins from unsorted values.
    ///
    /// Bin `k` covers `[k * bin_width, (k + 1) * bin_width)`. Non-finite
    /// values are skipped.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from. Will be sorted internally.
    /// * `bin_width` - The width of every bin. Must be positive.
    ///
    /// # Panics
    ///
    /// Panics if `bin_width` is not a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_stats::histogram::Histogram;
    /// let values = [5.0, 12.0, 18.0, 41.0];
    /// let histogram = Histogram::with_bin_width(values, 10.0);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [1, 2, 1]);
    /// assert_eq!(histogram.bins[2].range, 40.0..50.0);
    /// ```
    #[must_use]
    pub fn with_bin_width<I>(values: I, bin_width: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted_with_bin_width(&sorted, bin_width)
    }

    /// Creates a histogram with fixed-width bins from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `bin_width` is not a positive finite number, or if
    /// `sorted_values` is not sorted in ascending order.
    #[expect(clippy::float_cmp)]
    #[must_use]
    pub fn from_sorted_with_bin_width(sorted_values: &[f64], bin_width: f64) -> Self {
        assert!(
            bin_width.is_finite() && bin_width > 0.0,
            "bin width must be a positive finite number"
        );
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let mut bins: Vec<HistogramBin> = vec![];
        for &value in sorted_values {
            let start = (value / bin_width).floor() * bin_width;
            match bins.last_mut() {
                Some(bin) if bin.range.start == start => bin.count += 1,
                _ => bins.push(HistogramBin {
                    range: start..start + bin_width,
                    count: 1,
                }),
            }
        }

        Self { bins }
    }

    /// Returns the total number of values counted in the histogram.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let histogram = Histogram::with_bin_width([], 10.0);
        assert!(histogram.bins.is_empty());
        assert_eq!(histogram.total_count(), 0);
    }

    #[test]
    fn test_bins_are_aligned_to_width() {
        let histogram = Histogram::with_bin_width([29.0, 20.0, 30.0, 0.0, 9.99], 10.0);
        let ranges = histogram
            .bins
            .iter()
            .map(|b| (b.range.start, b.count))
            .collect::<Vec<_>>();
        assert_eq!(ranges, [(0.0, 2), (20.0, 2), (30.0, 1)]);
    }

    #[test]
    fn test_negative_values() {
        let histogram = Histogram::with_bin_width([-1.0, -10.0, -10.5], 10.0);
        let starts = histogram
            .bins
            .iter()
            .map(|b| b.range.start)
            .collect::<Vec<_>>();
        assert_eq!(starts, [-20.0, -10.0]);
        assert_eq!(histogram.bins[1].count, 2);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let histogram = Histogram::with_bin_width([f64::INFINITY, 1.0, f64::NAN], 10.0);
        assert_eq!(histogram.total_count(), 1);
    }

    #[test]
    #[should_panic(expected = "bin width")]
    fn test_zero_width_panics() {
        let _ = Histogram::with_bin_width([1.0], 0.0);
    }
}
