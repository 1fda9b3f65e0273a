//! Statistical primitives for survey analysis.
//!
//! This crate provides the numeric building blocks used by `canvass-analysis`:
//!
//! - **Descriptive statistics**: mean, median, mode (with multimodal results), range, variance
//! - **Histogram generation**: fixed-width frequency distributions
//! - **Contingency tables**: joint frequency counts, marginals and expected frequencies
//! - **Chi-Square test**: test of independence with p-value and significance
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`contingency`]: Contingency table construction and the chi-square statistic
//! - [`chi_square`]: Chi-square test of independence
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use canvass_stats::descriptive::{DescriptiveStats, Mode};
//!
//! let values = [1.0, 2.0, 2.0, 3.0, 3.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.median, 2.0);
//! assert_eq!(stats.mode, Mode::Multiple(vec![2.0, 3.0]));
//! ```
//!
//! ## Testing independence
//!
//! ```
//! use canvass_stats::{chi_square::ChiSquareTest, contingency::ContingencyTable};
//!
//! let table = ContingencyTable::from_rows(&[[10_u64, 0], [0, 10]]).unwrap();
//! let test = ChiSquareTest::from_table(&table);
//! assert_eq!(test.statistic, 20.0);
//! assert_eq!(test.degrees_of_freedom, 1);
//! assert!(test.is_significant);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use canvass_stats::histogram::Histogram;
//!
//! let values = [3.0, 12.0, 15.0, 27.0];
//! let histogram = Histogram::with_bin_width(values, 10.0);
//! assert_eq!(histogram.bins.len(), 3);
//! ```

pub mod chi_square;
pub mod contingency;
pub mod descriptive;
pub mod histogram;
