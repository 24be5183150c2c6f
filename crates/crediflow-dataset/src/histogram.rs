//! Equal-width histogram binning for the column selected on the
//! visualization page.

use crediflow_common::{CrediflowError, Result};
use serde::Serialize;

/// One half-open bin `[lo, hi)`; the last bin is closed so the maximum
/// value is counted.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets over `[min, max]`.
    /// A constant column collapses to a single bin holding every value.
    pub fn build(column: &str, values: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(CrediflowError::Dataset(
                "histogram needs at least one bin".to_string(),
            ));
        }

        if values.is_empty() {
            return Ok(Self {
                column: column.to_string(),
                bins: Vec::new(),
            });
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Ok(Self {
                column: column.to_string(),
                bins: vec![HistogramBin {
                    lo: min,
                    hi: max,
                    count: values.len(),
                }],
            });
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lo: min + width * i as f64,
                hi: min + width * (i + 1) as f64,
                count,
            })
            .collect();

        Ok(Self {
            column: column.to_string(),
            bins,
        })
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_bins_partition_range() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let hist = Histogram::build("Age", &values, 20).unwrap();
        assert_eq!(hist.bins.len(), 20);
        assert_eq!(hist.bins[0].lo, 0.0);
        assert!((hist.bins[19].hi - 99.0).abs() < 1e-9);
        assert_eq!(hist.total_count(), 100);
    }

    #[test]
    fn test_boundary_value_goes_to_upper_bin_and_max_to_last() {
        // Bins are half-open, so 5.0 belongs to [5, 10]; the max itself
        // stays in the last bin instead of overflowing.
        let hist = Histogram::build("x", &[0.0, 5.0, 10.0], 2).unwrap();
        assert_eq!(hist.bins[0].count, 1); // 0.0
        assert_eq!(hist.bins[1].count, 2); // 5.0 and 10.0
    }

    #[test]
    fn test_constant_column_single_bin() {
        let hist = Histogram::build("x", &[3.0, 3.0, 3.0], 20).unwrap();
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].count, 3);
        assert_eq!(hist.bins[0].lo, 3.0);
        assert_eq!(hist.bins[0].hi, 3.0);
    }

    #[test]
    fn test_empty_values_empty_histogram() {
        let hist = Histogram::build("x", &[], 20).unwrap();
        assert!(hist.bins.is_empty());
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(Histogram::build("x", &[1.0], 0).is_err());
    }
}
