//! Descriptive statistics matching the pandas `describe` contract:
//! sample standard deviation (n−1 denominator) and linearly interpolated
//! quartiles.

use serde::Serialize;

/// count / mean / std / min / 25% / 50% / 75% / max for one numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Compute over non-missing values. An empty slice yields NaN stats
    /// with count 0; a single value yields std 0.0.
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count: 0,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("NaN in numeric column"));

        Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }
}

/// Linear-interpolation quantile over pre-sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_stats() {
        let stats = ColumnStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        // Sample std of this classic sequence is sqrt(32/7)
        assert!((stats.std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_quartiles_interpolate_like_pandas() {
        // pandas: [1,2,3,4].quantile(.25) == 1.75, median == 2.5, .75 == 3.25
        let stats = ColumnStats::from_values(&[1.0, 2.0, 3.0, 4.0]);
        assert!((stats.q25 - 1.75).abs() < 1e-12);
        assert!((stats.median - 2.5).abs() < 1e-12);
        assert!((stats.q75 - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_odd_length_median_is_middle_value() {
        let stats = ColumnStats::from_values(&[3.0, 1.0, 2.0]);
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn test_empty_column_yields_nan_without_panic() {
        let stats = ColumnStats::from_values(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.std.is_nan());
    }

    #[test]
    fn test_single_value_has_zero_std() {
        let stats = ColumnStats::from_values(&[7.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.q25, 7.0);
        assert_eq!(stats.max, 7.0);
    }
}
