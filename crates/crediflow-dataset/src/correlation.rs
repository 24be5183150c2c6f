//! Pearson correlation matrix over the numeric columns.

use serde::Serialize;

use crate::Column;

/// Square, symmetric matrix with the column names on both axes.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Pairwise-complete Pearson r between every pair of numeric columns.
    /// The diagonal is 1.0; a zero-variance column is NaN against every
    /// other column.
    pub fn from_columns(columns: &[&Column]) -> Self {
        let labels: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];

        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson(
                    columns[i].numeric_cells().unwrap_or(&[]),
                    columns[j].numeric_cells().unwrap_or(&[]),
                );
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Pearson r over rows where both cells are present. NaN when fewer than
/// two complete pairs exist or either side has zero variance.
fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;

    #[test]
    fn test_diagonal_is_one() {
        let csv = "A,B\n1,10\n2,8\n3,9\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        let m = ds.correlation_matrix();
        assert_eq!(m.labels(), &["A".to_string(), "B".to_string()]);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
    }

    #[test]
    fn test_perfect_linear_correlation() {
        let csv = "A,B,C\n1,2,-1\n2,4,-2\n3,6,-3\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        let m = ds.correlation_matrix();
        assert!((m.get(0, 1) - 1.0).abs() < 1e-12); // B = 2A
        assert!((m.get(0, 2) + 1.0).abs() < 1e-12); // C = -A
        assert_eq!(m.get(0, 1), m.get(1, 0)); // symmetric
    }

    #[test]
    fn test_zero_variance_column_is_nan_off_diagonal() {
        let csv = "A,B\n1,5\n2,5\n3,5\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        let m = ds.correlation_matrix();
        assert!(m.get(0, 1).is_nan());
        assert_eq!(m.get(1, 1), 1.0);
    }

    #[test]
    fn test_missing_cells_use_pairwise_complete_rows() {
        // Row 2's A is missing, so only rows 1 and 3 pair up: perfect r.
        let csv = "A,B\n1,2\n,100\n3,6\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        let m = ds.correlation_matrix();
        assert!((m.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_numeric_columns_gives_empty_matrix() {
        let csv = "Name,Color\nalice,red\nbob,blue\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        let m = ds.correlation_matrix();
        assert!(m.is_empty());
    }
}
