//! Ordinary least squares with an intercept.
//!
//! Features and labels are centred, the centred system is solved with an SVD
//! and the intercept is recovered from the means. Singular values below a
//! relative cutoff are treated as zero, which gives the minimum-norm solution
//! for rank-deficient systems (for example a single training sample, where
//! every coefficient is zero and the intercept is the label).

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

use super::features::{FeatureVector, FEATURE_COUNT};

/// Fitted linear model `y = intercept + coefficients · x`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearRegression {
    /// Fit on `features` (one row per sample) against `labels`
    pub fn fit(features: &[FeatureVector], labels: &[f64]) -> Result<Self> {
        if features.is_empty() {
            return Err(Error::Training("no samples to fit".to_string()));
        }
        if features.len() != labels.len() {
            return Err(Error::Training(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let n = features.len();
        let x = DMatrix::from_fn(n, FEATURE_COUNT, |r, c| features[r][c]);
        let y = DVector::from_column_slice(labels);

        let x_mean: Vec<f64> = (0..FEATURE_COUNT).map(|c| x.column(c).mean()).collect();
        let y_mean = y.mean();

        let x_centred = DMatrix::from_fn(n, FEATURE_COUNT, |r, c| x[(r, c)] - x_mean[c]);
        let y_centred = y.map(|v| v - y_mean);

        let beta = solve_least_squares(x_centred, &y_centred)?;

        let mut coefficients = [0.0; FEATURE_COUNT];
        for (c, b) in coefficients.iter_mut().zip(beta.iter()) {
            *c = *b;
        }
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(b, m)| b * m)
                .sum::<f64>();

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::Training("regression produced non-finite weights".to_string()));
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_weights(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(b, x)| b * x)
                .sum::<f64>()
    }

    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Minimum-norm least squares solve through an SVD
fn solve_least_squares(x: DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>> {
    let (rows, cols) = x.shape();
    let svd = x.svd(true, true);

    let max_singular = svd.singular_values.iter().cloned().fold(0.0, f64::max);
    let cutoff = (max_singular * f64::EPSILON * rows.max(cols) as f64).max(f64::MIN_POSITIVE);

    svd.solve(y, cutoff)
        .map_err(|e| Error::Training(format!("least squares solve failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[f64]) -> FeatureVector {
        let mut r = [0.0; FEATURE_COUNT];
        r[..values.len()].copy_from_slice(values);
        r
    }

    #[test]
    fn test_recovers_exact_linear_relation() {
        // y = 2 + 3*x0 - x1 with noise-free labels fits exactly
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..12 {
            let x0 = i as f64;
            let x1 = ((i * 7) % 5) as f64;
            let mut r = row(&[x0, x1]);
            for (k, slot) in r.iter_mut().enumerate().skip(2) {
                *slot = ((i * (k + 3)) % 11) as f64;
            }
            features.push(r);
            labels.push(2.0 + 3.0 * x0 - x1);
        }

        let model = LinearRegression::fit(&features, &labels).unwrap();
        for (f, y) in features.iter().zip(&labels) {
            assert!((model.predict(f) - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_sample_predicts_its_label() {
        let features = vec![row(&[10.0, 20.0, 10.0, 20.0, 10.0, 20.0, 10.0, 0.0, 8.0])];
        let model = LinearRegression::fit(&features, &[30.0]).unwrap();

        assert!(model.coefficients().iter().all(|c| c.abs() < 1e-12));
        assert!((model.intercept() - 30.0).abs() < 1e-12);
        assert!((model.predict(&row(&[1.0, 2.0, 3.0])) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_empty_and_mismatched_input() {
        assert!(matches!(
            LinearRegression::fit(&[], &[]),
            Err(Error::Training(_))
        ));
        assert!(matches!(
            LinearRegression::fit(&[row(&[1.0])], &[1.0, 2.0]),
            Err(Error::Training(_))
        ));
    }
}
