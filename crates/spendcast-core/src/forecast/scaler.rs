//! Per-feature standardisation

use super::features::{FeatureVector, FEATURE_COUNT};

/// Zero-mean, unit-variance scaling fit on a sample set
///
/// Uses the population variance. A feature that never varies keeps a scale
/// of 1.0, so it is centred but not divided by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    variance: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Fit on a non-empty sample set
    pub fn fit(samples: &[FeatureVector]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;

        let mut mean = [0.0; FEATURE_COUNT];
        for sample in samples {
            for (m, x) in mean.iter_mut().zip(sample) {
                *m += x;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut variance = [0.0; FEATURE_COUNT];
        for sample in samples {
            for ((v, x), m) in variance.iter_mut().zip(sample).zip(&mean) {
                *v += (x - m).powi(2);
            }
        }
        for v in &mut variance {
            *v /= n;
        }

        let mut scale = [1.0; FEATURE_COUNT];
        for (s, v) in scale.iter_mut().zip(&variance) {
            let std = v.sqrt();
            if std > 10.0 * f64::EPSILON {
                *s = std;
            }
        }

        Some(Self {
            mean,
            variance,
            scale,
        })
    }

    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut scaled = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (features[i] - self.mean[i]) / self.scale[i];
        }
        scaled
    }

    pub fn transform_all(&self, samples: &[FeatureVector]) -> Vec<FeatureVector> {
        samples.iter().map(|s| self.transform(s)).collect()
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn variance(&self) -> &[f64; FEATURE_COUNT] {
        &self.variance
    }
}
