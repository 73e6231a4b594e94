//! Daily spending forecast
//!
//! - `features` - rolling-window feature vectors and training samples
//! - `scaler` - per-feature standardisation
//! - `regression` - least squares fit
//! - `forecaster` - training policy, seven-day projection, average fallback

pub mod features;
pub mod forecaster;
pub mod regression;
pub mod scaler;

pub use features::{FeatureVector, RollingWindow, TrainingSet, FEATURE_COUNT, WINDOW_DAYS};
pub use forecaster::{Forecaster, TrainedModel, TrainingReport};
pub use regression::LinearRegression;
pub use scaler::StandardScaler;
