//! Seven-day spending forecaster
//!
//! Trains a linear model on rolling windows of daily totals and projects the
//! coming week autoregressively: each day's raw prediction becomes the most
//! recent value in the window for the next day. Whenever the model is missing
//! or the supplied history is too short, the forecast falls back to the
//! average daily spend.

use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::aggregate::{daily_totals, DailyTotals};
use crate::error::{Error, Result};
use crate::models::{ExpenseRecord, Forecast, ForecastMethod, Prediction, FORECAST_DAYS};

use super::features::{build_training_set, feature_vector, RollingWindow, WINDOW_DAYS};
use super::regression::LinearRegression;
use super::scaler::StandardScaler;

/// Scaling parameters and regression weights from one training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    scaler: StandardScaler,
    regression: LinearRegression,
    samples: usize,
}

impl TrainedModel {
    /// Predict the next day's total from a window and the target day
    fn predict_raw(&self, window: &RollingWindow, day: NaiveDate) -> f64 {
        let features = feature_vector(window.values(), day);
        self.regression.predict(&self.scaler.transform(&features))
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn regression(&self) -> &LinearRegression {
        &self.regression
    }

    /// Number of samples the model was fit on
    pub fn samples(&self) -> usize {
        self.samples
    }
}

/// Outcome of a successful training run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingReport {
    pub samples: usize,
    pub distinct_days: usize,
}

/// Daily spending forecaster
///
/// Not synchronised: share one instance per scope and serialise access to
/// `train` if several callers need it.
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    model: Option<TrainedModel>,
}

impl Forecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_ref()
    }

    /// Fit the model on an expense history
    ///
    /// Needs more than seven distinct dates. Any failure discards the
    /// previous model, leaving the forecaster on the average fallback until a
    /// later call succeeds.
    pub fn train(&mut self, expenses: &[ExpenseRecord]) -> Result<TrainingReport> {
        match Self::fit(expenses) {
            Ok((model, report)) => {
                info!(
                    samples = report.samples,
                    distinct_days = report.distinct_days,
                    "Forecast model trained"
                );
                self.model = Some(model);
                Ok(report)
            }
            Err(e) => {
                debug!(error = %e, "Forecast model training failed, using average fallback");
                self.model = None;
                Err(e)
            }
        }
    }

    fn fit(expenses: &[ExpenseRecord]) -> Result<(TrainedModel, TrainingReport)> {
        let daily = daily_totals(expenses);
        let distinct_days = daily.len();

        if distinct_days < WINDOW_DAYS {
            return Err(Error::InsufficientHistory {
                distinct_days,
                required: WINDOW_DAYS + 1,
            });
        }

        let set = build_training_set(&daily);
        if set.is_empty() {
            return Err(Error::NoTrainingSamples { distinct_days });
        }
        debug!(samples = set.len(), "Built training samples");

        let scaler = StandardScaler::fit(&set.features)
            .ok_or_else(|| Error::Training("cannot scale an empty sample set".to_string()))?;
        let regression = LinearRegression::fit(&scaler.transform_all(&set.features), &set.labels)?;

        let model = TrainedModel {
            scaler,
            regression,
            samples: set.len(),
        };
        let report = TrainingReport {
            samples: set.len(),
            distinct_days,
        };
        Ok((model, report))
    }

    /// Forecast today and the following six days
    pub fn predict_next_week(&self, expenses: &[ExpenseRecord]) -> Forecast {
        self.predict_next_week_from(expenses, Local::now().date_naive())
    }

    /// Forecast `today` and the following six days
    pub fn predict_next_week_from(&self, expenses: &[ExpenseRecord], today: NaiveDate) -> Forecast {
        let daily = daily_totals(expenses);

        let Some(model) = self.model.as_ref() else {
            return average_forecast(&daily, today);
        };

        let Some(mut window) = RollingWindow::from_history(&daily) else {
            warn!(
                distinct_days = daily.len(),
                "Trained model given too little history, using average fallback"
            );
            return average_forecast(&daily, today);
        };

        let predictions = forecast_days(today)
            .map(|day| {
                let raw = model.predict_raw(&window, day);
                window.push(raw);
                Prediction {
                    date: day,
                    predicted_amount: raw.max(0.0),
                }
            })
            .collect();

        Forecast::new(ForecastMethod::Model, predictions)
    }
}

fn forecast_days(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..FORECAST_DAYS as i64).map(move |offset| today + Duration::days(offset))
}

/// Average daily spend repeated over the forecast horizon
fn average_forecast(daily: &DailyTotals, today: NaiveDate) -> Forecast {
    let average = if daily.is_empty() {
        0.0
    } else {
        daily.values().sum::<f64>() / daily.len() as f64
    };

    let predictions = forecast_days(today)
        .map(|day| Prediction {
            date: day,
            predicted_amount: average.max(0.0),
        })
        .collect();

    Forecast::new(ForecastMethod::Average, predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::features::FEATURE_COUNT;
    use crate::test_utils::{consecutive_days, date, expense};

    const WEEK_PATTERN: [f64; 8] = [10.0, 20.0, 10.0, 20.0, 10.0, 20.0, 10.0, 30.0];

    #[test]
    fn test_new_forecaster_is_untrained() {
        assert!(!Forecaster::new().is_trained());
    }

    #[test]
    fn test_untrained_empty_history_predicts_zeros() {
        let forecast = Forecaster::new().predict_next_week_from(&[], date(2024, 5, 1));

        assert_eq!(forecast.method, ForecastMethod::Average);
        assert_eq!(forecast.amounts(), vec![0.0; 7]);
        assert_eq!(forecast.total_predicted, 0.0);
    }

    #[test]
    fn test_untrained_uses_average_of_daily_totals() {
        let expenses = vec![
            expense(10.0, "Food", "2024-01-01"),
            expense(20.0, "Food", "2024-01-01"),
            expense(30.0, "Fun", "2024-01-03"),
        ];

        let forecast = Forecaster::new().predict_next_week_from(&expenses, date(2024, 1, 10));
        assert_eq!(forecast.amounts(), vec![30.0; 7]);
    }

    #[test]
    fn test_forecast_dates_start_today() {
        let today = date(2024, 12, 28);
        let forecast = Forecaster::new().predict_next_week_from(&[], today);

        let dates: Vec<_> = forecast.predictions.iter().map(|p| p.date).collect();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], today);
        assert_eq!(dates[6], date(2025, 1, 3));
        assert!(dates.windows(2).all(|w| w[1] - w[0] == Duration::days(1)));
    }

    #[test]
    fn test_train_on_seven_days_fails() {
        let expenses = consecutive_days(date(2024, 1, 1), &WEEK_PATTERN[..7]);
        let mut forecaster = Forecaster::new();

        let err = forecaster.train(&expenses).unwrap_err();
        assert!(matches!(err, Error::NoTrainingSamples { distinct_days: 7 }));
        assert!(!forecaster.is_trained());
    }

    #[test]
    fn test_train_on_short_history_fails() {
        let expenses = consecutive_days(date(2024, 1, 1), &[5.0; 3]);
        let mut forecaster = Forecaster::new();

        assert!(matches!(
            forecaster.train(&expenses),
            Err(Error::InsufficientHistory {
                distinct_days: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_train_on_eight_days_succeeds_with_one_sample() {
        let expenses = consecutive_days(date(2024, 1, 1), &WEEK_PATTERN);
        let mut forecaster = Forecaster::new();

        let report = forecaster.train(&expenses).unwrap();
        assert_eq!(report.samples, 1);
        assert_eq!(report.distinct_days, 8);
        assert!(forecaster.is_trained());
        assert_eq!(forecaster.model().unwrap().samples(), 1);
    }

    #[test]
    fn test_single_sample_model_predicts_label() {
        let expenses = consecutive_days(date(2024, 1, 1), &WEEK_PATTERN);
        let mut forecaster = Forecaster::new();
        forecaster.train(&expenses).unwrap();

        let forecast = forecaster.predict_next_week_from(&expenses, date(2024, 1, 9));
        assert_eq!(forecast.method, ForecastMethod::Model);
        assert_eq!(forecast.predictions.len(), 7);
        for amount in forecast.amounts() {
            assert!((amount - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_failed_training_discards_previous_model() {
        let mut forecaster = Forecaster::new();
        forecaster
            .train(&consecutive_days(date(2024, 1, 1), &WEEK_PATTERN))
            .unwrap();
        assert!(forecaster.is_trained());

        assert!(forecaster
            .train(&consecutive_days(date(2024, 1, 1), &[1.0; 4]))
            .is_err());
        assert!(!forecaster.is_trained());
    }

    #[test]
    fn test_trained_model_with_short_history_falls_back() {
        let mut forecaster = Forecaster::new();
        forecaster
            .train(&consecutive_days(date(2024, 1, 1), &WEEK_PATTERN))
            .unwrap();

        let short = consecutive_days(date(2024, 2, 1), &[4.0, 8.0]);
        let forecast = forecaster.predict_next_week_from(&short, date(2024, 2, 5));
        assert_eq!(forecast.method, ForecastMethod::Average);
        assert_eq!(forecast.amounts(), vec![6.0; 7]);
    }

    fn alternating_model() -> Forecaster {
        // Identity scaling and y = -(previous day), so raw outputs flip sign
        let scaler = StandardScaler::fit(&[[0.0; FEATURE_COUNT]]).unwrap();
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[0] = -1.0;
        Forecaster {
            model: Some(TrainedModel {
                scaler,
                regression: LinearRegression::from_weights(coefficients, 0.0),
                samples: 1,
            }),
        }
    }

    #[test]
    fn test_predictions_are_clamped_non_negative() {
        let expenses = consecutive_days(date(2024, 3, 1), &[20.0; 7]);
        let forecast = alternating_model().predict_next_week_from(&expenses, date(2024, 3, 8));

        assert!(forecast.amounts().iter().all(|a| *a >= 0.0));
        assert_eq!(forecast.amounts()[0], 0.0);
    }

    #[test]
    fn test_raw_prediction_rolls_forward() {
        // Day one predicts -20 (shown as 0). Feeding -20 back gives +20 on
        // day two; feeding the clamped 0 back would give 0 instead.
        let expenses = consecutive_days(date(2024, 3, 1), &[20.0; 7]);
        let forecast = alternating_model().predict_next_week_from(&expenses, date(2024, 3, 8));

        assert_eq!(
            forecast.amounts(),
            vec![0.0, 20.0, 0.0, 20.0, 0.0, 20.0, 0.0]
        );
        assert_eq!(forecast.total_predicted, 60.0);
    }

    #[test]
    fn test_trained_forecast_is_non_negative_on_real_history() {
        let amounts: Vec<f64> = (0..30).map(|i| 300.0 - 10.0 * i as f64).collect();
        let expenses = consecutive_days(date(2024, 3, 1), &amounts);
        let mut forecaster = Forecaster::new();
        forecaster.train(&expenses).unwrap();

        let forecast = forecaster.predict_next_week_from(&expenses, date(2024, 3, 31));
        assert_eq!(forecast.predictions.len(), 7);
        assert!(forecast.amounts().iter().all(|a| *a >= 0.0));
    }

    #[test]
    fn test_retraining_replaces_model() {
        let mut forecaster = Forecaster::new();
        forecaster
            .train(&consecutive_days(date(2024, 1, 1), &WEEK_PATTERN))
            .unwrap();
        let first = forecaster.model().cloned().unwrap();

        let longer: Vec<f64> = (0..20).map(|i| 5.0 + (i % 3) as f64).collect();
        forecaster
            .train(&consecutive_days(date(2024, 1, 1), &longer))
            .unwrap();
        let second = forecaster.model().unwrap();

        assert_eq!(second.samples(), 13);
        assert_ne!(&first, second);
    }
}
