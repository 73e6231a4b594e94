//! Feature construction for the daily spending model
//!
//! A feature vector is the seven previous daily totals (most recent first)
//! followed by the target day's weekday (Monday = 0) and day of month.

use chrono::{Datelike, NaiveDate};

use crate::aggregate::DailyTotals;

/// Number of previous days fed into each sample
pub const WINDOW_DAYS: usize = 7;

/// Total number of features per sample
pub const FEATURE_COUNT: usize = WINDOW_DAYS + 2;

pub type FeatureVector = [f64; FEATURE_COUNT];

/// Build one feature vector from a window of previous totals and a target day
pub fn feature_vector(window: &[f64; WINDOW_DAYS], day: NaiveDate) -> FeatureVector {
    let mut features = [0.0; FEATURE_COUNT];
    features[..WINDOW_DAYS].copy_from_slice(window);
    features[WINDOW_DAYS] = f64::from(day.weekday().num_days_from_monday());
    features[WINDOW_DAYS + 1] = f64::from(day.day());
    features
}

/// Supervised samples built from a daily history
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    pub features: Vec<FeatureVector>,
    pub labels: Vec<f64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Slide a window over the distinct dates in ascending order
///
/// Sample `i` uses the totals of the seven distinct dates before it, whether
/// or not those dates are contiguous on the calendar. The first sample is the
/// eighth distinct date, so seven or fewer dates yield an empty set.
pub fn build_training_set(daily: &DailyTotals) -> TrainingSet {
    let days: Vec<(NaiveDate, f64)> = daily.iter().map(|(d, v)| (*d, *v)).collect();
    let mut set = TrainingSet::default();

    for i in WINDOW_DAYS..days.len() {
        let mut window = [0.0; WINDOW_DAYS];
        for (j, slot) in window.iter_mut().enumerate() {
            *slot = days[i - 1 - j].1;
        }
        let (day, label) = days[i];
        set.features.push(feature_vector(&window, day));
        set.labels.push(label);
    }

    set
}

/// Fixed-size buffer of the most recent daily totals, most recent first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingWindow {
    values: [f64; WINDOW_DAYS],
}

impl RollingWindow {
    /// Seed from the seven most recent distinct dates, `None` with fewer
    pub fn from_history(daily: &DailyTotals) -> Option<Self> {
        if daily.len() < WINDOW_DAYS {
            return None;
        }
        let mut values = [0.0; WINDOW_DAYS];
        for (slot, total) in values.iter_mut().zip(daily.values().rev()) {
            *slot = *total;
        }
        Some(Self { values })
    }

    pub fn values(&self) -> &[f64; WINDOW_DAYS] {
        &self.values
    }

    /// Record a new most-recent value, dropping the oldest
    pub fn push(&mut self, value: f64) {
        self.values.rotate_right(1);
        self.values[0] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::daily_totals;
    use crate::test_utils::{consecutive_days, date};

    #[test]
    fn test_feature_vector_layout() {
        // 2024-01-03 is a Wednesday
        let window = [7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let features = feature_vector(&window, date(2024, 1, 3));

        assert_eq!(features.len(), 9);
        assert_eq!(&features[..7], &window);
        assert_eq!(features[7], 2.0);
        assert_eq!(features[8], 3.0);
    }

    #[test]
    fn test_seven_days_yield_no_samples() {
        let expenses = consecutive_days(date(2024, 1, 1), &[1.0; 7]);
        let set = build_training_set(&daily_totals(&expenses));
        assert!(set.is_empty());
    }

    #[test]
    fn test_training_set_windows_are_most_recent_first() {
        let amounts = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let expenses = consecutive_days(date(2024, 1, 1), &amounts);
        let set = build_training_set(&daily_totals(&expenses));

        assert_eq!(set.len(), 2);
        assert_eq!(&set.features[0][..7], &[7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(set.labels[0], 8.0);
        assert_eq!(&set.features[1][..7], &[8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0]);
        assert_eq!(set.labels[1], 9.0);
        // 2024-01-08 is a Monday, the 8th of the month
        assert_eq!(set.features[0][7], 0.0);
        assert_eq!(set.features[0][8], 8.0);
    }

    #[test]
    fn test_rolling_window_seed_and_push() {
        let amounts = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let daily = daily_totals(&consecutive_days(date(2024, 1, 1), &amounts));

        let mut window = RollingWindow::from_history(&daily).unwrap();
        assert_eq!(window.values(), &[8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0]);

        window.push(-1.5);
        assert_eq!(window.values(), &[-1.5, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_rolling_window_needs_seven_days() {
        let daily = daily_totals(&consecutive_days(date(2024, 1, 1), &[1.0; 6]));
        assert!(RollingWindow::from_history(&daily).is_none());
    }
}
