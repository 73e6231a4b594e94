//! Month-level spending projection and trend direction
//!
//! Projections blend a least-squares trend line over monthly totals with a
//! short trailing moving average. Both work on whole months, so they
//! complement the daily forecaster rather than replace it.

use crate::aggregate::{monthly_totals, ExpenseFilter};
use crate::models::{round2, ExpenseRecord, SpendingTrend};

/// Weight of the trend line in a projection; the moving average gets the rest
const TREND_WEIGHT: f64 = 0.4;

/// Records needed before a single category is projected from its months
const MIN_CATEGORY_RECORDS: usize = 3;

/// Records needed before a trend direction is reported
const MIN_TREND_RECORDS: usize = 6;

/// Percentage change that counts as a real move
const TREND_THRESHOLD_PERCENT: f64 = 10.0;

fn select(expenses: &[ExpenseRecord], category: Option<&str>) -> Vec<ExpenseRecord> {
    match category {
        Some(c) => ExpenseFilter::new().category(c).apply(expenses),
        None => expenses.to_vec(),
    }
}

fn monthly_series(expenses: &[ExpenseRecord]) -> Vec<f64> {
    monthly_totals(expenses).into_values().collect()
}

/// Slope and intercept of `y` against `0..n`
fn fit_line(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    let slope = if denominator == 0.0 {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    (slope, (sum_y - slope * sum_x) / n)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Projected spending for each of the next `months_ahead` months
///
/// With a category, fewer than three matching records project the mean
/// record amount. With fewer than two months of data the single month's
/// total (or zero) is repeated.
pub fn project_monthly_spending(
    expenses: &[ExpenseRecord],
    category: Option<&str>,
    months_ahead: usize,
) -> Vec<f64> {
    let selected = select(expenses, category);

    if category.is_some() && selected.len() < MIN_CATEGORY_RECORDS {
        let amounts: Vec<f64> = selected.iter().map(|e| e.amount).collect();
        return vec![mean(&amounts); months_ahead];
    }

    let months = monthly_series(&selected);
    if months.len() < 2 {
        return vec![months.first().copied().unwrap_or(0.0); months_ahead];
    }

    let (slope, intercept) = fit_line(&months);
    let window = 3.min(months.len() / 2);
    let smoothed = mean(&months[months.len() - window..]);

    (1..=months_ahead)
        .map(|step| {
            let trend = intercept + slope * (months.len() + step - 1) as f64;
            let projected = trend * TREND_WEIGHT + smoothed * (1.0 - TREND_WEIGHT);
            round2(projected).max(0.0)
        })
        .collect()
}

/// Compare the last three months with the three before them
pub fn spending_trend(expenses: &[ExpenseRecord], category: Option<&str>) -> SpendingTrend {
    let selected = select(expenses, category);
    if selected.len() < MIN_TREND_RECORDS {
        return SpendingTrend::InsufficientData;
    }

    let months = monthly_series(&selected);
    if months.len() < 3 {
        return SpendingTrend::InsufficientData;
    }

    let split = months.len() - 3;
    let recent = &months[split..];
    let previous = &months[split.saturating_sub(3)..split];
    if previous.is_empty() {
        return SpendingTrend::InsufficientData;
    }

    let recent_avg = mean(recent);
    let previous_avg = mean(previous);
    if previous_avg == 0.0 {
        return if recent_avg > 0.0 {
            SpendingTrend::Increasing
        } else {
            SpendingTrend::Stable
        };
    }

    let change = (recent_avg - previous_avg) / previous_avg * 100.0;
    if change > TREND_THRESHOLD_PERCENT {
        SpendingTrend::Increasing
    } else if change < -TREND_THRESHOLD_PERCENT {
        SpendingTrend::Decreasing
    } else {
        SpendingTrend::Stable
    }
}
