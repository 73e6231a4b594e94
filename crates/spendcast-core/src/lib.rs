//! Spendcast Core Library
//!
//! Spending forecast and analytics engine:
//! - Daily, category, monthly and yearly aggregation of expense records
//! - Seven-day spending forecast from a rolling-window regression model,
//!   with an average-based fallback
//! - Spending patterns and budget-vs-actual status
//! - Summaries, month-level projections and trend direction
//! - CSV and JSON parsers for expense and budget files
//!
//! The engine holds no storage of its own: callers pass expense and budget
//! collections in and receive plain report structures back.

pub mod aggregate;
pub mod analysis;
pub mod error;
pub mod forecast;
pub mod import;
pub mod models;

/// Record builders shared by unit tests
#[cfg(test)]
pub mod test_utils;

pub use aggregate::{DailyTotals, ExpenseFilter};
pub use analysis::{
    get_budget_status, get_spending_patterns, project_monthly_spending, spending_summary,
    spending_trend, yearly_summaries,
};
pub use error::{Error, Result};
pub use forecast::{Forecaster, TrainingReport};
pub use import::ImportFormat;
pub use models::{
    Budget, BudgetStatus, BudgetStatusEntry, ExpenseRecord, Forecast, ForecastMethod, Prediction,
    SpendingPatterns, SpendingSummary, SpendingTrend, YearSummary,
};
