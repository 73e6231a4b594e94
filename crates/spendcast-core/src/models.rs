//! Data models for Spendcast

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category assigned to records that arrive without one
pub const DEFAULT_CATEGORY: &str = "Other";

/// Number of days covered by a weekly forecast
pub const FORECAST_DAYS: usize = 7;

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A single expense as handed to the engine
///
/// `date` keeps the caller's ISO text (`YYYY-MM-DD`, optionally followed by a
/// time of day). Only the first 10 characters are used for daily grouping and
/// only the first 7 for monthly grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: String,
}

impl ExpenseRecord {
    /// Create a record for a calendar date
    pub fn new(amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            description: None,
            date: date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Attach a free-form description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Date portion of the record (first 10 characters), empty if no date
    pub fn day_key(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }

    /// Year-month portion of the record (first 7 characters)
    pub fn month_key(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }

    /// Parsed calendar date, `None` when the date portion is malformed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.day_key(), "%Y-%m-%d").ok()
    }
}

/// A spending ceiling for one category in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: f64, month: u32, year: i32) -> Self {
        Self {
            category: category.into(),
            amount,
            month,
            year,
        }
    }

    /// Whether this budget applies to the given month
    pub fn applies_to(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }
}

/// Predicted spending for a single day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub date: NaiveDate,
    pub predicted_amount: f64,
}

/// Strategy that produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Trained regression model with rolling-window features
    Model,
    /// Historical average daily spend repeated for every day
    Average,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Average => "average",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A seven-day spending forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub method: ForecastMethod,
    pub predictions: Vec<Prediction>,
    pub total_predicted: f64,
    pub average_daily: f64,
}

impl Forecast {
    pub(crate) fn new(method: ForecastMethod, predictions: Vec<Prediction>) -> Self {
        let total_predicted: f64 = predictions.iter().map(|p| p.predicted_amount).sum();
        Self {
            method,
            total_predicted,
            average_daily: total_predicted / predictions.len().max(1) as f64,
            predictions,
        }
    }

    /// Predicted amounts in date order
    pub fn amounts(&self) -> Vec<f64> {
        self.predictions.iter().map(|p| p.predicted_amount).collect()
    }
}

/// Descriptive spending analytics over a full history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPatterns {
    pub category_breakdown: BTreeMap<String, f64>,
    pub monthly_trend: BTreeMap<String, f64>,
    pub average_daily: f64,
    pub most_spent_category: Option<String>,
    pub total_spent: f64,
}

/// Budget-vs-actual comparison for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatusEntry {
    pub category: String,
    pub budget_amount: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage_used: f64,
    pub over_budget: bool,
}

/// Budget status for a whole month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub month: u32,
    pub year: i32,
    pub budgets: Vec<BudgetStatusEntry>,
    pub total_budget: f64,
    pub total_spent: f64,
}

/// Totals and counts for a set of expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub total_spent: f64,
    pub total_expenses: usize,
    pub average_expense: f64,
    pub category_breakdown: BTreeMap<String, f64>,
}

/// Spending for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub total: f64,
    pub count: usize,
    pub monthly_average: f64,
    pub by_category: BTreeMap<String, f64>,
    pub top_categories: Vec<(String, f64)>,
}

/// Direction of recent monthly spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl SpendingTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for SpendingTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpendingTrend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increasing" => Ok(Self::Increasing),
            "decreasing" => Ok(Self::Decreasing),
            "stable" => Ok(Self::Stable),
            "insufficient_data" => Ok(Self::InsufficientData),
            _ => Err(format!("Unknown spending trend: {}", s)),
        }
    }
}

/// Round to cents for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
