//! Grouping of expense records into daily, category, monthly and yearly totals
//!
//! Every function here is pure: the same records produce the same totals
//! whatever order they arrive in. Keys come out sorted because all maps are
//! `BTreeMap`s.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::ExpenseRecord;

/// Daily spending keyed by calendar date, ascending
pub type DailyTotals = BTreeMap<NaiveDate, f64>;

/// Sum amounts per calendar date
///
/// Only the date portion of each record is used. Records whose date portion
/// does not parse are left out.
pub fn daily_totals(expenses: &[ExpenseRecord]) -> DailyTotals {
    let mut totals = DailyTotals::new();
    for expense in expenses {
        match expense.parsed_date() {
            Some(date) => *totals.entry(date).or_insert(0.0) += expense.amount,
            None => debug!(date = %expense.date, "Skipping expense with malformed date"),
        }
    }
    totals
}

/// Sum amounts per category
pub fn category_totals(expenses: &[ExpenseRecord]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Sum amounts per `YYYY-MM`, taken from the first 7 characters of the date
pub fn monthly_totals(expenses: &[ExpenseRecord]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        let key = expense.month_key();
        if key.is_empty() {
            continue;
        }
        if NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d").is_err() {
            debug!(date = %expense.date, "Dropping malformed date from monthly trend");
            continue;
        }
        *totals.entry(key.to_string()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Distinct non-empty day keys (first 10 characters of each date)
pub fn distinct_days(expenses: &[ExpenseRecord]) -> BTreeSet<&str> {
    expenses
        .iter()
        .map(ExpenseRecord::day_key)
        .filter(|key| !key.is_empty())
        .collect()
}

/// Per-year total, record count and category breakdown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearTotals {
    pub total: f64,
    pub count: usize,
    pub by_category: BTreeMap<String, f64>,
}

/// Group records by calendar year
pub fn yearly_totals(expenses: &[ExpenseRecord]) -> BTreeMap<i32, YearTotals> {
    let mut years: BTreeMap<i32, YearTotals> = BTreeMap::new();
    for expense in expenses {
        let Some(date) = expense.parsed_date() else {
            continue;
        };
        let entry = years.entry(date.year()).or_default();
        entry.total += expense.amount;
        entry.count += 1;
        *entry
            .by_category
            .entry(expense.category.clone())
            .or_insert(0.0) += expense.amount;
    }
    years
}

/// Optional filters applied to an expense list
///
/// Date bounds are inclusive. A record with a malformed date never matches a
/// filter that has a date bound.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub category: Option<String>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether a single record passes every configured filter
    pub fn matches(&self, expense: &ExpenseRecord) -> bool {
        if let Some(ref category) = self.category {
            if &expense.category != category {
                return false;
            }
        }

        if self.start.is_none() && self.end.is_none() {
            return true;
        }

        let Some(date) = expense.parsed_date() else {
            return false;
        };
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    /// Records matching the filter, cloned so the result can feed the engine
    pub fn apply(&self, expenses: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
        expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}
