//! Builders shared by the unit tests

use chrono::{Duration, NaiveDate};

use crate::models::{Budget, ExpenseRecord};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Expense on a well-formed `YYYY-MM-DD` date
pub fn expense(amount: f64, category: &str, day: &str) -> ExpenseRecord {
    let parsed = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
    ExpenseRecord::new(amount, category, parsed)
}

/// Expense carrying its date text verbatim, malformed or not
pub fn raw_expense(amount: f64, category: &str, date_text: &str) -> ExpenseRecord {
    ExpenseRecord {
        amount,
        category: category.to_string(),
        description: None,
        date: date_text.to_string(),
    }
}

/// One expense per day starting at `start`, all in the same category
pub fn consecutive_days(start: NaiveDate, amounts: &[f64]) -> Vec<ExpenseRecord> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| ExpenseRecord::new(*amount, "Food", start + Duration::days(i as i64)))
        .collect()
}

pub fn budget(category: &str, amount: f64, month: u32, year: i32) -> Budget {
    Budget::new(category, amount, month, year)
}
