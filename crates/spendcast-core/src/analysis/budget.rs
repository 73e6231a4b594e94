//! Budget-vs-actual comparison for a calendar month

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{Budget, BudgetStatus, BudgetStatusEntry, ExpenseRecord};

/// Inclusive first and last day of a month
pub fn month_range(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidPeriod(format!("{}-{:02}", year, month)))?;

    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let end = next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| Error::InvalidPeriod(format!("{}-{:02}", year, month)))?;

    Ok((start, end))
}

/// Compare each budget for `month`/`year` with the spending in that month
///
/// Budgets for other months are ignored. `total_spent` covers every category
/// with spending in the month, budgeted or not.
pub fn get_budget_status(
    budgets: &[Budget],
    expenses: &[ExpenseRecord],
    month: u32,
    year: i32,
) -> Result<BudgetStatus> {
    let (start, end) = month_range(month, year)?;

    let mut spending: BTreeMap<&str, f64> = BTreeMap::new();
    for expense in expenses {
        match expense.parsed_date() {
            Some(date) if date >= start && date <= end => {
                *spending.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
            }
            _ => {}
        }
    }

    let mut entries = Vec::new();
    let mut total_budget = 0.0;
    for budget in budgets.iter().filter(|b| b.applies_to(month, year)) {
        let spent = spending.get(budget.category.as_str()).copied().unwrap_or(0.0);
        let percentage_used = if budget.amount > 0.0 {
            spent / budget.amount * 100.0
        } else {
            0.0
        };

        total_budget += budget.amount;
        entries.push(BudgetStatusEntry {
            category: budget.category.clone(),
            budget_amount: budget.amount,
            spent,
            remaining: budget.amount - spent,
            percentage_used,
            over_budget: spent > budget.amount,
        });
    }

    Ok(BudgetStatus {
        month,
        year,
        budgets: entries,
        total_budget,
        total_spent: spending.values().sum(),
    })
}
