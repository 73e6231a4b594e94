//! Spending pattern analysis over a full expense history

use std::collections::BTreeMap;

use crate::aggregate::{category_totals, distinct_days, monthly_totals};
use crate::models::{round2, ExpenseRecord, SpendingPatterns};

/// Category breakdown, monthly trend, average daily spend and top category
///
/// `average_daily` divides the total by the number of distinct day keys, so a
/// record with a malformed date still counts toward the total and its key
/// still counts as a day. Such a record only drops out of the monthly trend.
pub fn get_spending_patterns(expenses: &[ExpenseRecord]) -> SpendingPatterns {
    let category_breakdown = category_totals(expenses);
    let monthly_trend = monthly_totals(expenses);
    let total: f64 = expenses.iter().map(|e| e.amount).sum();

    let days = distinct_days(expenses).len();
    let average_daily = if days == 0 { 0.0 } else { total / days as f64 };

    SpendingPatterns {
        most_spent_category: most_spent_category(&category_breakdown),
        category_breakdown,
        monthly_trend,
        average_daily: round2(average_daily),
        total_spent: round2(total),
    }
}

/// Category with the highest total
///
/// Ties go to the lexicographically smallest name, so the answer does not
/// depend on the order records arrived in.
pub fn most_spent_category(totals: &BTreeMap<String, f64>) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    for (category, total) in totals {
        match best {
            Some((_, best_total)) if *total <= best_total => {}
            _ => best = Some((category, *total)),
        }
    }
    best.map(|(category, _)| category.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{consecutive_days, date, expense, raw_expense};

    #[test]
    fn test_empty_history() {
        let patterns = get_spending_patterns(&[]);
        assert!(patterns.category_breakdown.is_empty());
        assert!(patterns.monthly_trend.is_empty());
        assert_eq!(patterns.average_daily, 0.0);
        assert_eq!(patterns.most_spent_category, None);
        assert_eq!(patterns.total_spent, 0.0);
    }

    #[test]
    fn test_eight_day_example() {
        let amounts = [10.0, 20.0, 10.0, 20.0, 10.0, 20.0, 10.0, 30.0];
        let patterns = get_spending_patterns(&consecutive_days(date(2024, 1, 1), &amounts));

        assert_eq!(patterns.average_daily, 16.25);
        assert_eq!(patterns.total_spent, 130.0);
        assert_eq!(patterns.monthly_trend["2024-01"], 130.0);
        assert_eq!(patterns.most_spent_category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let expenses = vec![
            expense(12.34, "Food", "2024-01-01"),
            expense(56.78, "Rent", "2024-01-02"),
            expense(9.1, "Fun", "2024-02-03"),
            expense(0.99, "Food", "2024-02-04"),
        ];
        let patterns = get_spending_patterns(&expenses);

        let sum: f64 = patterns.category_breakdown.values().sum();
        assert!((sum - patterns.total_spent).abs() < 0.005);
        assert_eq!(patterns.most_spent_category.as_deref(), Some("Rent"));
    }

    #[test]
    fn test_malformed_date_only_drops_monthly_contribution() {
        let expenses = vec![
            expense(10.0, "Food", "2024-01-01"),
            raw_expense(20.0, "Food", "01/02/2024"),
        ];
        let patterns = get_spending_patterns(&expenses);

        assert_eq!(patterns.total_spent, 30.0);
        assert_eq!(patterns.category_breakdown["Food"], 30.0);
        assert_eq!(patterns.monthly_trend.len(), 1);
        assert_eq!(patterns.monthly_trend["2024-01"], 10.0);
        assert_eq!(patterns.average_daily, 15.0);
    }

    #[test]
    fn test_tie_breaks_on_category_name() {
        let forward = vec![
            expense(50.0, "Travel", "2024-01-01"),
            expense(50.0, "Books", "2024-01-02"),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(
            get_spending_patterns(&forward).most_spent_category.as_deref(),
            Some("Books")
        );
        assert_eq!(
            get_spending_patterns(&backward).most_spent_category.as_deref(),
            Some("Books")
        );
    }

    #[test]
    fn test_patterns_are_idempotent() {
        let expenses = vec![
            expense(3.5, "Food", "2024-03-01"),
            expense(7.25, "Fun", "2024-04-01"),
        ];
        assert_eq!(
            get_spending_patterns(&expenses),
            get_spending_patterns(&expenses)
        );
    }
}
