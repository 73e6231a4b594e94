//! Spending summaries: overall totals and per-year breakdowns

use std::cmp::Ordering;

use crate::aggregate::{category_totals, yearly_totals};
use crate::models::{round2, ExpenseRecord, SpendingSummary, YearSummary};

/// Number of categories listed per year
const TOP_CATEGORIES: usize = 3;

/// Total, count, average per expense and category breakdown
pub fn spending_summary(expenses: &[ExpenseRecord]) -> SpendingSummary {
    if expenses.is_empty() {
        return SpendingSummary {
            total_spent: 0.0,
            total_expenses: 0,
            average_expense: 0.0,
            category_breakdown: Default::default(),
        };
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    SpendingSummary {
        total_spent: round2(total),
        total_expenses: expenses.len(),
        average_expense: round2(total / expenses.len() as f64),
        category_breakdown: category_totals(expenses),
    }
}

/// One summary per calendar year, most recent year first
pub fn yearly_summaries(expenses: &[ExpenseRecord]) -> Vec<YearSummary> {
    yearly_totals(expenses)
        .into_iter()
        .rev()
        .map(|(year, totals)| {
            let mut ranked: Vec<(String, f64)> = totals
                .by_category
                .iter()
                .map(|(c, a)| (c.clone(), *a))
                .collect();
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            ranked.truncate(TOP_CATEGORIES);

            YearSummary {
                year,
                total: totals.total,
                count: totals.count,
                monthly_average: totals.total / 12.0,
                by_category: totals.by_category,
                top_categories: ranked,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::expense;

    #[test]
    fn test_summary_of_empty_history() {
        let summary = spending_summary(&[]);
        assert_eq!(summary.total_spent, 0.0);
        assert_eq!(summary.total_expenses, 0);
        assert_eq!(summary.average_expense, 0.0);
        assert!(summary.category_breakdown.is_empty());
    }

    #[test]
    fn test_summary_totals() {
        let expenses = vec![
            expense(10.0, "Food", "2024-01-01"),
            expense(20.0, "Food", "2024-01-02"),
            expense(5.0, "Fun", "2024-01-03"),
        ];
        let summary = spending_summary(&expenses);

        assert_eq!(summary.total_spent, 35.0);
        assert_eq!(summary.total_expenses, 3);
        assert_eq!(summary.average_expense, 11.67);
        assert_eq!(summary.category_breakdown["Food"], 30.0);
    }

    #[test]
    fn test_yearly_summaries_newest_first_with_top_categories() {
        let expenses = vec![
            expense(120.0, "Rent", "2023-05-01"),
            expense(10.0, "Food", "2024-01-01"),
            expense(40.0, "Rent", "2024-02-01"),
            expense(40.0, "Fun", "2024-03-01"),
            expense(5.0, "Books", "2024-04-01"),
            expense(1.0, "Gifts", "2024-05-01"),
        ];

        let years = yearly_summaries(&expenses);
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2024);
        assert_eq!(years[0].count, 5);
        assert_eq!(years[0].total, 96.0);
        assert_eq!(years[0].monthly_average, 8.0);

        let names: Vec<&str> = years[0]
            .top_categories
            .iter()
            .map(|(c, _)| c.as_str())
            .collect();
        assert_eq!(names, vec!["Fun", "Rent", "Food"]);

        assert_eq!(years[1].year, 2023);
        assert_eq!(years[1].monthly_average, 10.0);
    }
}
