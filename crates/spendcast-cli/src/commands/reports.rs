//! Report command implementations

use anyhow::{Context, Result};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use spendcast_core::aggregate::monthly_totals;
use spendcast_core::{
    get_spending_patterns, project_monthly_spending, spending_summary, spending_trend,
    yearly_summaries, ExpenseFilter, ExpenseRecord, SpendingPatterns, SpendingSummary,
    SpendingTrend, YearSummary,
};

use super::{print_json, truncate};
use crate::config::OutputFormat;

/// Print a category → amount table with percentages of `total`
fn print_breakdown<'a>(rows: impl Iterator<Item = (&'a String, &'a f64)>, total: f64) {
    let mut rows: Vec<(&String, &f64)> = rows.collect();
    rows.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!("   {:25} │ {:>10} │ {:>6}", "Category", "Amount", "%");
    println!("   ──────────────────────────┼────────────┼────────");
    for (category, amount) in rows {
        let percentage = if total > 0.0 {
            amount / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}%",
            truncate(category, 25),
            amount,
            percentage
        );
    }
}

pub fn cmd_patterns(expenses: &[ExpenseRecord], format: OutputFormat) -> Result<SpendingPatterns> {
    let patterns = get_spending_patterns(expenses);

    if format == OutputFormat::Json {
        print_json(&patterns)?;
        return Ok(patterns);
    }

    println!();
    println!("📊 Spending Patterns");
    println!("   ─────────────────────────────────────────────────────────────");

    if patterns.category_breakdown.is_empty() {
        println!("   No expenses found.");
        return Ok(patterns);
    }

    println!("   Total: ${:.2}", patterns.total_spent);
    println!("   Average per day: ${:.2}", patterns.average_daily);
    if let Some(ref category) = patterns.most_spent_category {
        println!("   Most spent: {}", category);
    }
    println!();
    print_breakdown(patterns.category_breakdown.iter(), patterns.total_spent);

    println!();
    println!("   {:10} │ {:>10}", "Month", "Amount");
    println!("   ───────────┼────────────");
    for (month, amount) in &patterns.monthly_trend {
        println!("   {:10} │ {:>10.2}", month, amount);
    }

    Ok(patterns)
}

pub fn cmd_summary(
    expenses: &[ExpenseRecord],
    filter: &ExpenseFilter,
    format: OutputFormat,
) -> Result<SpendingSummary> {
    let selected = filter.apply(expenses);
    let summary = spending_summary(&selected);

    if format == OutputFormat::Json {
        print_json(&summary)?;
        return Ok(summary);
    }

    println!();
    println!("🧾 Spending Summary");
    match (filter.start, filter.end) {
        (Some(from), Some(to)) => println!("   Period: {} to {}", from, to),
        (Some(from), None) => println!("   Period: from {}", from),
        (None, Some(to)) => println!("   Period: until {}", to),
        (None, None) => {}
    }
    if let Some(ref category) = filter.category {
        println!("   Category: {}", category);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if summary.total_expenses == 0 {
        println!("   No spending found.");
        return Ok(summary);
    }

    println!(
        "   Total: ${:.2} across {} expenses (average ${:.2})",
        summary.total_spent, summary.total_expenses, summary.average_expense
    );
    println!();
    print_breakdown(summary.category_breakdown.iter(), summary.total_spent);

    Ok(summary)
}

pub fn cmd_years(expenses: &[ExpenseRecord], format: OutputFormat) -> Result<Vec<YearSummary>> {
    let years = yearly_summaries(expenses);

    if format == OutputFormat::Json {
        print_json(&years)?;
        return Ok(years);
    }

    println!();
    println!("📅 Yearly Spending");
    println!("   ─────────────────────────────────────────────────────────────");

    if years.is_empty() {
        println!("   No dated expenses found.");
        return Ok(years);
    }

    for year in &years {
        println!(
            "   {}: ${:.2} ({} expenses, ${:.2}/month)",
            year.year, year.total, year.count, year.monthly_average
        );
        for (category, amount) in &year.top_categories {
            println!("      {:22} {:>10.2}", truncate(category, 22), amount);
        }
    }

    Ok(years)
}

/// One projected month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthProjection {
    pub month: String,
    pub projected: f64,
}

/// Output of the `project` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionReport {
    pub category: Option<String>,
    pub trend: SpendingTrend,
    pub months: Vec<MonthProjection>,
}

/// Labels (`YYYY-MM`) for the `count` months after the latest month with
/// spending, or after `today`'s month when there is none
pub fn projection_months(
    expenses: &[ExpenseRecord],
    category: Option<&str>,
    today: NaiveDate,
    count: usize,
) -> Result<Vec<String>> {
    let selected = match category {
        Some(c) => ExpenseFilter::new().category(c).apply(expenses),
        None => expenses.to_vec(),
    };

    let fallback = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .context("Invalid current date")?;
    let last = monthly_totals(&selected)
        .keys()
        .next_back()
        .and_then(|key| NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d").ok())
        .unwrap_or(fallback);

    (1..=count)
        .map(|step| {
            let month = u32::try_from(step)
                .ok()
                .and_then(|n| last.checked_add_months(Months::new(n)))
                .context("Projection horizon out of range")?;
            Ok(month.format("%Y-%m").to_string())
        })
        .collect()
}

pub fn cmd_project(
    expenses: &[ExpenseRecord],
    category: Option<&str>,
    months_ahead: usize,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<ProjectionReport> {
    let labels = projection_months(expenses, category, today, months_ahead)?;
    let projected = project_monthly_spending(expenses, category, months_ahead);

    let report = ProjectionReport {
        category: category.map(str::to_string),
        trend: spending_trend(expenses, category),
        months: labels
            .into_iter()
            .zip(projected)
            .map(|(month, projected)| MonthProjection { month, projected })
            .collect(),
    };

    if format == OutputFormat::Json {
        print_json(&report)?;
        return Ok(report);
    }

    println!();
    match category {
        Some(c) => println!("🔮 Projected Spending: {}", c),
        None => println!("🔮 Projected Spending"),
    }
    println!("   Trend: {}", report.trend.as_str().replace('_', " "));
    println!("   ─────────────────────────────────────");
    println!("   {:10} │ {:>12}", "Month", "Projected");
    println!("   ───────────┼─────────────");
    for month in &report.months {
        println!("   {:10} │ {:>12.2}", month.month, month.projected);
    }

    Ok(report)
}
