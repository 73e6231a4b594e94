//! Budget status command implementation

use anyhow::{Context, Result};
use spendcast_core::{get_budget_status, Budget, BudgetStatus, ExpenseRecord};

use super::{print_json, truncate};
use crate::config::OutputFormat;

pub fn cmd_budget(
    budgets: &[Budget],
    expenses: &[ExpenseRecord],
    month: u32,
    year: i32,
    format: OutputFormat,
) -> Result<BudgetStatus> {
    let status = get_budget_status(budgets, expenses, month, year)
        .context("Invalid --month/--year for budget status")?;

    if format == OutputFormat::Json {
        print_json(&status)?;
        return Ok(status);
    }

    println!();
    println!("💰 Budget Status for {}-{:02}", year, month);
    println!("   ─────────────────────────────────────────────────────────────");

    if status.budgets.is_empty() {
        println!("   No budgets set for this month.");
        println!("   Spent: ${:.2}", status.total_spent);
        return Ok(status);
    }

    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>10} │ {:>6}",
        "Category", "Budget", "Spent", "Remaining", "Used"
    );
    println!("   ─────────────────────┼────────────┼────────────┼────────────┼───────");
    for entry in &status.budgets {
        let marker = if entry.over_budget { " ⚠️" } else { "" };
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>10.2} │ {:>5.1}%{}",
            truncate(&entry.category, 20),
            entry.budget_amount,
            entry.spent,
            entry.remaining,
            entry.percentage_used,
            marker
        );
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Budgeted: ${:.2}   Spent (all categories): ${:.2}",
        status.total_budget, status.total_spent
    );

    let over = status.budgets.iter().filter(|b| b.over_budget).count();
    if over > 0 {
        println!("   ⚠️  {} categor{} over budget", over, if over == 1 { "y" } else { "ies" });
    }

    Ok(status)
}
