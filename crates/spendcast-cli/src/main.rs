//! Spendcast CLI - Spending forecast and analytics
//!
//! Usage:
//!   spendcast forecast                      Seven-day spending forecast
//!   spendcast patterns                      Category and monthly breakdown
//!   spendcast budget --budgets budgets.csv  Budget vs actual for this month
//!   spendcast project --months 6            Monthly projection and trend

mod cli;
mod commands;
mod config;


use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Parser;
use spendcast_core::ExpenseFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use config::OutputFormat;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = config::load_config(cli.config.as_deref())?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };
    let expenses_path = cli.expenses.unwrap_or_else(|| config.expenses.clone());
    let today = Local::now().date_naive();

    let expenses = commands::load_expenses(&expenses_path)?;

    match cli.command {
        Commands::Forecast {
            today: first_day,
            no_train,
        } => {
            let first_day = match first_day {
                Some(value) => commands::parse_date(&value, "--today")?,
                None => today,
            };
            commands::cmd_forecast(&expenses, first_day, !no_train, format)?;
        }
        Commands::Patterns => {
            commands::cmd_patterns(&expenses, format)?;
        }
        Commands::Budget {
            budgets,
            month,
            year,
        } => {
            let budgets_path = budgets.unwrap_or_else(|| config.budgets.clone());
            let budgets = commands::load_budgets(&budgets_path)?;
            commands::cmd_budget(
                &budgets,
                &expenses,
                month.unwrap_or_else(|| today.month()),
                year.unwrap_or_else(|| today.year()),
                format,
            )?;
        }
        Commands::Summary { from, to, category } => {
            let mut filter = ExpenseFilter::new();
            if let Some(from) = from {
                filter = filter.since(commands::parse_date(&from, "--from")?);
            }
            if let Some(to) = to {
                filter = filter.until(commands::parse_date(&to, "--to")?);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            commands::cmd_summary(&expenses, &filter, format)?;
        }
        Commands::Years => {
            commands::cmd_years(&expenses, format)?;
        }
        Commands::Project { months, category } => {
            commands::cmd_project(
                &expenses,
                category.as_deref(),
                months.unwrap_or(config.months_ahead),
                today,
                format,
            )?;
        }
    }

    Ok(())
}
