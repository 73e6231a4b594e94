//! Shared command utilities
//!
//! This module contains:
//! - `load_expenses` / `load_budgets` - Read expense and budget files
//! - `parse_date` - Parse a `YYYY-MM-DD` argument
//! - `print_json` - Pretty-print a report as JSON

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use spendcast_core::import::{parse_budgets, parse_expenses};
use spendcast_core::{Budget, ExpenseRecord, ImportFormat};
use tracing::debug;

/// Pick the file format from the extension
pub fn detect_format(path: &Path) -> Result<ImportFormat> {
    ImportFormat::from_path(path).with_context(|| {
        format!(
            "Unsupported file type: {} (expected .csv or .json)",
            path.display()
        )
    })
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Load expense records from a CSV or JSON file
pub fn load_expenses(path: &Path) -> Result<Vec<ExpenseRecord>> {
    let format = detect_format(path)?;
    let expenses = parse_expenses(open(path)?, format)
        .with_context(|| format!("Failed to parse expenses from {}", path.display()))?;

    debug!(path = %path.display(), format = %format, count = expenses.len(), "Loaded expenses");
    Ok(expenses)
}

/// Load budgets from a CSV or JSON file
pub fn load_budgets(path: &Path) -> Result<Vec<Budget>> {
    let format = detect_format(path)?;
    let budgets = parse_budgets(open(path)?, format)
        .with_context(|| format!("Failed to parse budgets from {}", path.display()))?;

    debug!(path = %path.display(), format = %format, count = budgets.len(), "Loaded budgets");
    Ok(budgets)
}

/// Parse a `YYYY-MM-DD` value given for `flag`
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
