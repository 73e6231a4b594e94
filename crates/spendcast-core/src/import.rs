//! Parsers for expense and budget files (CSV and JSON)

use std::fmt;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Budget, ExpenseRecord, DEFAULT_CATEGORY};

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse expenses in the given format
pub fn parse_expenses<R: Read>(reader: R, format: ImportFormat) -> Result<Vec<ExpenseRecord>> {
    match format {
        ImportFormat::Csv => parse_expenses_csv(reader),
        ImportFormat::Json => parse_expenses_json(reader),
    }
}

/// Parse budgets in the given format, merging duplicates
pub fn parse_budgets<R: Read>(reader: R, format: ImportFormat) -> Result<Vec<Budget>> {
    let budgets = match format {
        ImportFormat::Csv => parse_budgets_csv(reader)?,
        ImportFormat::Json => parse_budgets_json(reader)?,
    };
    Ok(merge_budgets(budgets))
}

/// Column positions located by (case-insensitive) header name
struct Columns {
    headers: Vec<String>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self {
            headers: headers.iter().map(|h| h.trim().to_lowercase()).collect(),
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.find(name)
            .ok_or_else(|| Error::Import(format!("Missing '{}' column", name)))
    }
}

fn cell<'r>(record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn parse_amount(raw: Option<&str>, row: usize) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(0.0);
    };
    let cleaned = raw.trim_start_matches('$').replace(',', "");
    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Row {}: invalid amount '{}'", row, raw)))
}

/// Parse expense CSV
///
/// Header names are matched case-insensitively. `amount` and `date` are
/// required columns; `category` and `description` are optional.
pub fn parse_expenses_csv<R: Read>(reader: R) -> Result<Vec<ExpenseRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?);
    let amount_col = columns.require("amount")?;
    let date_col = columns.require("date")?;
    let category_col = columns.find("category");
    let description_col = columns.find("description");

    let mut expenses = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is row 1
        let row = i + 2;

        expenses.push(ExpenseRecord {
            amount: parse_amount(cell(&record, Some(amount_col)), row)?,
            category: cell(&record, category_col)
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
            description: cell(&record, description_col).map(str::to_string),
            date: cell(&record, Some(date_col)).unwrap_or_default().to_string(),
        });
    }

    debug!(count = expenses.len(), "Parsed expense CSV");
    Ok(expenses)
}

/// Parse a JSON array of expense objects
pub fn parse_expenses_json<R: Read>(reader: R) -> Result<Vec<ExpenseRecord>> {
    let expenses: Vec<ExpenseRecord> = serde_json::from_reader(reader)?;
    debug!(count = expenses.len(), "Parsed expense JSON");
    Ok(expenses)
}

/// Parse budget CSV with `category,amount,month,year` columns
pub fn parse_budgets_csv<R: Read>(reader: R) -> Result<Vec<Budget>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?);
    let category_col = columns.require("category")?;
    let amount_col = columns.require("amount")?;
    let month_col = columns.require("month")?;
    let year_col = columns.require("year")?;

    let mut budgets = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 2;

        let category = cell(&record, Some(category_col))
            .ok_or_else(|| Error::Import(format!("Row {}: missing category", row)))?;
        let month = cell(&record, Some(month_col))
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(|| Error::Import(format!("Row {}: invalid month", row)))?;
        let year = cell(&record, Some(year_col))
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(|| Error::Import(format!("Row {}: invalid year", row)))?;

        budgets.push(Budget {
            category: category.to_string(),
            amount: parse_amount(cell(&record, Some(amount_col)), row)?,
            month,
            year,
        });
    }

    debug!(count = budgets.len(), "Parsed budget CSV");
    Ok(budgets)
}

/// Parse a JSON array of budget objects
pub fn parse_budgets_json<R: Read>(reader: R) -> Result<Vec<Budget>> {
    let budgets: Vec<Budget> = serde_json::from_reader(reader)?;
    debug!(count = budgets.len(), "Parsed budget JSON");
    Ok(budgets)
}

/// Collapse budgets sharing category, month and year
///
/// The later amount replaces the earlier one, which keeps its position.
pub fn merge_budgets(budgets: Vec<Budget>) -> Vec<Budget> {
    let mut merged: Vec<Budget> = Vec::with_capacity(budgets.len());
    for budget in budgets {
        let existing = merged.iter_mut().find(|b| {
            b.category == budget.category && b.month == budget.month && b.year == budget.year
        });
        match existing {
            Some(b) => b.amount = budget.amount,
            None => merged.push(budget),
        }
    }
    merged
}
