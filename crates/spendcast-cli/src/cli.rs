//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendcast - Forecast and analyze your spending
#[derive(Parser)]
#[command(name = "spendcast")]
#[command(about = "Spending forecast and analytics from expense files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Expense file (.csv or .json); defaults to the configured file
    #[arg(short, long, global = true)]
    pub expenses: Option<PathBuf>,

    /// Config file (defaults to the platform data directory, then built-in)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast daily spending for the next seven days
    Forecast {
        /// First forecast day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,

        /// Skip model training and use the historical daily average
        #[arg(long)]
        no_train: bool,
    },

    /// Show category breakdown, monthly trend and averages
    Patterns,

    /// Compare budgets with actual spending for a month
    Budget {
        /// Budget file (.csv or .json); defaults to the configured file
        #[arg(short, long)]
        budgets: Option<PathBuf>,

        /// Month number 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Summarize spending, optionally filtered by date range and category
    Summary {
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Only include this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show spending per calendar year
    Years,

    /// Project monthly spending and report the spending trend
    Project {
        /// Number of months to project (defaults to the configured value)
        #[arg(short, long)]
        months: Option<usize>,

        /// Only project this category
        #[arg(short, long)]
        category: Option<String>,
    },
}
