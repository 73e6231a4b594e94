//! Stateless spending analysis
//!
//! ## Analyses
//!
//! - **Patterns** - category breakdown, monthly trend, average daily spend,
//!   most-spent category
//! - **Budget status** - budget vs actual per category for one month
//! - **Summary** - totals, counts and per-year breakdowns
//! - **Projection** - month-level spending projection and trend direction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendcast_core::analysis::{get_budget_status, get_spending_patterns};
//!
//! let patterns = get_spending_patterns(&expenses);
//! let status = get_budget_status(&budgets, &expenses, 3, 2024)?;
//! ```

pub mod budget;
pub mod patterns;
pub mod projection;
pub mod summary;

pub use budget::{get_budget_status, month_range};
pub use patterns::{get_spending_patterns, most_spent_category};
pub use projection::{project_monthly_spending, spending_trend};
pub use summary::{spending_summary, yearly_summaries};
