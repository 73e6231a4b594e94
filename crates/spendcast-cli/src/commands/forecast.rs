//! Forecast command implementation

use anyhow::Result;
use chrono::NaiveDate;
use spendcast_core::{ExpenseRecord, Forecast, ForecastMethod, Forecaster};
use tracing::debug;

use super::print_json;
use crate::config::OutputFormat;

/// Train (unless `train` is false) and print the seven-day forecast
pub fn cmd_forecast(
    expenses: &[ExpenseRecord],
    today: NaiveDate,
    train: bool,
    format: OutputFormat,
) -> Result<Forecast> {
    let mut forecaster = Forecaster::new();

    let mut fallback_reason = None;
    if train {
        match forecaster.train(expenses) {
            Ok(report) => debug!(samples = report.samples, "Training complete"),
            Err(e) => fallback_reason = Some(e.to_string()),
        }
    } else {
        fallback_reason = Some("training skipped (--no-train)".to_string());
    }

    let forecast = forecaster.predict_next_week_from(expenses, today);

    if format == OutputFormat::Json {
        print_json(&forecast)?;
        return Ok(forecast);
    }

    println!();
    println!("📈 Seven-Day Spending Forecast");
    match (forecast.method, forecaster.model()) {
        (ForecastMethod::Model, Some(model)) => {
            println!("   Method: model (trained on {} samples)", model.samples());
        }
        _ => {
            println!("   Method: {} of daily totals", forecast.method);
        }
    }
    if let Some(reason) = fallback_reason {
        println!("   💡 {}", reason);
    }
    println!("   ─────────────────────────────────────");
    println!("   {:12} │ {:3} │ {:>12}", "Date", "Day", "Amount");
    println!("   ─────────────┼─────┼─────────────");
    for prediction in &forecast.predictions {
        println!(
            "   {:12} │ {:3} │ {:>12.2}",
            prediction.date.format("%Y-%m-%d").to_string(),
            prediction.date.format("%a").to_string(),
            prediction.predicted_amount
        );
    }
    println!("   ─────────────────────────────────────");
    println!(
        "   Total: ${:.2}   Daily average: ${:.2}",
        forecast.total_predicted, forecast.average_daily
    );

    Ok(forecast)
}
