//! Terminal rendering for allocation reports.
//!
//! Human-readable tables via `tabled` with colored status lines, or a
//! single JSON document in `--json` mode for scripting.

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::application::optimizer::AllocationReport;
use crate::domain::Resource;
use crate::error::Result;
use crate::port::SolveStatus;

#[derive(Tabled)]
struct AllocationRow {
    #[tabled(rename = "Child")]
    child: String,
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Unit")]
    unit: String,
}

#[derive(Tabled)]
struct ExhaustionRow {
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Daily need")]
    daily_rate: String,
    #[tabled(rename = "Days left")]
    days_left: String,
    #[tabled(rename = "Depleted on")]
    depleted_on: String,
}

/// Render a successful run.
pub fn render_report(report: &AllocationReport, resources: &[Resource], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{} resources allocated fairly and successfully",
        "success:".green().bold()
    );

    let rows: Vec<AllocationRow> = report
        .allocations
        .iter()
        .map(|a| AllocationRow {
            child: a.child.to_string(),
            resource: a.resource.to_string(),
            quantity: a.quantity.normalize().to_string(),
            unit: resources
                .iter()
                .find(|r| r.id == a.resource)
                .map(|r| r.unit.clone())
                .unwrap_or_default(),
        })
        .collect();

    if rows.is_empty() {
        println!("(no allocations: empty population or no eligible pairs)");
    } else {
        println!("{}", Table::new(rows));
    }

    if !report.exhaustion.is_empty() {
        println!();
        let rows: Vec<ExhaustionRow> = report
            .exhaustion
            .iter()
            .map(|e| ExhaustionRow {
                resource: e.name.clone(),
                remaining: format!("{} {}", round2(e.remaining), e.unit),
                daily_rate: format!("{} {}", round2(e.daily_rate), e.unit),
                days_left: e.days_left.to_string(),
                depleted_on: e
                    .depleted_on
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
            })
            .collect();
        println!("{}", Table::new(rows));

        for estimate in &report.exhaustion {
            println!(
                "{}: {} {} remaining. With a daily requirement of {} {}, sufficient for {} days.",
                estimate.name,
                round2(estimate.remaining),
                estimate.unit,
                round2(estimate.daily_rate),
                estimate.unit,
                estimate.days_left
            );
        }
    }

    Ok(())
}

/// Render a failed run.
pub fn render_failure(status: SolveStatus, reason: &str, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "status": status.code(),
                "reason": reason,
            })
        );
        return Ok(());
    }

    println!("{} {} ({})", "error:".red().bold(), reason, status.code());
    Ok(())
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp(2).normalize()
}
