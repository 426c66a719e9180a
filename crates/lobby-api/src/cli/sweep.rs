//! `lobby sweep`: run one eviction pass now.

use anyhow::Result;
use chrono::Utc;
use console::style;

use crate::state::AppState;

pub async fn run_sweep(state: &AppState, json: bool) -> Result<()> {
    let report = state.presence_service.sweep(Utc::now()).await?;

    if json {
        let out = serde_json::json!({
            "scanned": report.scanned,
            "evicted": report.evicted,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    if report.evicted.is_empty() {
        println!(
            "  {} Scanned {} participant(s), nobody stale.",
            style("✓").green().bold(),
            report.scanned
        );
    } else {
        println!(
            "  {} Evicted {} of {} participant(s):",
            style("✓").green().bold(),
            report.evicted.len(),
            report.scanned
        );
        for name in &report.evicted {
            println!("    {} {}", style("-").dim(), style(name).yellow());
        }
    }
    println!();
    Ok(())
}
