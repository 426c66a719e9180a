//! `lobby participants`: print the live roster.

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

pub async fn list_participants(state: &AppState, json: bool) -> Result<()> {
    let participants = state.presence_service.list_all().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&participants)?);
        return Ok(());
    }

    if participants.is_empty() {
        println!();
        println!("  {} The room is empty.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let stale_after_secs = state.config.presence.stale_after_secs;

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Last Seen").fg(Color::White),
    ]);

    for p in &participants {
        let idle = (Utc::now() - p.last_seen).num_seconds();
        let seen = Cell::new(format_idle(&p.last_seen));
        let seen = if is_stale(idle, stale_after_secs) {
            seen.fg(Color::Yellow)
        } else {
            seen.fg(Color::Green)
        };
        table.add_row(vec![Cell::new(&p.name), seen]);
    }

    println!("{table}");
    println!(
        "  {} participant(s)",
        style(participants.len()).bold()
    );
    Ok(())
}

fn is_stale(idle_secs: i64, stale_after_secs: u64) -> bool {
    idle_secs >= i64::try_from(stale_after_secs).unwrap_or(i64::MAX)
}

/// Seconds-resolution idle time; presence windows are measured in seconds.
fn format_idle(dt: &DateTime<Utc>) -> String {
    let secs = (Utc::now() - *dt).num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
