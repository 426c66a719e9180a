//! `lobby messages`: print the history as a participant sees it.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use lobby_types::message::MessageKind;

use crate::state::AppState;

pub async fn list_messages(
    state: &AppState,
    viewer: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let messages = state.message_service.list(viewer, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages visible to {}.",
            style("i").blue().bold(),
            style(viewer).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Time").fg(Color::White),
        Cell::new("From").fg(Color::White),
        Cell::new("To").fg(Color::White),
        Cell::new("Text").fg(Color::White),
    ]);

    // Oldest at the top, like a chat window.
    for msg in messages.iter().rev() {
        let text = match msg.kind {
            MessageKind::Status => Cell::new(&msg.text).fg(Color::DarkGrey),
            MessageKind::PrivateMessage => {
                Cell::new(format!("(private) {}", msg.text)).fg(Color::Magenta)
            }
            MessageKind::Message => Cell::new(&msg.text),
        };
        table.add_row(vec![
            Cell::new(&msg.time),
            Cell::new(&msg.from),
            Cell::new(&msg.to),
            text,
        ]);
    }

    println!("{table}");
    Ok(())
}
