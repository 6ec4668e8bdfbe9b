use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let decks = app.storage.list_decks(app.profile.id)?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = decks
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "id": d.id.to_string(),
                        "name": d.name,
                        "cardCount": d.card_count,
                        "createdAt": d.created_at.to_rfc3339(),
                        "updatedAt": d.updated_at.to_rfc3339(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("No decks found.");
                return Ok(());
            }

            let name_width = decks.iter().map(|d| d.name.len()).max().unwrap_or(4).max(4);
            println!("{:<name_w$} {:>5} {}", "Name", "Cards", "Created", name_w = name_width);
            println!(
                "{} {} {}",
                "\u{2500}".repeat(name_width),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(10)
            );
            for deck in &decks {
                println!(
                    "{:<name_w$} {:>5} {}",
                    deck.name,
                    deck.card_count,
                    deck.created_at.format("%Y-%m-%d"),
                    name_w = name_width
                );
            }
        }
    }

    Ok(())
}

pub fn run_create(app: &App, name: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.storage.create_deck(app.profile.id, name.to_string())?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "id": deck.id.to_string(),
                    "name": deck.name,
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("Created deck '{}' ({})", deck.name, deck.id);
        }
    }

    Ok(())
}

pub fn run_rename(app: &App, deck_name: &str, new_name: &str) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let renamed = app
        .storage
        .rename_deck(app.profile.id, deck.id, new_name.to_string())?;

    println!("Renamed deck '{}' to '{}'", deck.name, renamed.name);
    Ok(())
}

pub fn run_delete(app: &App, deck_name: &str) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    app.storage.delete_deck(app.profile.id, deck.id)?;

    println!("Deleted deck '{}' and its {} cards", deck.name, deck.card_count);
    Ok(())
}
