use anyhow::{bail, Result};

use mnemo_lib::practice::filter_cards;
use mnemo_lib::storage::{decode_card_text, ReviewType};

use crate::app::App;
use crate::OutputFormat;

pub fn run_list(app: &App, deck_name: &str, favorites: bool, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let cards = app.storage.list_cards(app.profile.id, deck.id)?;

    let review_type = if favorites {
        ReviewType::Favorites
    } else {
        ReviewType::All
    };
    let cards = filter_cards(&cards, review_type);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = cards
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id.to_string(),
                        "frontText": c.front_text,
                        "backText": c.back_text,
                        "favorited": c.favorited,
                        "createdAt": c.created_at.to_rfc3339(),
                        "updatedAt": c.updated_at.to_rfc3339(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards found.");
                return Ok(());
            }

            for card in &cards {
                let marker = if card.favorited { "*" } else { " " };
                // Show only the first line of multi-line cards
                let front = decode_card_text(&card.front_text);
                let back = decode_card_text(&card.back_text);
                println!(
                    "{} {} | {}",
                    marker,
                    front.lines().next().unwrap_or(""),
                    back.lines().next().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

pub fn run_add(
    app: &App,
    deck_name: &str,
    front: &str,
    back: &str,
    format: &OutputFormat,
) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let card = app.storage.create_card(app.profile.id, deck.id, front, back)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "id": card.id.to_string(),
                    "deckId": card.deck_id.to_string(),
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("Added card to '{}' ({})", deck.name, card.id);
        }
    }

    Ok(())
}

pub fn run_edit(
    app: &App,
    deck_name: &str,
    card_selector: &str,
    front: Option<&str>,
    back: Option<&str>,
) -> Result<()> {
    if front.is_none() && back.is_none() {
        bail!("Nothing to update; pass --front and/or --back");
    }

    let deck = app.find_deck(deck_name)?;
    let card = app.find_card(deck.id, card_selector)?;
    app.storage
        .update_card_text(app.profile.id, card.id, front, back)?;

    println!("Updated card {}", card.id);
    Ok(())
}

pub fn run_favorite(app: &App, deck_name: &str, card_selector: &str) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let card = app.find_card(deck.id, card_selector)?;
    let toggled = app.storage.toggle_favorited(app.profile.id, card.id)?;

    if toggled.favorited {
        println!("Favorited card {}", toggled.id);
    } else {
        println!("Unfavorited card {}", toggled.id);
    }
    Ok(())
}

pub fn run_delete(app: &App, deck_name: &str, card_selector: &str) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let card = app.find_card(deck.id, card_selector)?;
    app.storage.delete_card(app.profile.id, card.id)?;

    println!("Deleted card {}", card.id);
    Ok(())
}
