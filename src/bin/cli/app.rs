use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use mnemo_lib::storage::{decode_card_text, CardStorage, Deck, Flashcard, Profile};

/// Shared application state for CLI commands
pub struct App {
    pub storage: CardStorage,
    pub profile: Profile,
}

impl App {
    /// Initialize from the default (or overridden) data directory
    pub fn new(data_dir: Option<PathBuf>, profile_name: Option<&str>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => CardStorage::default_data_dir().context("Failed to get data directory")?,
        };

        let storage = CardStorage::new(data_dir);

        let profile = match profile_name {
            Some(name) => storage
                .find_profile(name)
                .with_context(|| format!("Profile '{}' not found", name))?,
            None => storage
                .default_profile()
                .context("Failed to open default profile")?,
        };

        Ok(Self { storage, profile })
    }

    /// Find a deck by name (case-insensitive prefix match)
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        let decks = self
            .storage
            .list_decks(self.profile.id)
            .context("Failed to list decks")?;

        let name_lower = name.to_lowercase();

        // Exact match first
        if let Some(deck) = decks.iter().find(|d| d.name.to_lowercase() == name_lower) {
            return Ok(deck.clone());
        }

        // Prefix match
        let matches: Vec<&Deck> = decks
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No deck matching '{}'. Available decks:\n{}",
                name,
                decks
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Find a card in a deck by id, or by case-insensitive front-text prefix
    pub fn find_card(&self, deck_id: Uuid, selector: &str) -> Result<Flashcard> {
        if let Ok(card_id) = Uuid::parse_str(selector) {
            return self
                .storage
                .get_card(self.profile.id, card_id)
                .with_context(|| format!("Card '{}' not found", selector));
        }

        let cards = self
            .storage
            .list_cards(self.profile.id, deck_id)
            .context("Failed to list cards")?;

        let selector_lower = selector.to_lowercase();
        cards
            .into_iter()
            .find(|c| {
                decode_card_text(&c.front_text)
                    .to_lowercase()
                    .starts_with(&selector_lower)
            })
            .with_context(|| format!("Card '{}' not found", selector))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn test_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let app = App::new(Some(dir.path().to_path_buf()), None).unwrap();
        (dir, app)
    }

    #[test]
    fn test_find_deck_prefers_exact_match() {
        let (_dir, app) = test_app();
        app.storage
            .create_deck(app.profile.id, "Spanish".to_string())
            .unwrap();
        app.storage
            .create_deck(app.profile.id, "Spanish Verbs".to_string())
            .unwrap();

        // "spanish" prefixes both decks but matches one exactly
        let deck = app.find_deck("spanish").unwrap();
        assert_eq!(deck.name, "Spanish");

        let deck = app.find_deck("spanish v").unwrap();
        assert_eq!(deck.name, "Spanish Verbs");
    }

    #[test]
    fn test_find_deck_rejects_ambiguous_prefix() {
        let (_dir, app) = test_app();
        app.storage
            .create_deck(app.profile.id, "Spanish".to_string())
            .unwrap();
        app.storage
            .create_deck(app.profile.id, "Spanish Verbs".to_string())
            .unwrap();

        let err = app.find_deck("span").unwrap_err();
        assert!(err.to_string().contains("Ambiguous deck name"));
    }

    #[test]
    fn test_find_deck_lists_available_on_miss() {
        let (_dir, app) = test_app();
        app.storage
            .create_deck(app.profile.id, "French".to_string())
            .unwrap();

        let err = app.find_deck("german").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("No deck matching 'german'"));
        assert!(message.contains("French"));
    }
}
