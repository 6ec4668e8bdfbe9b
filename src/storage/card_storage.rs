//! Storage operations for profiles, decks and flashcards
//!
//! Directory structure:
//! ```text
//! <data-dir>/
//! ├── profiles.json                  # Array of all profiles
//! └── profiles/
//!     └── {profile-id}/
//!         ├── decks.json             # Array of the profile's decks
//!         └── cards/
//!             └── {card-id}.json     # Individual card files
//! ```
//!
//! Every card mutation re-lists the affected deck and pushes the full
//! snapshot to the subscribers registered via [`CardStorage::subscribe`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::models::*;
use super::watcher::CardWatcher;
use super::WatchHandle;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage manager for all flashcard data
pub struct CardStorage {
    /// Base data directory (e.g. ~/.local/share/mnemo)
    base_path: PathBuf,
    watcher: CardWatcher,
}

impl CardStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            watcher: CardWatcher::new(),
        }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mnemo"))
            .ok_or(StorageError::DataDirNotFound)
    }

    // ==================== Paths ====================

    fn profiles_path(&self) -> PathBuf {
        self.base_path.join("profiles.json")
    }

    fn profile_dir(&self, profile_id: Uuid) -> PathBuf {
        self.base_path.join("profiles").join(profile_id.to_string())
    }

    fn decks_path(&self, profile_id: Uuid) -> PathBuf {
        self.profile_dir(profile_id).join("decks.json")
    }

    fn cards_dir(&self, profile_id: Uuid) -> PathBuf {
        self.profile_dir(profile_id).join("cards")
    }

    fn card_path(&self, profile_id: Uuid, card_id: Uuid) -> PathBuf {
        self.cards_dir(profile_id).join(format!("{}.json", card_id))
    }

    /// Initialize storage for a profile
    fn init_profile_dirs(&self, profile_id: Uuid) -> Result<()> {
        fs::create_dir_all(self.cards_dir(profile_id))?;

        let decks_path = self.decks_path(profile_id);
        if !decks_path.exists() {
            let empty_decks: Vec<Deck> = Vec::new();
            write_json(&decks_path, &empty_decks)?;
        }

        Ok(())
    }

    // ==================== Profile Operations ====================

    /// List all profiles
    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        let profiles_path = self.profiles_path();
        if !profiles_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&profiles_path)?;
        let profiles: Vec<Profile> = serde_json::from_str(&content)?;
        Ok(profiles)
    }

    /// Create a new profile
    pub fn create_profile(&self, name: String) -> Result<Profile> {
        fs::create_dir_all(&self.base_path)?;

        let profile = Profile::new(name);

        let mut profiles = self.list_profiles()?;
        profiles.push(profile.clone());
        write_json(&self.profiles_path(), &profiles)?;

        self.init_profile_dirs(profile.id)?;

        Ok(profile)
    }

    /// Find a profile by name (case-insensitive)
    pub fn find_profile(&self, name: &str) -> Result<Profile> {
        self.list_profiles()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| StorageError::ProfileNotFound(name.to_string()))
    }

    /// Get the default profile, creating it on first use
    pub fn default_profile(&self) -> Result<Profile> {
        match self.find_profile("default") {
            Ok(profile) => Ok(profile),
            Err(StorageError::ProfileNotFound(_)) => self.create_profile("default".to_string()),
            Err(err) => Err(err),
        }
    }

    // ==================== Deck Operations ====================

    /// List all decks in a profile, most recently created first
    ///
    /// `card_count` is recomputed from the card files on every call.
    pub fn list_decks(&self, profile_id: Uuid) -> Result<Vec<Deck>> {
        let decks_path = self.decks_path(profile_id);
        if !decks_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&decks_path)?;
        let mut decks: Vec<Deck> = serde_json::from_str(&content)?;

        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        for card in self.list_all_cards(profile_id)? {
            *counts.entry(card.deck_id).or_insert(0) += 1;
        }
        for deck in &mut decks {
            deck.card_count = counts.get(&deck.id).copied().unwrap_or(0);
        }

        decks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(decks)
    }

    /// Get a specific deck
    pub fn get_deck(&self, profile_id: Uuid, deck_id: Uuid) -> Result<Deck> {
        let decks = self.list_decks(profile_id)?;
        decks
            .into_iter()
            .find(|d| d.id == deck_id)
            .ok_or(StorageError::DeckNotFound(deck_id))
    }

    /// Create a new deck
    pub fn create_deck(&self, profile_id: Uuid, name: String) -> Result<Deck> {
        self.init_profile_dirs(profile_id)?;

        let deck = Deck::new(name);

        let mut decks = self.read_decks_raw(profile_id)?;
        decks.push(deck.clone());
        write_json(&self.decks_path(profile_id), &decks)?;

        Ok(deck)
    }

    /// Rename a deck
    pub fn rename_deck(&self, profile_id: Uuid, deck_id: Uuid, name: String) -> Result<Deck> {
        let mut decks = self.read_decks_raw(profile_id)?;
        let pos = decks
            .iter()
            .position(|d| d.id == deck_id)
            .ok_or(StorageError::DeckNotFound(deck_id))?;

        decks[pos].name = name;
        decks[pos].updated_at = Utc::now();
        let deck = decks[pos].clone();

        write_json(&self.decks_path(profile_id), &decks)?;
        Ok(deck)
    }

    /// Delete a deck and all its cards
    pub fn delete_deck(&self, profile_id: Uuid, deck_id: Uuid) -> Result<()> {
        let mut decks = self.read_decks_raw(profile_id)?;
        if !decks.iter().any(|d| d.id == deck_id) {
            return Err(StorageError::DeckNotFound(deck_id));
        }

        for card in self.list_cards(profile_id, deck_id)? {
            fs::remove_file(self.card_path(profile_id, card.id))?;
        }

        decks.retain(|d| d.id != deck_id);
        write_json(&self.decks_path(profile_id), &decks)?;

        self.notify_deck(profile_id, deck_id);
        Ok(())
    }

    /// Read decks.json without recomputing counts or sorting
    fn read_decks_raw(&self, profile_id: Uuid) -> Result<Vec<Deck>> {
        let decks_path = self.decks_path(profile_id);
        if !decks_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&decks_path)?;
        let decks: Vec<Deck> = serde_json::from_str(&content)?;
        Ok(decks)
    }

    // ==================== Card Operations ====================

    /// List all cards in a deck, most recently created first
    pub fn list_cards(&self, profile_id: Uuid, deck_id: Uuid) -> Result<Vec<Flashcard>> {
        let mut cards: Vec<Flashcard> = self
            .list_all_cards(profile_id)?
            .into_iter()
            .filter(|c| c.deck_id == deck_id)
            .collect();

        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cards)
    }

    /// List all cards in a profile (across all decks)
    fn list_all_cards(&self, profile_id: Uuid) -> Result<Vec<Flashcard>> {
        let cards_dir = self.cards_dir(profile_id);
        if !cards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut cards = Vec::new();
        for entry in fs::read_dir(&cards_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                let card: Flashcard = serde_json::from_str(&content)?;
                cards.push(card);
            }
        }

        Ok(cards)
    }

    /// Get a specific card
    pub fn get_card(&self, profile_id: Uuid, card_id: Uuid) -> Result<Flashcard> {
        let card_path = self.card_path(profile_id, card_id);
        if !card_path.exists() {
            return Err(StorageError::CardNotFound(card_id));
        }

        let content = fs::read_to_string(&card_path)?;
        let card: Flashcard = serde_json::from_str(&content)?;
        Ok(card)
    }

    /// Create a new card in a deck
    ///
    /// Front/back text is taken as entered; newlines are encoded to `<br>`
    /// markers before the card is written.
    pub fn create_card(
        &self,
        profile_id: Uuid,
        deck_id: Uuid,
        front_text: &str,
        back_text: &str,
    ) -> Result<Flashcard> {
        // Reject cards for decks that do not exist
        self.get_deck(profile_id, deck_id)?;

        let card = Flashcard::new(
            deck_id,
            encode_card_text(front_text),
            encode_card_text(back_text),
        );
        write_json(&self.card_path(profile_id, card.id), &card)?;

        self.notify_deck(profile_id, deck_id);
        Ok(card)
    }

    /// Update a card's front and/or back text
    pub fn update_card_text(
        &self,
        profile_id: Uuid,
        card_id: Uuid,
        front_text: Option<&str>,
        back_text: Option<&str>,
    ) -> Result<Flashcard> {
        let mut card = self.get_card(profile_id, card_id)?;

        if let Some(front) = front_text {
            card.front_text = encode_card_text(front);
        }
        if let Some(back) = back_text {
            card.back_text = encode_card_text(back);
        }
        card.updated_at = Utc::now();

        write_json(&self.card_path(profile_id, card_id), &card)?;

        self.notify_deck(profile_id, card.deck_id);
        Ok(card)
    }

    /// Toggle a card's favorited flag
    ///
    /// Like the text edit path this is a plain point update, but it does
    /// not bump `updated_at`: favoriting is not an edit.
    pub fn toggle_favorited(&self, profile_id: Uuid, card_id: Uuid) -> Result<Flashcard> {
        let mut card = self.get_card(profile_id, card_id)?;
        card.favorited = !card.favorited;

        write_json(&self.card_path(profile_id, card_id), &card)?;

        self.notify_deck(profile_id, card.deck_id);
        Ok(card)
    }

    /// Delete a card
    pub fn delete_card(&self, profile_id: Uuid, card_id: Uuid) -> Result<()> {
        let card = self.get_card(profile_id, card_id)?;

        fs::remove_file(self.card_path(profile_id, card_id))?;

        self.notify_deck(profile_id, card.deck_id);
        Ok(())
    }

    // ==================== Subscriptions ====================

    /// Subscribe to a deck's card collection
    ///
    /// The callback receives the full, freshly sorted card list after every
    /// mutation in the deck, on the mutating thread.
    pub fn subscribe<F>(&self, profile_id: Uuid, deck_id: Uuid, callback: F) -> WatchHandle
    where
        F: Fn(&[Flashcard]) + Send + Sync + 'static,
    {
        self.watcher.subscribe(profile_id, deck_id, callback)
    }

    /// Cancel a subscription
    pub fn unsubscribe(&self, handle: WatchHandle) {
        self.watcher.unsubscribe(handle);
    }

    /// Push the deck's current cards to its subscribers
    ///
    /// Called after a successful mutation; a failure to re-list the deck is
    /// logged rather than surfaced, since the mutation itself went through.
    fn notify_deck(&self, profile_id: Uuid, deck_id: Uuid) {
        match self.list_cards(profile_id, deck_id) {
            Ok(cards) => self.watcher.notify(profile_id, deck_id, &cards),
            Err(err) => log::error!("Failed to load cards for snapshot push: {}", err),
        }
    }
}

/// Write a JSON file atomically (write to .tmp, then rename)
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
