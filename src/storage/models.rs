//! Data models for profiles, decks and flashcards

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A profile scopes all deck and card data to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A deck is a named collection of flashcards belonging to a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    /// Derived count, recomputed from the card files on every deck list
    /// refresh; never trusted from disk.
    #[serde(default)]
    pub card_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            card_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A flashcard with front (prompt) and back (answer) text
///
/// Text fields are stored with `<br>` markers in place of literal
/// newlines; see [`encode_card_text`] and [`decode_card_text`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front_text: String,
    pub back_text: String,
    #[serde(default)]
    pub favorited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(deck_id: Uuid, front_text: String, back_text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            deck_id,
            front_text,
            back_text,
            favorited: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filter mode for a practice session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    /// Every card in the deck
    All,
    /// Only cards with `favorited == true`
    Favorites,
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Favorites => write!(f, "favorites"),
        }
    }
}

/// Replace literal newlines with `<br>` markers for storage
pub fn encode_card_text(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Replace stored `<br>` markers with literal newlines for display
pub fn decode_card_text(text: &str) -> String {
    text.replace("<br>", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_card_text() {
        assert_eq!(encode_card_text("uno\ndos"), "uno<br>dos");
        assert_eq!(encode_card_text("no breaks"), "no breaks");
    }

    #[test]
    fn test_decode_card_text() {
        assert_eq!(decode_card_text("uno<br>dos"), "uno\ndos");
        assert_eq!(decode_card_text(&encode_card_text("a\nb\nc")), "a\nb\nc");
    }

    #[test]
    fn test_review_type_display() {
        assert_eq!(ReviewType::All.to_string(), "all");
        assert_eq!(ReviewType::Favorites.to_string(), "favorites");
    }
}
