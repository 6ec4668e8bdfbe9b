//! Flashcard storage for Mnemo
//!
//! This module provides:
//! - Profile management (per-user scoping of all deck/card data)
//! - Deck management (one `decks.json` per profile)
//! - Flashcard CRUD (one JSON file per card)
//! - Snapshot subscriptions (full card list pushed after every mutation)

mod card_storage;
mod models;
mod watcher;

pub use card_storage::{CardStorage, StorageError};
pub use models::*;
pub use watcher::WatchHandle;
