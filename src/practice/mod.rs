//! Practice sessions over a deck's flashcards
//!
//! This module provides:
//! - The review filter (`all` vs `favorites`)
//! - An unbiased Fisher-Yates shuffle over the current sequence
//! - The session itself: a circular cursor with front/back flip state,
//!   fed by full card snapshots from the storage layer

pub mod session;
pub mod shuffle;

pub use session::{filter_cards, PracticeSession};
pub use shuffle::shuffle_cards;
