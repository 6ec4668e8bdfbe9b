//! Mnemo - flashcard decks and practice sessions
//!
//! The library is split in two layers:
//! - [`storage`]: profile-scoped, file-backed storage for decks and cards,
//!   plus a watch registry that pushes full card snapshots to subscribers
//!   after every mutation.
//! - [`practice`]: the in-memory practice session (review filter, shuffle,
//!   circular cursor, flip state) fed by those snapshots.

pub mod practice;
pub mod storage;
