//! Snapshot subscriptions for card collections
//!
//! Listeners register for one deck's card collection and receive the full
//! current card list after every mutation in that deck. There are no
//! deltas; each push wholly replaces whatever the listener held before
//! (last write wins).

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use super::models::Flashcard;

/// Handle returned by `subscribe`, used to cancel the subscription
#[must_use = "dropping the handle without unsubscribing leaks the listener"]
#[derive(Debug)]
pub struct WatchHandle(u64);

struct Listener {
    id: u64,
    profile_id: Uuid,
    deck_id: Uuid,
    callback: Box<dyn Fn(&[Flashcard]) + Send + Sync>,
}

struct WatcherState {
    next_id: u64,
    listeners: Vec<Arc<Listener>>,
}

/// Registry of card collection listeners, keyed by (profile, deck)
pub(crate) struct CardWatcher {
    state: Mutex<WatcherState>,
}

impl CardWatcher {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(WatcherState {
                next_id: 0,
                listeners: Vec::new(),
            }),
        }
    }

    /// Register a listener for one deck's card collection
    pub(crate) fn subscribe<F>(&self, profile_id: Uuid, deck_id: Uuid, callback: F) -> WatchHandle
    where
        F: Fn(&[Flashcard]) + Send + Sync + 'static,
    {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push(Arc::new(Listener {
            id,
            profile_id,
            deck_id,
            callback: Box::new(callback),
        }));
        WatchHandle(id)
    }

    /// Remove the listener behind a handle
    pub(crate) fn unsubscribe(&self, handle: WatchHandle) {
        let mut state = self.state.lock().unwrap();
        state.listeners.retain(|l| l.id != handle.0);
    }

    /// Push a snapshot to every listener watching this deck
    ///
    /// Matching listeners are collected first and invoked after the
    /// registry lock is released, so a callback may itself subscribe or
    /// unsubscribe.
    pub(crate) fn notify(&self, profile_id: Uuid, deck_id: Uuid, cards: &[Flashcard]) {
        let to_call: Vec<Arc<Listener>> = {
            let state = self.state.lock().unwrap();
            state
                .listeners
                .iter()
                .filter(|l| l.profile_id == profile_id && l.deck_id == deck_id)
                .cloned()
                .collect()
        };

        for listener in to_call {
            (listener.callback)(cards);
        }
    }
}
