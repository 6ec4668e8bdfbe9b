//! The practice session: review filter plus circular cursor state

use rand::Rng;

use crate::storage::{Flashcard, ReviewType};

use super::shuffle::shuffle_cards;

/// Apply a review filter to a card sequence
///
/// `All` returns the input order unchanged; `Favorites` keeps the cards
/// with `favorited == true`, preserving their relative order.
pub fn filter_cards(cards: &[Flashcard], review_type: ReviewType) -> Vec<Flashcard> {
    match review_type {
        ReviewType::All => cards.to_vec(),
        ReviewType::Favorites => cards.iter().filter(|c| c.favorited).cloned().collect(),
    }
}

/// A running practice session over one deck
///
/// The session holds the latest snapshot from the store plus the filtered
/// sequence actually being practiced, a cursor into it, and the front/back
/// flip state. Snapshot delivery is authoritative: every call to
/// [`load_snapshot`](Self::load_snapshot) replaces the sequence wholesale
/// and resets the cursor and flip state, even if the user was mid-shuffle
/// or mid-navigation.
pub struct PracticeSession {
    review_type: ReviewType,
    /// Latest snapshot, sorted newest first, before filtering
    snapshot: Vec<Flashcard>,
    /// The filtered sequence the cursor moves over
    cards: Vec<Flashcard>,
    cursor: usize,
    show_front: bool,
}

impl PracticeSession {
    /// Create an empty session with the given review filter
    pub fn new(review_type: ReviewType) -> Self {
        Self {
            review_type,
            snapshot: Vec::new(),
            cards: Vec::new(),
            cursor: 0,
            show_front: true,
        }
    }

    /// Replace the session's cards with a fresh store snapshot
    ///
    /// Cards are sorted by `created_at` descending (stable, so equal
    /// timestamps keep their incoming order), then filtered by the
    /// session's review type. The cursor returns to the first card and
    /// the front side is shown.
    pub fn load_snapshot(&mut self, mut cards: Vec<Flashcard>) {
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.cards = filter_cards(&cards, self.review_type);
        self.snapshot = cards;
        self.cursor = 0;
        self.show_front = true;
    }

    /// Change the review filter, re-deriving the sequence from the last
    /// snapshot; cursor and flip state reset
    pub fn set_review_type(&mut self, review_type: ReviewType) {
        if review_type == self.review_type {
            return;
        }
        self.review_type = review_type;
        self.cards = filter_cards(&self.snapshot, review_type);
        self.cursor = 0;
        self.show_front = true;
    }

    /// Advance to the next card, wrapping to the first after the last
    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.cards.len();
        self.show_front = true;
    }

    /// Step back to the previous card, wrapping to the last from the first
    pub fn prev(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.cursor = (self.cursor + self.cards.len() - 1) % self.cards.len();
        self.show_front = true;
    }

    /// Flip the current card between front and back
    pub fn flip(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.show_front = !self.show_front;
    }

    /// Re-permute the current sequence; cursor and flip state reset
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards = shuffle_cards(&self.cards, rng);
        self.cursor = 0;
        self.show_front = true;
    }

    /// The card under the cursor, if any
    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.cursor)
    }

    pub fn review_type(&self) -> ReviewType {
        self.review_type
    }

    /// Zero-based cursor position
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn show_front(&self) -> bool {
        self.show_front
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn card(front: &str, favorited: bool, secs: i64) -> Flashcard {
        Flashcard {
            id: Uuid::new_v4(),
            deck_id: Uuid::nil(),
            front_text: front.to_string(),
            back_text: format!("{} (back)", front),
            favorited,
            created_at: at(secs),
            updated_at: at(secs),
        }
    }

    fn fronts(cards: &[Flashcard]) -> Vec<&str> {
        cards.iter().map(|c| c.front_text.as_str()).collect()
    }

    #[test]
    fn test_filter_all_is_identity() {
        let cards = vec![card("a", false, 0), card("b", true, 1)];
        let filtered = filter_cards(&cards, ReviewType::All);
        assert_eq!(fronts(&filtered), fronts(&cards));
    }

    #[test]
    fn test_filter_favorites_preserves_order() {
        let cards = vec![card("a", false, 0), card("b", true, 1), card("c", true, 2)];

        let filtered = filter_cards(&cards, ReviewType::Favorites);

        assert_eq!(fronts(&filtered), vec!["b", "c"]);
        assert!(filtered.iter().all(|c| c.favorited));
    }

    #[test]
    fn test_load_sorts_newest_first() {
        let mut session = PracticeSession::new(ReviewType::All);
        session.load_snapshot(vec![card("older", false, 1), card("newer", false, 2)]);

        assert_eq!(session.current().unwrap().front_text, "newer");
        session.next();
        assert_eq!(session.current().unwrap().front_text, "older");
    }

    #[test]
    fn test_load_applies_favorites_filter() {
        let mut session = PracticeSession::new(ReviewType::Favorites);
        session.load_snapshot(vec![card("a", false, 0), card("b", true, 1), card("c", true, 2)]);

        assert_eq!(session.len(), 2);
        assert_eq!(session.current().unwrap().front_text, "c");
    }

    #[test]
    fn test_next_wraps_around() {
        let mut session = PracticeSession::new(ReviewType::All);
        session.load_snapshot(vec![card("a", false, 2), card("b", false, 1), card("c", false, 0)]);

        // N applications of next return to the start
        for _ in 0..3 {
            session.next();
        }
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_prev_from_first_wraps_to_last() {
        let mut session = PracticeSession::new(ReviewType::All);
        session.load_snapshot(vec![card("a", false, 2), card("b", false, 1), card("c", false, 0)]);

        session.prev();
        assert_eq!(session.position(), 2);
    }

    #[test]
    fn test_next_then_prev_returns_to_position() {
        let mut session = PracticeSession::new(ReviewType::All);
        session.load_snapshot(vec![card("a", false, 2), card("b", false, 1), card("c", false, 0)]);
        session.next();

        let position = session.position();
        session.next();
        session.prev();
        assert_eq!(session.position(), position);

        session.prev();
        session.next();
        assert_eq!(session.position(), position);
    }

    #[test]
    fn test_navigation_resets_flip_state() {
        let mut session = PracticeSession::new(ReviewType::All);
        session.load_snapshot(vec![card("a", false, 1), card("b", false, 0)]);

        session.flip();
        assert!(!session.show_front());

        session.next();
        assert!(session.show_front());

        session.flip();
        session.prev();
        assert!(session.show_front());
    }

    #[test]
    fn test_flip_keeps_cursor() {
        let mut session = PracticeSession::new(ReviewType::All);
        session.load_snapshot(vec![card("a", false, 1), card("b", false, 0)]);
        session.next();

        session.flip();
        assert_eq!(session.position(), 1);
        assert!(!session.show_front());

        session.flip();
        assert!(session.show_front());
    }

    #[test]
    fn test_shuffle_resets_cursor_and_keeps_cards() {
        let mut session = PracticeSession::new(ReviewType::All);
        let cards: Vec<Flashcard> = (0..10).map(|i| card(&format!("c{}", i), false, i)).collect();
        session.load_snapshot(cards);
        for _ in 0..4 {
            session.next();
        }
        session.flip();

        let mut before: Vec<String> =
            session.cards.iter().map(|c| c.front_text.clone()).collect();

        let mut rng = StdRng::seed_from_u64(3);
        session.shuffle(&mut rng);

        assert_eq!(session.position(), 0);
        assert!(session.show_front());
        assert_eq!(session.len(), 10);

        let mut after: Vec<String> =
            session.cards.iter().map(|c| c.front_text.clone()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_session_is_a_valid_state() {
        let mut session = PracticeSession::new(ReviewType::All);

        assert!(session.is_empty());
        assert!(session.current().is_none());

        // Navigation and shuffle are no-ops, not errors
        session.next();
        session.prev();
        session.flip();
        let mut rng = StdRng::seed_from_u64(1);
        session.shuffle(&mut rng);
        assert_eq!(session.position(), 0);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_favorites_filter_can_empty_the_sequence() {
        let mut session = PracticeSession::new(ReviewType::Favorites);
        session.load_snapshot(vec![card("a", false, 0), card("b", false, 1)]);

        assert!(session.is_empty());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_snapshot_is_authoritative_over_navigation() {
        let mut session = PracticeSession::new(ReviewType::All);
        session.load_snapshot(vec![card("a", false, 1), card("b", false, 0)]);
        session.next();
        session.flip();

        session.load_snapshot(vec![card("x", false, 2), card("y", false, 1), card("z", false, 0)]);

        assert_eq!(session.position(), 0);
        assert!(session.show_front());
        assert_eq!(session.current().unwrap().front_text, "x");
    }

    #[test]
    fn test_set_review_type_refilters_last_snapshot() {
        let mut session = PracticeSession::new(ReviewType::All);
        session.load_snapshot(vec![card("a", false, 2), card("b", true, 1), card("c", true, 0)]);
        session.next();

        session.set_review_type(ReviewType::Favorites);

        assert_eq!(session.len(), 2);
        assert_eq!(session.position(), 0);
        assert!(session.current().unwrap().favorited);

        session.set_review_type(ReviewType::All);
        assert_eq!(session.len(), 3);
    }
}
