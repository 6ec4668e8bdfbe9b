//! Fisher-Yates shuffle
//!
//! For index `i` from `len - 1` down to `1`, draw a uniform `j` in
//! `[0, i]` and swap the elements at `i` and `j`. Given a uniform random
//! source this produces every one of the `len!` orderings with equal
//! probability.

use rand::Rng;

/// Return a fresh permutation of `items`; the input is left untouched
pub fn shuffle_cards<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
