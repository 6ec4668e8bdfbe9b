//! Interactive practice loop
//!
//! The session is driven by two event sources sharing one loop: user
//! commands read from stdin, and card snapshots pushed by the storage
//! subscription. Snapshots are drained before each prompt and are
//! authoritative; a favorite toggled mid-session reaches the session only
//! through the subscription echo, never as a local edit.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use mnemo_lib::practice::PracticeSession;
use mnemo_lib::storage::{decode_card_text, Flashcard, ReviewType};

use crate::app::App;

pub fn run(app: &App, deck_name: &str, favorites: bool, seed: Option<u64>) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let review_type = if favorites {
        ReviewType::Favorites
    } else {
        ReviewType::All
    };

    let mut session = PracticeSession::new(review_type);

    let (tx, rx) = mpsc::channel::<Vec<Flashcard>>();
    let handle = app.storage.subscribe(app.profile.id, deck.id, move |cards| {
        let _ = tx.send(cards.to_vec());
    });

    session.load_snapshot(app.storage.list_cards(app.profile.id, deck.id)?);

    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("{} flashcards: {}", session.review_type(), deck.name);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        // Latest snapshot wins
        while let Ok(cards) = rx.try_recv() {
            session.load_snapshot(cards);
        }

        match session.current() {
            None => println!("No flashcards selected to practice"),
            Some(card) => {
                let side = if session.show_front() { "Front" } else { "Back" };
                let marker = if card.favorited { " *" } else { "" };
                let text = if session.show_front() {
                    &card.front_text
                } else {
                    &card.back_text
                };
                println!();
                println!("{} of {} flashcards", session.position() + 1, session.len());
                println!("[{}{}]", side, marker);
                println!("{}", decode_card_text(text));
            }
        }

        print!("(n)ext (p)rev (f)lip (s)huffle fa(v) (q)uit > ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match line.trim() {
            "n" | "next" => session.next(),
            "p" | "prev" => session.prev(),
            "f" | "flip" => session.flip(),
            "s" | "shuffle" => session.shuffle(&mut rng),
            "v" | "fav" => match session.current().map(|c| c.id) {
                Some(card_id) => {
                    // The session picks the change up from the snapshot
                    // echo on the next iteration
                    if let Err(err) = app.storage.toggle_favorited(app.profile.id, card_id) {
                        log::error!("Failed to toggle favorite: {}", err);
                        println!("Could not update favorite; try again.");
                    }
                }
                None => log::warn!("No card under the cursor to favorite"),
            },
            "q" | "quit" => break,
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }

    app.storage.unsubscribe(handle);
    Ok(())
}
