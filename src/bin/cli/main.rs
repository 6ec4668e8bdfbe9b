mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mnemo", about = "Mnemo flashcard decks and practice CLI", version)]
struct Cli {
    /// Use a specific profile (default: the "default" profile)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Manage decks
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Manage flashcards
    #[command(subcommand)]
    Card(CardCommand),

    /// Run an interactive practice session over a deck
    Practice {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Practice only favorited cards
        #[arg(long)]
        favorites: bool,
        /// Seed for the shuffle order (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Manage profiles
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand)]
enum DeckCommand {
    /// List decks with card counts
    List,

    /// Create a new deck
    Create {
        /// Deck name
        name: String,
    },

    /// Rename a deck
    Rename {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// New name
        name: String,
    },

    /// Delete a deck and all its cards
    Delete {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },
}

#[derive(Subcommand)]
enum CardCommand {
    /// List cards in a deck
    List {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Show only favorited cards
        #[arg(long)]
        favorites: bool,
    },

    /// Add a card to a deck
    Add {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Front (prompt) text (use "-" to read from stdin)
        #[arg(long)]
        front: String,
        /// Back (answer) text (use "-" to read from stdin)
        #[arg(long)]
        back: String,
    },

    /// Edit a card's text
    Edit {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Card id, or a front-text prefix
        card: String,
        /// New front text (use "-" to read from stdin)
        #[arg(long)]
        front: Option<String>,
        /// New back text (use "-" to read from stdin)
        #[arg(long)]
        back: Option<String>,
    },

    /// Toggle a card's favorite flag
    Favorite {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Card id, or a front-text prefix
        card: String,
    },

    /// Delete a card
    Delete {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Card id, or a front-text prefix
        card: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// List profiles
    List,

    /// Create a new profile
    Create {
        /// Profile name
        name: String,
    },
}

/// Resolve "-" to text read from `input`; anything else passes through
///
/// Trailing newlines are stripped so piped text does not end every card
/// with an empty line.
fn resolve_text_from<R: std::io::Read>(value: String, input: &mut R) -> std::io::Result<String> {
    if value == "-" {
        let mut buf = String::new();
        input.read_to_string(&mut buf)?;
        while buf.ends_with('\n') {
            buf.pop();
        }
        Ok(buf)
    } else {
        Ok(value)
    }
}

/// Resolve "-" to text read from stdin
fn resolve_text(value: String) -> anyhow::Result<String> {
    Ok(resolve_text_from(value, &mut std::io::stdin())?)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir.clone(), cli.profile.as_deref())?;

    match cli.command {
        Command::Deck(cmd) => match cmd {
            DeckCommand::List => commands::deck::run_list(&app, &cli.format)?,
            DeckCommand::Create { name } => commands::deck::run_create(&app, &name, &cli.format)?,
            DeckCommand::Rename { deck, name } => commands::deck::run_rename(&app, &deck, &name)?,
            DeckCommand::Delete { deck } => commands::deck::run_delete(&app, &deck)?,
        },
        Command::Card(cmd) => match cmd {
            CardCommand::List { deck, favorites } => {
                commands::card::run_list(&app, &deck, favorites, &cli.format)?
            }
            CardCommand::Add { deck, front, back } => {
                if front == "-" && back == "-" {
                    anyhow::bail!("Only one of --front/--back can read from stdin");
                }
                let front = resolve_text(front)?;
                let back = resolve_text(back)?;
                commands::card::run_add(&app, &deck, &front, &back, &cli.format)?
            }
            CardCommand::Edit { deck, card, front, back } => {
                if front.as_deref() == Some("-") && back.as_deref() == Some("-") {
                    anyhow::bail!("Only one of --front/--back can read from stdin");
                }
                let front = front.map(resolve_text).transpose()?;
                let back = back.map(resolve_text).transpose()?;
                commands::card::run_edit(&app, &deck, &card, front.as_deref(), back.as_deref())?
            }
            CardCommand::Favorite { deck, card } => {
                commands::card::run_favorite(&app, &deck, &card)?
            }
            CardCommand::Delete { deck, card } => commands::card::run_delete(&app, &deck, &card)?,
        },
        Command::Practice { deck, favorites, seed } => {
            commands::practice::run(&app, &deck, favorites, seed)?
        }
        Command::Profile(cmd) => match cmd {
            ProfileCommand::List => commands::profile::run_list(&app, &cli.format)?,
            ProfileCommand::Create { name } => commands::profile::run_create(&app, &name)?,
        },
    }

    Ok(())
}
