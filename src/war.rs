//! The game of War.
//!
//! ## Gameplay
//!
//! Every player is dealt an equal share of a shuffled deck. Each hand, every
//! player with cards remaining reveals their top card; the highest rank takes
//! every card on the table. Suits never matter.
//!
//! When two or more players tie for the highest rank, a war breaks out. All
//! cards played so far are pooled face-down, and every player still holding
//! cards stakes a number of face-down cards followed by one new face-up card.
//! The stake is the smallest number anyone at the table can afford, at most
//! three and always keeping one card back for the face-up play; a player with
//! no cards left forces the stake to zero. Wars repeat until a
//! single player holds the highest card, and that player takes the entire
//! pool. A player who runs out of cards mid-war stops contributing and cannot
//! win the hand.
//!
//! Cards won are kept face-down in a separate pile; when a player's draw pile
//! runs dry, the won pile is shuffled and becomes the new draw pile. The game
//! ends as soon as any player is out of cards.
//!
//! ## State management
//!
//! [`Game`] owns one [`Hand`] per player and drives one [`Trick`] to
//! resolution per call to [`play_hand`](Game::play_hand). After each hand it
//! produces a [`HandRecord`] snapshot, and at termination a [`GameRecord`];
//! external consumers receive both through the [`HandObserver`] callback.

mod error;
mod game;
mod hand;
mod record;
mod trick;

pub use self::error::GameError;
pub use self::game::{Game, Outcome, PlayerId};
pub use self::hand::Hand;
pub use self::record::{GameRecord, HandObserver, HandRecord, NullObserver, PlayerRecord};
pub use self::trick::Trick;
