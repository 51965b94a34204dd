//! Per-hand and per-game result records.

use serde::{Deserialize, Serialize};

use super::{Outcome, PlayerId};
use crate::french::Rank;

/// A snapshot of one player's holdings, taken after a hand's award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player: PlayerId,
    /// Total cards held, across both piles.
    pub total_cards: u8,
    /// Cards held per rank, indexed by [`Rank::index`].
    pub rank_counts: [u8; 13],
}

impl PlayerRecord {
    pub fn rank_count(&self, rank: Rank) -> u8 {
        self.rank_counts[rank.index()]
    }
}

/// The result of one hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    /// One-based hand number within the game.
    pub hand_index: u32,
    /// The player awarded the pot, or `None` if every contender ran out of
    /// cards mid-war and the pot was abandoned.
    pub winner: Option<PlayerId>,
    /// The number of cards in the pot.
    pub pot: u8,
    /// The number of war rounds fought.
    pub wars: u8,
    /// Every player's holdings after the award, in seating order.
    pub players: Vec<PlayerRecord>,
}

/// The final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub total_hands: u32,
    pub outcome: Outcome,
}

/// Callback interface for consumers of per-hand results.
pub trait HandObserver {
    /// Called once per hand, after the pot is awarded.
    fn on_hand(&mut self, record: &HandRecord);

    /// Called once, when the game terminates.
    fn on_game_over(&mut self, record: &GameRecord);
}

/// An observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl HandObserver for NullObserver {
    fn on_hand(&mut self, _: &HandRecord) {}
    fn on_game_over(&mut self, _: &GameRecord) {}
}
