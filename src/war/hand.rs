//! Player hand state.

use rand::prelude::*;

use super::GameError;
use crate::french::{Card, Rank};

/// One player's cards.
///
/// Cards live in two piles: a draw pile played from the top, and a pile of
/// cards won from tricks. When the draw pile runs dry, the won pile is
/// shuffled in. A per-rank count of all cards held is maintained
/// incrementally, so snapshots after each hand are cheap.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    /// The draw pile; the back is the next card to play.
    draw: Vec<Card>,
    /// Cards won from tricks, face-down.
    pile: Vec<Card>,
    /// Cards held per rank, across both piles, indexed by [`Rank::index`].
    rank_counts: [u8; 13],
}

impl Hand {
    /// Deals the initial cards. Only valid on an empty hand.
    pub fn deal<I: IntoIterator<Item = Card>>(&mut self, cards: I) -> Result<(), GameError> {
        if self.is_alive() {
            return Err(GameError::Redeal);
        }
        self.draw = cards.into_iter().collect();
        self.rank_counts = [0; 13];
        for card in &self.draw {
            self.rank_counts[card.rank.index()] += 1;
        }
        Ok(())
    }

    /// Removes and returns the next card to play, shuffling the won pile
    /// into the draw pile if the draw pile is empty. Returns `None` iff the
    /// player is out of cards.
    pub fn play_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.draw.is_empty() {
            self.pile.shuffle(rng);
            std::mem::swap(&mut self.draw, &mut self.pile);
        }
        let card = self.draw.pop()?;
        self.rank_counts[card.rank.index()] -= 1;
        Some(card)
    }

    /// Adds won cards to the pile.
    pub fn receive<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            self.rank_counts[card.rank.index()] += 1;
            self.pile.push(card);
        }
    }

    /// True while the player still holds any card.
    pub fn is_alive(&self) -> bool {
        !self.draw.is_empty() || !self.pile.is_empty()
    }

    /// The number of face-down cards this player can stake on a war: three
    /// when they can afford it, fewer when short, always keeping one card
    /// back for the new face-up play, and zero when out of cards.
    pub fn war_stake(&self) -> usize {
        self.len().saturating_sub(1).min(3)
    }

    /// Total cards held, across both piles.
    pub fn len(&self) -> usize {
        self.draw.len() + self.pile.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_alive()
    }

    /// The number of cards of the given rank held, across both piles.
    pub fn rank_count(&self, rank: Rank) -> u8 {
        self.rank_counts[rank.index()]
    }

    /// The per-rank counts, indexed by [`Rank::index`].
    pub fn rank_counts(&self) -> [u8; 13] {
        self.rank_counts
    }

    /// Iterates over all cards held, in no meaningful order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.draw.iter().chain(self.pile.iter())
    }
}
