//! Aggregate statistics over simulated games.
//!
//! A pure fold over the stream of per-hand records the engine emits. No
//! storage engine is involved; callers serialize [`Stats`] if they want to
//! keep it.

use std::collections::BTreeMap;
use std::fmt::Display;

use delegate::delegate;
use serde::Serialize;

use crate::french::Rank;
use crate::war::{GameRecord, HandObserver, HandRecord, Outcome, PlayerId};

/// Accumulated results across games.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    /// Games recorded.
    games: u32,
    /// Hands played, across all games.
    total_hands: u64,
    /// Games won, per player.
    wins: BTreeMap<PlayerId, u32>,
    /// Games that ended with no single winner.
    ambiguous: u32,
    /// Per rank: the sum of `total_cards` at the moment a player first held
    /// all four cards of that rank, and the number of games where it
    /// happened.
    completion_sums: [u64; 13],
    completion_games: [u32; 13],
}

impl Stats {
    /// Folds one finished game into the totals.
    fn record_game(&mut self, record: &GameRecord, completion: &[Option<u8>; 13]) {
        self.games += 1;
        self.total_hands += u64::from(record.total_hands);
        match &record.outcome {
            Outcome::Winner(player) => *self.wins.entry(*player).or_default() += 1,
            Outcome::Survivors(_) => self.ambiguous += 1,
        }
        for (idx, held) in completion.iter().enumerate() {
            if let Some(total_cards) = held {
                self.completion_sums[idx] += u64::from(*total_cards);
                self.completion_games[idx] += 1;
            }
        }
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    /// The mean number of hands per game.
    pub fn average_hands(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_hands as f64 / f64::from(self.games)
    }

    /// Games won by the given player.
    pub fn wins(&self, player: PlayerId) -> u32 {
        self.wins.get(&player).copied().unwrap_or_default()
    }

    /// Games that ended with no single winner.
    pub fn ambiguous(&self) -> u32 {
        self.ambiguous
    }

    /// The mean `total_cards` held at the moment a player first collected
    /// all four cards of the given rank. `None` if it never happened.
    pub fn completion_average(&self, rank: Rank) -> Option<f64> {
        let idx = rank.index();
        match self.completion_games[idx] {
            0 => None,
            games => Some(self.completion_sums[idx] as f64 / f64::from(games)),
        }
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} games have been played, with an average length of {:.1} hands",
            self.games,
            self.average_hands()
        )?;
        for (player, wins) in &self.wins {
            writeln!(f, "player {player} won {wins} games")?;
        }
        if self.ambiguous > 0 {
            writeln!(f, "{} games ended with no single winner", self.ambiguous)?;
        }
        writeln!(
            f,
            "Average number of cards held when first getting all four of a rank:"
        )?;
        for &rank in Rank::all_ranks() {
            match self.completion_average(rank) {
                Some(avg) => writeln!(f, "{rank},{avg:.1}")?,
                None => writeln!(f, "{rank},-")?,
            }
        }
        Ok(())
    }
}

/// A [`HandObserver`] that watches one game at a time and folds finished
/// games into [`Stats`].
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    stats: Stats,
    /// Per rank: `total_cards` of the first player to hold all four cards
    /// of that rank in the current game.
    completion: [Option<u8>; 13],
}

impl HandObserver for Recorder {
    fn on_hand(&mut self, record: &HandRecord) {
        for player in &record.players {
            for (idx, &count) in player.rank_counts.iter().enumerate() {
                if count == 4 && self.completion[idx].is_none() {
                    self.completion[idx] = Some(player.total_cards);
                }
            }
        }
    }

    fn on_game_over(&mut self, record: &GameRecord) {
        self.stats.record_game(record, &self.completion);
        self.completion = [None; 13];
    }
}

impl Recorder {
    delegate! {
        to self.stats {
            pub fn games(&self) -> u32;
            pub fn average_hands(&self) -> f64;
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Consumes the recorder, yielding the accumulated statistics.
    pub fn finish(self) -> Stats {
        self.stats
    }
}
