//! Trick and war resolution state.

use std::fmt::Display;

use super::PlayerId;
use crate::french::{Card, Rank};

/// A trick being resolved.
///
/// Face-up cards for the current round are kept per player, alongside the
/// best rank seen so far and the players tied at that rank. When a war
/// breaks out, [`prepare_for_war`](Trick::prepare_for_war) pools every
/// face-up card (winners and losers alike) into the face-down pool, and a
/// fresh round of plays begins. The trick is resolved once exactly one
/// player remains at the top.
#[derive(Debug, Clone, Default)]
pub struct Trick {
    /// Face-up cards for the current round, one per contributing player.
    primary: Vec<(PlayerId, Card)>,
    /// Face-down cards: war stakes, plus face-up cards pooled from earlier
    /// rounds of this trick.
    bonus: Vec<Card>,
    /// The best rank among this round's face-up cards.
    leading: Option<Rank>,
    /// Players whose face-up cards share the leading rank.
    tied: Vec<PlayerId>,
}

impl Display for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (player, card)) in self.primary.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "p{player}:{card}")?;
        }
        write!(f, "]")?;
        if !self.bonus.is_empty() {
            write!(f, " +{} face down", self.bonus.len())?;
        }
        Ok(())
    }
}

impl Trick {
    /// Plays a face-up card for the given player.
    ///
    /// A strictly higher rank takes the lead and resets the tie set; an
    /// equal rank joins it. A lower rank stays in the pot but is out of
    /// contention. Suit never breaks ties.
    pub fn add_primary(&mut self, player: PlayerId, card: Card) {
        if self.leading.map_or(true, |r| card.rank.value() > r.value()) {
            self.leading = Some(card.rank);
            self.tied.clear();
        }
        if self.leading == Some(card.rank) {
            self.tied.push(player);
        }
        self.primary.push((player, card));
    }

    /// Plays a face-down card. Its rank is never compared.
    pub fn add_bonus(&mut self, card: Card) {
        self.bonus.push(card);
    }

    /// True if more than one player is tied for the lead.
    pub fn is_war(&self) -> bool {
        self.tied.len() > 1
    }

    /// Pools every face-up card into the face-down pool and resets the
    /// round, ready for new plays.
    pub fn prepare_for_war(&mut self) {
        self.bonus.extend(self.primary.drain(..).map(|(_, card)| card));
        self.leading = None;
        self.tied.clear();
    }

    /// The winning player, once a round has ended with a single leader.
    /// `None` while a war is unresolved, or if nobody contributed a card.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.tied[..] {
            [player] => Some(player),
            _ => None,
        }
    }

    /// The total number of cards in the pot.
    pub fn len(&self) -> usize {
        self.primary.len() + self.bonus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the trick, yielding every card in the pot.
    pub fn into_pot(self) -> Vec<Card> {
        let mut pot: Vec<Card> = self.primary.into_iter().map(|(_, card)| card).collect();
        pot.extend(self.bonus);
        pot
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn trick(plays: &[&str]) -> Trick {
        let mut trick = Trick::default();
        for (player, play) in plays.iter().enumerate() {
            trick.add_primary(player, play.parse().unwrap());
        }
        trick
    }

    #[test]
    fn test_single_round_winner() {
        struct Case {
            plays: &'static [&'static str],
            expect: Option<PlayerId>,
        }

        fn case(plays: &'static [&'static str], expect: Option<PlayerId>) -> Case {
            Case { plays, expect }
        }

        let cases = [
            case(&["9s"], Some(0)),
            case(&["9s", "ts"], Some(1)),
            case(&["ts", "9s"], Some(0)),
            case(&["2c", "ah", "kd"], Some(1)),
            case(&["ks", "kh"], None),
            case(&["ks", "kh", "2d"], None),
            case(&["2d", "ks", "kh"], None),
            case(&["as", "ah", "kd"], None),
        ];
        for case in cases {
            let trick = trick(case.plays);
            assert_eq!(trick.winner(), case.expect, "{trick}");
            assert_eq!(trick.is_war(), case.expect.is_none() && !trick.is_empty());
        }
    }

    #[test]
    fn test_war_pools_all_primaries() {
        // Player 2's losing deuce goes into the pool along with the kings.
        let mut trick = trick(&["ks", "kh", "2d"]);
        assert!(trick.is_war());
        trick.prepare_for_war();
        assert_eq!(trick.winner(), None);
        assert!(!trick.is_war());
        assert_eq!(trick.len(), 3);

        // New round: stakes, then fresh face-up cards for everyone.
        trick.add_bonus("3c".parse().unwrap());
        trick.add_bonus("4c".parse().unwrap());
        trick.add_primary(0, "qh".parse().unwrap());
        trick.add_primary(1, "7s".parse().unwrap());
        trick.add_primary(2, "2s".parse().unwrap());
        assert_eq!(trick.winner(), Some(0));

        let pot = trick.into_pot();
        assert_eq!(pot.len(), 8);
    }

    #[test]
    fn test_repeated_war() {
        let mut trick = trick(&["ks", "kh"]);
        trick.prepare_for_war();
        trick.add_primary(0, "qs".parse().unwrap());
        trick.add_primary(1, "qh".parse().unwrap());
        assert!(trick.is_war());
        trick.prepare_for_war();
        trick.add_primary(0, "2s".parse().unwrap());
        trick.add_primary(1, "3h".parse().unwrap());
        assert_eq!(trick.winner(), Some(1));
        assert_eq!(trick.into_pot().len(), 6);
    }

    #[test]
    fn test_empty_round_has_no_winner() {
        let mut trick = trick(&["as", "ah"]);
        trick.prepare_for_war();
        // Neither player could afford a new face-up card.
        assert_eq!(trick.winner(), None);
        assert!(!trick.is_war());
        assert_eq!(trick.len(), 2);
    }
}
