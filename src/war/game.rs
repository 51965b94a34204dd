//! Game management.
//!
//! A game consists of a sequence of hands, each resolving one [`Trick`]
//! through any number of war rounds. The game ends as soon as any player
//! runs out of cards.

use std::collections::HashSet;
use std::fmt::Display;

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    GameError, GameRecord, Hand, HandObserver, HandRecord, NullObserver, PlayerRecord, Trick,
};
use crate::french::Deck;

/// Identifies a player by seating order.
pub type PlayerId = usize;

/// The outcome of a game.
///
/// War only defines a winner when termination leaves a single player with
/// cards. With three or more players, the first elimination can leave
/// several survivors; no winner is guessed among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Exactly one player still held cards at the end.
    Winner(PlayerId),
    /// The players still holding cards when the first player ran out.
    Survivors(Vec<PlayerId>),
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "player {player} wins"),
            Outcome::Survivors(players) if players.is_empty() => {
                write!(f, "no winner, every contender ran out of cards")
            }
            Outcome::Survivors(players) => {
                let players = players.iter().map(|p| format!("player {p}")).join(", ");
                write!(f, "no single winner, {players} survive")
            }
        }
    }
}

/// A game of War.
#[derive(Debug, Clone)]
pub struct Game {
    /// Every player's hand, in seating order.
    players: Vec<Hand>,
    /// The number of hands played so far. War rounds within a hand do not
    /// count.
    hand_count: u32,
}

impl Game {
    /// Creates a new game: validates the deck, shuffles it, and deals an
    /// equal share to each player. With a 52-card deck and two players that
    /// is the classic 26/26 split; when the player count does not divide 52,
    /// the remainder is left undealt.
    pub fn new<R: Rng + ?Sized>(
        num_players: usize,
        mut deck: Deck,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if num_players < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        if deck.len() < 52 {
            return Err(GameError::IncompleteDeck);
        }
        let unique: HashSet<_> = deck.iter().collect();
        if unique.len() != deck.len() {
            return Err(GameError::DuplicateCard);
        }
        let share = deck.len() / num_players;
        if share < 2 {
            return Err(GameError::TooManyPlayers);
        }
        deck.shuffle(rng);
        let mut players = Vec::with_capacity(num_players);
        for _ in 0..num_players {
            let mut hand = Hand::default();
            hand.deal(deck.take(share))?;
            players.push(hand);
        }
        Ok(Self {
            players,
            hand_count: 0,
        })
    }

    /// Creates a game from pre-dealt hands.
    pub fn from_hands(players: Vec<Hand>) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        Ok(Self {
            players,
            hand_count: 0,
        })
    }

    /// Plays one hand to resolution and awards the pot, returning a snapshot
    /// of every player's holdings. The hand count advances by exactly one,
    /// no matter how many war rounds were fought.
    pub fn play_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<HandRecord, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.hand_count += 1;

        let mut trick = Trick::default();
        let mut wars = 0u8;
        for id in 0..self.players.len() {
            if let Some(card) = self.players[id].play_one(rng) {
                trick.add_primary(id, card);
            }
        }
        while trick.is_war() {
            wars = wars.saturating_add(1);
            trick.prepare_for_war();
            // A player who already exhausted their cards this trick stakes
            // zero, which forces the stake to zero for everyone.
            let stake = self
                .players
                .iter()
                .map(Hand::war_stake)
                .min()
                .expect("at least two players");
            for id in 0..self.players.len() {
                for _ in 0..stake {
                    if let Some(card) = self.players[id].play_one(rng) {
                        trick.add_bonus(card);
                    }
                }
                // A player with nothing left to play cedes the trick; their
                // cards already in the pot stay there.
                if let Some(card) = self.players[id].play_one(rng) {
                    trick.add_primary(id, card);
                }
            }
        }

        let winner = trick.winner();
        let pot = u8::try_from(trick.len()).expect("pot fits one deck");
        match winner {
            Some(player) => self.players[player].receive(trick.into_pot()),
            // Every contender ran out of cards mid-war. The pot is dead, and
            // so is the game.
            None => debug_assert!(self.is_over()),
        }
        Ok(self.hand_record(winner, pot, wars))
    }

    /// Plays hands until the game ends, feeding each result to the
    /// observer, and returns the final record.
    pub fn run<R, O>(&mut self, rng: &mut R, observer: &mut O) -> Result<GameRecord, GameError>
    where
        R: Rng + ?Sized,
        O: HandObserver,
    {
        while !self.is_over() {
            let record = self.play_hand(rng)?;
            observer.on_hand(&record);
        }
        let record = GameRecord {
            total_hands: self.hand_count,
            outcome: self.outcome().expect("game is over"),
        };
        observer.on_game_over(&record);
        Ok(record)
    }

    /// Plays the game out with no observer.
    pub fn run_to_end<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GameRecord, GameError> {
        self.run(rng, &mut NullObserver)
    }

    /// True once any player is out of cards.
    pub fn is_over(&self) -> bool {
        self.players.iter().any(|p| !p.is_alive())
    }

    /// The outcome, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_over() {
            return None;
        }
        let live: Vec<PlayerId> = (0..self.players.len())
            .filter(|&id| self.players[id].is_alive())
            .collect();
        Some(if live.len() == 1 {
            Outcome::Winner(live[0])
        } else {
            Outcome::Survivors(live)
        })
    }

    /// The number of hands played so far.
    pub fn hand_count(&self) -> u32 {
        self.hand_count
    }

    /// The players' hands, in seating order.
    pub fn players(&self) -> &[Hand] {
        &self.players
    }

    /// One player's hand.
    pub fn player(&self, id: PlayerId) -> &Hand {
        &self.players[id]
    }

    fn hand_record(&self, winner: Option<PlayerId>, pot: u8, wars: u8) -> HandRecord {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(player, hand)| PlayerRecord {
                player,
                total_cards: u8::try_from(hand.len()).expect("hand fits one deck"),
                rank_counts: hand.rank_counts(),
            })
            .collect();
        HandRecord {
            hand_index: self.hand_count,
            winner,
            pot,
            wars,
            players,
        }
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::french::Card;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn cards(specs: &[&str]) -> Vec<Card> {
        specs.iter().map(|s| s.parse().unwrap()).collect()
    }

    /// Builds a hand whose draw pile plays in the listed order.
    fn hand(specs: &[&str]) -> Hand {
        let mut hand = Hand::default();
        hand.deal(cards(specs).into_iter().rev()).unwrap();
        hand
    }

    fn game(hands: &[&[&str]]) -> Game {
        Game::from_hands(hands.iter().map(|specs| hand(specs)).collect()).unwrap()
    }

    fn total_cards(game: &Game) -> usize {
        game.players().iter().map(Hand::len).sum()
    }

    #[test]
    fn test_new_deals_evenly() {
        let game = Game::new(2, Deck::standard(), &mut rng()).unwrap();
        assert_eq!(game.players().len(), 2);
        assert_eq!(game.player(0).len(), 26);
        assert_eq!(game.player(1).len(), 26);
        assert!(!game.is_over());
        assert_eq!(game.outcome(), None);

        let game = Game::new(3, Deck::standard(), &mut rng()).unwrap();
        assert_eq!(game.player(0).len(), 17);
        assert_eq!(total_cards(&game), 51);
    }

    #[test]
    fn test_new_validates() {
        let mut rng = rng();
        assert_matches!(
            Game::new(1, Deck::standard(), &mut rng),
            Err(GameError::NotEnoughPlayers)
        );
        assert_matches!(
            Game::new(27, Deck::standard(), &mut rng),
            Err(GameError::TooManyPlayers)
        );

        let mut short = Deck::standard();
        short.take(1);
        assert_matches!(
            Game::new(2, short, &mut rng),
            Err(GameError::IncompleteDeck)
        );

        let king: Card = "ks".parse().unwrap();
        let dupes: Deck = std::iter::repeat(king).take(52).collect();
        assert_matches!(
            Game::new(2, dupes, &mut rng),
            Err(GameError::DuplicateCard)
        );
    }

    #[test]
    fn test_plain_hand() {
        let mut game = game(&[&["ah", "2c"], &["ks", "2d"]]);
        let record = game.play_hand(&mut rng()).unwrap();
        assert_eq!(record.hand_index, 1);
        assert_eq!(record.winner, Some(0));
        assert_eq!(record.pot, 2);
        assert_eq!(record.wars, 0);
        assert_eq!(game.player(0).len(), 3);
        assert_eq!(game.player(1).len(), 1);
    }

    #[test]
    fn test_war() {
        // Kings collide; each player stakes three cards, then player 0's
        // queen beats player 1's seven. The whole pot changes hands.
        let mut game = game(&[
            &["ks", "2c", "3c", "4c", "qh"],
            &["kh", "2d", "3d", "4d", "7h"],
        ]);
        let record = game.play_hand(&mut rng()).unwrap();
        assert_eq!(record.winner, Some(0));
        assert_eq!(record.wars, 1);
        assert_eq!(record.pot, 10);
        assert_eq!(game.player(0).len(), 10);
        assert_eq!(game.player(1).len(), 0);
        assert_eq!(game.hand_count(), 1);
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(Outcome::Winner(0)));
    }

    #[test]
    fn test_war_stake_limited_by_poorest_player() {
        // Player 0 enters the war holding a single card, so nobody stakes
        // anything; both play their next card face up immediately.
        let mut game = game(&[&["ks", "ah"], &["kc", "2d", "3d", "4d", "5d"]]);
        let record = game.play_hand(&mut rng()).unwrap();
        assert_eq!(record.winner, Some(0));
        assert_eq!(record.wars, 1);
        assert_eq!(record.pot, 4);
        assert_eq!(game.player(0).len(), 4);
        assert_eq!(game.player(1).len(), 3);
        assert!(!game.is_over());
    }

    #[test]
    fn test_war_exhaustion_cedes_trick() {
        // Player 0 ties but has nothing left for the new face-up round;
        // player 1 takes the pot uncontested.
        let mut game = game(&[&["ks"], &["kc", "2d"]]);
        let record = game.play_hand(&mut rng()).unwrap();
        assert_eq!(record.winner, Some(1));
        assert_eq!(record.pot, 3);
        assert_eq!(game.player(0).len(), 0);
        assert_eq!(game.player(1).len(), 3);
        assert_eq!(game.outcome(), Some(Outcome::Winner(1)));
    }

    #[test]
    fn test_exhausted_contender_forces_zero_stake() {
        // Player 0 ties with their very last card. Even though player 1
        // could afford three bonus cards, the empty hand across the table
        // forces the stake to zero, so player 1 wins with a bare face-up
        // card and the pot stays at three.
        let mut game = game(&[&["ks"], &["kc", "2d", "3d", "4d", "5d"]]);
        let record = game.play_hand(&mut rng()).unwrap();
        assert_eq!(record.winner, Some(1));
        assert_eq!(record.wars, 1);
        assert_eq!(record.pot, 3);
        assert_eq!(game.player(0).len(), 0);
        assert_eq!(game.player(1).len(), 6);
        assert_eq!(game.outcome(), Some(Outcome::Winner(1)));
    }

    #[test]
    fn test_simultaneous_exhaustion() {
        // Both players tie with their last card. Nobody can fight the war,
        // so the pot is dead and the game ends with no winner.
        let mut game = game(&[&["ks"], &["kc"]]);
        let record = game.play_hand(&mut rng()).unwrap();
        assert_eq!(record.winner, None);
        assert_eq!(record.pot, 2);
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(Outcome::Survivors(vec![])));
    }

    #[test]
    fn test_first_elimination_ends_game() {
        // Three players; player 0 plays their only card and loses. The game
        // stops immediately, leaving two survivors.
        let mut game = game(&[&["2c"], &["5h", "6h"], &["ad", "kd"]]);
        let record = game.play_hand(&mut rng()).unwrap();
        assert_eq!(record.winner, Some(2));
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(Outcome::Survivors(vec![1, 2])));
        assert_matches!(game.play_hand(&mut rng()), Err(GameError::GameOver));
    }

    #[test]
    fn test_card_conservation() {
        let mut rng = rng();
        let mut game = Game::new(2, Deck::standard(), &mut rng).unwrap();
        while !game.is_over() {
            let record = game.play_hand(&mut rng).unwrap();
            if record.winner.is_some() {
                assert_eq!(total_cards(&game), 52, "hand {}", record.hand_index);
            }
            assert_eq!(record.hand_index, game.hand_count());
        }
    }

    #[test]
    fn test_termination_is_reproducible() {
        let mut first = None;
        for _ in 0..2 {
            let mut rng = rng();
            let mut game = Game::new(2, Deck::standard(), &mut rng).unwrap();
            let record = game.run_to_end(&mut rng).unwrap();
            assert!(game.is_over());
            assert!(record.total_hands > 0);
            assert_matches!(record.outcome, Outcome::Winner(_) | Outcome::Survivors(_));
            match first {
                None => first = Some(record),
                Some(ref expect) => assert_eq!(*expect, record),
            }
        }
    }

    #[test]
    fn test_run_feeds_observer() {
        struct Counter {
            hands: u32,
            games: u32,
        }
        impl HandObserver for Counter {
            fn on_hand(&mut self, record: &HandRecord) {
                self.hands += 1;
                assert_eq!(record.hand_index, self.hands);
            }
            fn on_game_over(&mut self, record: &GameRecord) {
                self.games += 1;
                assert_eq!(record.total_hands, self.hands);
            }
        }

        let mut rng = rng();
        let mut counter = Counter { hands: 0, games: 0 };
        let mut game = Game::new(2, Deck::standard(), &mut rng).unwrap();
        let record = game.run(&mut rng, &mut counter).unwrap();
        assert_eq!(counter.games, 1);
        assert_eq!(counter.hands, record.total_hands);
    }
}
