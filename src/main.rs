use ansi_term::Style;
use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod args;
mod french;
mod stats;
mod war;

use self::args::{Args, Format};
use self::french::Deck;
use self::stats::Recorder;
use self::war::{Game, GameRecord, HandObserver, HandRecord};

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut recorder = Recorder::default();
    for i in 0..args.games {
        // Every game gets fresh players and a fresh deal; only the RNG is
        // shared across the run.
        let mut game = Game::new(args.players, Deck::standard(), &mut rng)?;
        if args.verbose && i == 0 {
            print_deal(&game);
            let mut trace = Trace {
                inner: &mut recorder,
            };
            game.run(&mut rng, &mut trace)?;
        } else {
            game.run(&mut rng, &mut recorder)?;
        }
    }

    let stats = recorder.finish();
    match args.format.unwrap_or_default() {
        Format::Text => print!("{stats}"),
        Format::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), &stats)?;
            println!();
        }
    }
    Ok(())
}

fn print_deal(game: &Game) {
    for (id, hand) in game.players().iter().enumerate() {
        let cards = hand
            .cards()
            .map(|c| c.to_ansi_string().to_string())
            .join(" ");
        println!("player {id} was dealt: {cards}");
    }
}

/// An observer that narrates the game while forwarding every record to the
/// statistics recorder.
struct Trace<'a> {
    inner: &'a mut Recorder,
}

impl HandObserver for Trace<'_> {
    fn on_hand(&mut self, record: &HandRecord) {
        let totals = record
            .players
            .iter()
            .map(|p| p.total_cards.to_string())
            .join("/");
        match record.winner {
            Some(winner) if record.wars > 0 => println!(
                "hand {}: player {winner} takes {} cards after {} war(s)  [{totals}]",
                record.hand_index, record.pot, record.wars
            ),
            Some(winner) => println!(
                "hand {}: player {winner} takes {} cards  [{totals}]",
                record.hand_index, record.pot
            ),
            None => println!(
                "hand {}: nobody can fight the war, {} cards are dead  [{totals}]",
                record.hand_index, record.pot
            ),
        }
        self.inner.on_hand(record);
    }

    fn on_game_over(&mut self, record: &GameRecord) {
        let summary = format!("{} after {} hands", record.outcome, record.total_hands);
        println!("{}", Style::new().bold().paint(summary));
        self.inner.on_game_over(record);
    }
}
