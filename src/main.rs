use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use board_2048::engine::Direction;
use board_2048::session::{Game, Status};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Parser)]
#[command(name = "play2048", version, about = "Play 2048 in the terminal (wasd / left,right,up,down)")]
struct Cli {
    /// Seed for tile spawns (omit for an entropy-seeded game)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Play a scripted sequence of direction keys instead of reading stdin, e.g. "wasdwasd"
    #[arg(long, value_name = "KEYS")]
    moves: Option<String>,

    /// Stop after this many accepted moves
    #[arg(long, value_name = "N")]
    max_moves: Option<u32>,

    /// Only print the final board
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(rng);
    if !cli.quiet {
        println!("{}", game.board());
    }

    match &cli.moves {
        Some(keys) => {
            for key in keys.chars().filter(|c| !c.is_whitespace() && *c != ',') {
                let dir = Direction::try_from(key).with_context(|| format!("bad key in --moves: {key:?}"))?;
                if !apply(&mut game, dir, &cli) {
                    break;
                }
            }
        }
        None => {
            let stdin = io::stdin();
            prompt()?;
            for line in stdin.lock().lines() {
                let line = line.context("reading stdin")?;
                let input = line.trim();
                if input.is_empty() {
                    prompt()?;
                    continue;
                }
                if matches!(input, "q" | "quit" | "exit") {
                    break;
                }
                match input.parse::<Direction>() {
                    Ok(dir) => {
                        if !apply(&mut game, dir, &cli) {
                            break;
                        }
                    }
                    Err(e) => warn!("{e}"),
                }
                prompt()?;
            }
        }
    }

    if cli.quiet {
        println!("{}", game.board());
    }
    if game.status() == Status::Over {
        println!("Game Over! Restart to play again.");
    }
    info!("moves: {}, highest tile: {}", game.moves(), game.board().highest_tile());
    Ok(())
}

/// Returns false once the session should stop taking input.
fn apply(game: &mut Game<StdRng>, dir: Direction, cli: &Cli) -> bool {
    match game.step(dir) {
        Ok(step) => {
            if step.changed && !cli.quiet {
                println!("{}", game.board());
            }
            if !step.changed {
                info!("{dir}: nothing moves");
            }
            let capped = cli.max_moves.is_some_and(|cap| game.moves() >= cap);
            step.status == Status::Playing && !capped
        }
        Err(e) => {
            warn!("{e}");
            false
        }
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush().context("flushing stdout")?;
    Ok(())
}
