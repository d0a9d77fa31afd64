//! Random self-play driver for profiling move generation.
//!
//! Usage: `profile [rows] [playouts] [seed]`. Build with `--features hotpath`
//! to get per-function timings for the instrumented board operations.

use flipstone::game::Game;
use flipstone::outcome::GameOutcome;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_ROWS: usize = 8;
const DEFAULT_PLAYOUTS: usize = 1000;
const DEFAULT_SEED: u64 = 42;

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, default: T, name: &str) -> Result<T, String> {
    match arg {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("invalid {}: {:?}", name, raw)),
    }
}

fn parse_args() -> Result<(usize, usize, u64), String> {
    let mut args = std::env::args().skip(1);
    let rows = parse_arg(args.next(), DEFAULT_ROWS, "rows")?;
    let playouts = parse_arg(args.next(), DEFAULT_PLAYOUTS, "playouts")?;
    let seed = parse_arg(args.next(), DEFAULT_SEED, "seed")?;
    Ok((rows, playouts, seed))
}

#[cfg_attr(feature = "hotpath", hotpath::main)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (rows, playouts, seed) = match parse_args() {
        Ok(values) => values,
        Err(message) => {
            tracing::error!("{}", message);
            eprintln!("usage: profile [rows] [playouts] [seed]");
            return ExitCode::FAILURE;
        }
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let (mut first_wins, mut second_wins, mut draws) = (0usize, 0usize, 0usize);
    let mut total_moves = 0usize;

    for _ in 0..playouts {
        let mut game = match Game::new(rows, rows) {
            Ok(game) => game,
            Err(err) => {
                tracing::error!(%err, "cannot create board");
                return ExitCode::FAILURE;
            }
        };

        while !game.is_over() {
            let moves = game.legal_moves();
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            game.make_move(mv);
        }

        total_moves += game.move_count();
        match game.outcome() {
            Some(GameOutcome::FirstWin) => first_wins += 1,
            Some(GameOutcome::SecondWin) => second_wins += 1,
            Some(GameOutcome::Draw) | None => draws += 1,
        }
    }

    tracing::info!(
        rows,
        playouts,
        seed,
        first_wins,
        second_wins,
        draws,
        avg_moves = total_moves as f64 / playouts.max(1) as f64,
        "random playouts finished"
    );

    ExitCode::SUCCESS
}
