//! Command-line driver for the chess rules engine.
//!
//! Runs perft counts, replays move lists and validates piece-set
//! configurations without any board rendering.

use anyhow::{bail, Context};
use chess_core::{Move, PieceId};
use chess_rules::{perft_divide, EngineConfig, Game, MoveOutcome};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-rules")]
#[command(about = "Data-driven chess rules engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count move-tree leaf nodes from the starting position
    Perft {
        /// Search depth in plies
        #[arg(short, long, default_value = "3")]
        depth: u32,
        /// Piece-set configuration (defaults to standard chess)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Play a list of moves and report the final state
    Replay {
        /// Piece-set configuration (defaults to standard chess)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Moves in coordinate notation; promotions as e7e8=5
        moves: Vec<String>,
    },
    /// Validate a piece-set configuration file
    Check {
        /// Configuration file to validate
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Perft { depth, config } => {
            let game = load_game(config.as_deref())?;
            let start = Instant::now();
            let divide = perft_divide(&game, depth);
            let total: u64 = divide.iter().map(|(_, n)| n).sum();

            for (m, nodes) in &divide {
                println!("{m}: {nodes}");
            }
            println!();
            println!("Nodes: {total}");
            tracing::info!(depth, total, elapsed = ?start.elapsed(), "perft finished");
        }
        Commands::Replay { config, moves } => {
            let mut game = load_game(config.as_deref())?;
            for (ply, token) in moves.iter().enumerate() {
                let (m, promotion) = parse_token(token)?;
                play(&mut game, m, promotion)
                    .with_context(|| format!("ply {}: {}", ply + 1, token))?;
            }

            let state = game.state();
            println!("Phase: {:?}", state.phase);
            println!("Side to move: {}", state.side_to_move);
            println!("Legal moves: {}", state.legal_moves.count());
            if let Some(winner) = state.winner() {
                println!("Winner: {winner}");
            }
        }
        Commands::Check { path } => {
            let config = EngineConfig::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let game = Game::from_config(&config)
                .with_context(|| format!("Invalid configuration {}", path.display()))?;

            for def in game.registry().iter() {
                let critical = if def.critical { " (critical)" } else { "" };
                println!("{}: {}{}", def.id, def.name, critical);
            }
            println!(
                "{} to move, {} legal moves, {:?}",
                game.side_to_move(),
                game.legal_moves().count(),
                game.phase()
            );
        }
    }

    Ok(())
}

fn load_game(config: Option<&Path>) -> anyhow::Result<Game> {
    match config {
        Some(path) => {
            let config = EngineConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Ok(Game::from_config(&config)?)
        }
        None => Ok(Game::standard()),
    }
}

/// Splits `e7e8=5` into the move and the promotion identity.
fn parse_token(token: &str) -> anyhow::Result<(Move, Option<PieceId>)> {
    let (mv, promotion) = match token.split_once('=') {
        Some((mv, id)) => {
            let raw: u8 = id
                .parse()
                .with_context(|| format!("Invalid promotion identity in '{token}'"))?;
            match PieceId::new(raw) {
                Some(id) if !id.is_empty() => (mv, Some(id)),
                _ => bail!("Promotion identity {raw} is out of range in '{token}'"),
            }
        }
        None => (token, None),
    };
    let m = mv
        .parse::<Move>()
        .with_context(|| format!("Invalid move '{token}'"))?;
    Ok((m, promotion))
}

fn play(game: &mut Game, m: Move, promotion: Option<PieceId>) -> anyhow::Result<()> {
    match (game.attempt(m), promotion) {
        (MoveOutcome::Rejected, _) => bail!("illegal move {m} in phase {:?}", game.phase()),
        (MoveOutcome::Played, None) => Ok(()),
        (MoveOutcome::Played, Some(_)) => bail!("move {m} does not promote"),
        (MoveOutcome::PromotionPending, Some(id)) => Ok(game.choose_promotion(m.to, id)?),
        (MoveOutcome::PromotionPending, None) => {
            bail!("move {m} promotes; write it as {m}=<identity>")
        }
    }
}
