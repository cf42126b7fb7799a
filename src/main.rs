//! Corner-contact tile placement
//!
//! Command-line front end for the rules engine. Lists the piece catalog, or
//! plays out a game where every player takes the first legal move the oracle
//! finds, then prints the final board and the cells each player has left.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use corners::geometry::distinct_orientations;
use corners::grid::{format_board, DEFAULT_BOARD_SIZE};
use corners::pieces::{CATALOG, MAX_PLAYERS};
use corners::{Game, GameConfig};

/// Rules engine for a corner-contact polyomino placement game.
#[derive(Parser)]
#[command(name = "corners")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the piece catalog with orientation counts.
    Pieces,
    /// Play a full game taking the first legal move each turn.
    Simulate {
        /// Side length of the board.
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        /// Number of players (1 to 4).
        #[arg(long, default_value_t = MAX_PLAYERS)]
        players: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Pieces) => {
            print!("{}", format_catalog());
            Ok(())
        }
        Some(Command::Simulate { size, players }) => run_simulation(GameConfig {
            board_size: size,
            player_count: players,
        }),
        None => run_simulation(GameConfig::default()),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders every catalog piece with its orientation count.
fn format_catalog() -> String {
    let mut output = String::new();
    for entry in &CATALOG {
        let orientations = distinct_orientations(entry.shape).len();
        output.push_str(&format!(
            "{:<2} {:<3} cells={} orientations={}\n",
            entry.id,
            entry.name,
            entry.size(),
            orientations
        ));

        let width = entry.shape.iter().map(|&(x, _)| x).max().unwrap_or(0) + 1;
        let height = entry.shape.iter().map(|&(_, y)| y).max().unwrap_or(0) + 1;
        for y in 0..height {
            output.push_str("   ");
            for x in 0..width {
                output.push(if entry.shape.contains(&(x, y)) { '#' } else { '.' });
            }
            output.push('\n');
        }
    }
    output
}

/// Plays until no active player can move, then reports the result.
fn run_simulation(config: GameConfig) -> Result<()> {
    let mut game = Game::new(config).context("invalid game configuration")?;
    info!(?config, "simulating");

    while !game.conclude_if_over() {
        let Some(player) = game.current_player() else {
            break;
        };
        match game.first_legal_move(player) {
            Some(mv) => {
                game.place(player, mv)
                    .with_context(|| format!("oracle move {mv:?} was refused"))?;
            }
            None => game.pass(player)?,
        }
    }

    print!("{}", format_board(game.board()));
    println!("placements: {}", game.history().len());
    for state in game.players() {
        println!(
            "player {} pieces left={} cells left={}",
            state.id(),
            state.available().len(),
            state.remaining_cells()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_listing_starts_with_small_pieces() {
        let listing = format_catalog();
        insta::assert_snapshot!(listing.lines().take(9).collect::<Vec<_>>().join("\n"), @r"
        1  I1  cells=1 orientations=1
           #
        2  I2  cells=2 orientations=2
           ##
        3  I3  cells=3 orientations=2
           ###
        4  V3  cells=3 orientations=4
           ##
           #.
        ");
    }

    #[test]
    fn test_simulation_runs_to_completion() {
        run_simulation(GameConfig {
            board_size: 8,
            player_count: 2,
        })
        .unwrap();
    }

    #[test]
    fn test_cli_parses_simulate_flags() {
        let cli = Cli::parse_from(["corners", "simulate", "--size", "10", "--players", "2"]);
        assert!(matches!(
            cli.command,
            Some(Command::Simulate {
                size: 10,
                players: 2
            })
        ));
    }
}
