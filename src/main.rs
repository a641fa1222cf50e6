use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use npuzzle::{Board, Solver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Find a shortest solution to an N×N sliding puzzle
#[derive(Parser, Debug)]
#[command(name = "npuzzle", version, long_about = None)]
struct Cli {
    /// Puzzle file: the dimension N followed by N² tiles, 0 for the blank. `-` reads stdin
    #[arg(required_unless_present = "random", conflicts_with = "random")]
    input: Option<PathBuf>,

    /// Solve a random board of this dimension instead of reading one
    #[arg(long, value_name = "N")]
    random: Option<usize>,

    /// With --random, walk K slides away from the goal instead of shuffling
    #[arg(long, value_name = "K", requires = "random")]
    scramble: Option<usize>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Print only the number of moves
    #[arg(short, long)]
    quiet: bool,

    /// Disable terminal styling
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let initial = load_board(&cli)?;

    if !cli.quiet {
        println!("Initial board:\n{}", render(&initial, None, cli.plain));
    }

    info!(dimension = initial.dimension(), "solving");
    let solver = Solver::new(initial);
    info!(stats = ?solver.stats(), "done");

    let (Some(path), Some(steps)) = (solver.solution(), solver.steps()) else {
        println!("No solution possible");
        return Ok(());
    };

    println!("Minimum number of moves = {}", steps.len());
    if cli.quiet {
        return Ok(());
    }

    for (pair, step) in path.windows(2).zip(steps) {
        let (before, after) = (&pair[0], &pair[1]);
        let (row, col) = before.blank();
        let moved = after.tile(row, col);
        println!("{} {}\n{}", moved, step, render(after, Some(moved), cli.plain));
    }

    Ok(())
}

fn load_board(cli: &Cli) -> Result<Board> {
    if let Some(n) = cli.random {
        if n == 0 {
            bail!("--random needs a dimension of at least 1");
        }
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = match cli.scramble {
            Some(steps) => Board::scrambled(n, steps, &mut rng),
            None => Board::shuffled(n, &mut rng),
        };
        return Ok(board);
    }

    let Some(path) = cli.input.as_ref() else {
        bail!("no input given");
    };
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read board from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    text.parse::<Board>()
        .with_context(|| format!("invalid board in {}", path.display()))
}

/// Board text with the tile that just moved in bold and the blank dimmed.
struct Styled<'a> {
    board: &'a Board,
    moved: Option<u32>,
}

impl fmt::Display for Styled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.board.dimension();
        writeln!(f, "{}", n)?;
        for row in 0..n {
            for col in 0..n {
                let value = self.board.tile(row, col);
                let cell = format!("{:2}", value);
                if value == 0 {
                    write!(f, "{} ", cell.dark_grey())?;
                } else if Some(value) == self.moved {
                    write!(f, "{} ", cell.bold())?;
                } else {
                    write!(f, "{} ", cell)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn render(board: &Board, moved: Option<u32>, plain: bool) -> String {
    if plain {
        board.to_string()
    } else {
        Styled { board, moved }.to_string()
    }
}
