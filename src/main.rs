//! Flood-It solver CLI
//!
//! Thin shell over the library: build boards from compact strings, seeds,
//! or dataset files, run the chosen strategy, print the solutions. Also
//! carries an interactive play mode and a strategy comparison harness.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use floodit::{engine, Color, FloodError, Game, GameBoard, Point, StartPos, Strategy};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a single board given as a compact string
    Solve {
        /// The board: size² base-35 digits (0-9, A-Y), row-major
        board: String,
        /// Strategy: astar_a, astar_ias, astar_ia, astar_iaf or astar_iaff
        #[arg(short, long, default_value = "astar_a")]
        strategy: String,
        /// Start position: upper-left, upper-right, lower-left,
        /// lower-right or middle
        #[arg(long, default_value = "upper-left")]
        start: String,
        /// Bound the frontier; nodes beyond this are triaged greedily
        #[arg(long)]
        queue_cutoff: Option<usize>,
    },
    /// Solve every board in a dataset file (one compact board per line)
    Dataset {
        file: PathBuf,
        #[arg(short, long, default_value = "astar_iaf")]
        strategy: String,
        #[arg(long, default_value = "upper-left")]
        start: String,
        /// Where to write the solutions; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Mark solutions longer than this cap as "game not won"
        #[arg(long)]
        max_steps: Option<u32>,
        #[arg(long)]
        queue_cutoff: Option<usize>,
    },
    /// Generate deterministic boards from a seed
    Generate {
        seed: String,
        #[arg(long, default_value_t = 14)]
        size: usize,
        #[arg(long, default_value_t = 6)]
        colors: u8,
        /// Boards to emit; board i uses seed "<seed>-<i>" when above 1
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Play a board interactively in the terminal
    Play {
        /// Compact board string; a seeded board is generated when omitted
        board: Option<String>,
        #[arg(long, default_value = "random")]
        seed: String,
        #[arg(long, default_value_t = 14)]
        size: usize,
        #[arg(long, default_value_t = 6)]
        colors: u8,
        #[arg(long, default_value = "upper-left")]
        start: String,
    },
    /// Run every strategy over a batch of seeded boards and tabulate
    Compare {
        #[arg(long, default_value = "bench")]
        seed: String,
        #[arg(long, default_value_t = 10)]
        size: usize,
        #[arg(long, default_value_t = 6)]
        colors: u8,
        #[arg(long, default_value_t = 20)]
        count: usize,
        #[arg(long)]
        queue_cutoff: Option<usize>,
    },
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), FloodError> {
    match cli.command {
        Command::Solve {
            board,
            strategy,
            start,
            queue_cutoff,
        } => {
            let strategy: Strategy = strategy.parse()?;
            let start: StartPos = start.parse()?;
            let board = GameBoard::from_compact_string(&board, start, None)?;
            let solution = engine::solve(&board, strategy, queue_cutoff)?;
            println!("{}", solution.moves_string());
            println!(
                "{} moves, {} expansions, {} ms",
                solution.len(),
                solution.expanded,
                solution.time_ms
            );
        }
        Command::Dataset {
            file,
            strategy,
            start,
            out,
            max_steps,
            queue_cutoff,
        } => {
            let strategy: Strategy = strategy.parse()?;
            let start: StartPos = start.parse()?;
            let output = solve_dataset(&file, strategy, start, max_steps, queue_cutoff)?;
            match out {
                Some(path) => fs::write(path, output)?,
                None => print!("{output}"),
            }
        }
        Command::Generate {
            seed,
            size,
            colors,
            count,
        } => {
            for i in 0..count {
                let board_seed = if count == 1 {
                    seed.clone()
                } else {
                    format!("{seed}-{i}")
                };
                let board =
                    GameBoard::from_seed(&board_seed, size, colors, StartPos::UpperLeft)?;
                println!("{}", board.compact_string());
            }
        }
        Command::Play {
            board,
            seed,
            size,
            colors,
            start,
        } => {
            let start: StartPos = start.parse()?;
            let board = match board {
                Some(compact) => GameBoard::from_compact_string(&compact, start, None)?,
                None => GameBoard::from_seed(&seed, size, colors, start)?,
            };
            play(Arc::new(board))?;
        }
        Command::Compare {
            seed,
            size,
            colors,
            count,
            queue_cutoff,
        } => compare(&seed, size, colors, count, queue_cutoff)?,
    }
    Ok(())
}

/// Interactive play loop: one color per turn, 'h' asks the solver for a
/// hint, 'q' quits.
fn play(board: Arc<GameBoard>) -> Result<(), FloodError> {
    let mut game = Game::new(Arc::clone(&board));
    loop {
        println!("{}", render(&game));
        println!(
            "moves: {}/{}   sensible: {}",
            game.moves().len(),
            board.maximum_steps(),
            game.sensible_moves()
                .iter()
                .map(|c| c.to_char())
                .collect::<String>()
        );

        if game.is_won() {
            let verdict = if game.moves().len() as u32 <= board.maximum_steps() {
                "won"
            } else {
                "flooded, but over the step cap"
            };
            println!("{} in {} moves: {}", verdict, game.moves().len(), game.moves_string());
            return Ok(());
        }

        print!("color to play ('h' hint, 'q' quit): ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(());
        }
        match input.trim() {
            "q" => return Ok(()),
            "h" => {
                let solution = engine::solve_from_partial(&game, Strategy::InadmissibleFast, None)?;
                match solution.moves.get(game.moves().len()) {
                    Some(next) => println!("hint: {next} (finishes in {} total)", solution.len()),
                    None => println!("hint: nothing left to play"),
                }
            }
            text => match text.chars().next().map(Color::from_char) {
                Some(Ok(color)) => match game.make_move(color) {
                    Ok(next) => game = next,
                    Err(err) => println!("{err}"),
                },
                _ => println!("enter a color digit, 'h' or 'q'"),
            },
        }
    }
}

/// Grid rendering with ANSI background colors; flooded cells are marked.
fn render(game: &Game) -> String {
    let board = game.board();
    let mut out = String::new();
    for y in 0..board.board_size() as u16 {
        for x in 0..board.board_size() as u16 {
            let p = Point::new(x, y);
            let color = board.cell(p);
            let code = 41 + (color.value() - 1) % 7;
            let flooded = game.state().filled.get(board.node_at(p).id as usize);
            let mark = if flooded { '*' } else { color.to_char() };
            out.push_str(&format!("\x1b[{code}m{mark} \x1b[0m"));
        }
        out.push('\n');
    }
    out
}

/// Solve `count` seeded boards with every strategy and print the totals
/// side by side.
fn compare(
    seed: &str,
    size: usize,
    colors: u8,
    count: usize,
    queue_cutoff: Option<usize>,
) -> Result<(), FloodError> {
    let boards = (0..count)
        .map(|i| GameBoard::from_seed(&format!("{seed}-{i}"), size, colors, StartPos::UpperLeft))
        .collect::<Result<Vec<_>, _>>()?;
    println!(
        "{count} boards, {size}x{size}, {colors} colors (seed {seed:?})\n"
    );
    println!(
        "{:<11} {:>12} {:>14} {:>10}",
        "strategy", "total moves", "expansions", "time ms"
    );
    for strategy in Strategy::ALL {
        let results = engine::solve_all(&boards, strategy, queue_cutoff);
        let mut moves = 0usize;
        let mut expanded = 0u64;
        let mut time_ms = 0u64;
        let mut failed = 0usize;
        for result in results {
            match result {
                Ok(solution) => {
                    moves += solution.len();
                    expanded += solution.expanded;
                    time_ms += solution.time_ms;
                }
                Err(err) => {
                    log::warn!("{strategy}: {err}");
                    failed += 1;
                }
            }
        }
        let note = if failed > 0 {
            format!("  ({failed} failed)")
        } else {
            String::new()
        };
        println!(
            "{:<11} {:>12} {:>14} {:>10}{note}",
            strategy.identifier(),
            moves,
            expanded,
            time_ms
        );
    }
    Ok(())
}

/// Solve all boards of a dataset file; one output line per board, input
/// order preserved. Board errors and over-cap solutions become the legacy
/// "game not won" marker instead of aborting the batch.
fn solve_dataset(
    file: &PathBuf,
    strategy: Strategy,
    start: StartPos,
    max_steps: Option<u32>,
    queue_cutoff: Option<usize>,
) -> Result<String, FloodError> {
    let content = fs::read_to_string(file)?;
    let mut boards = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match GameBoard::from_compact_string(line, start, max_steps) {
            Ok(board) => boards.push(Some(board)),
            Err(err) => {
                log::warn!("line {}: {err}", line_no + 1);
                boards.push(None);
            }
        }
    }

    // One result slot per input line, unparseable boards included, so the
    // output stays aligned with the dataset by construction.
    let results: Vec<Option<Result<engine::Solution, FloodError>>> = {
        use rayon::prelude::*;
        boards
            .par_iter()
            .map(|board| {
                board
                    .as_ref()
                    .map(|board| engine::solve(board, strategy, queue_cutoff))
            })
            .collect()
    };

    let mut lines = String::new();
    let mut total_moves = 0usize;
    let mut won = 0usize;
    for (board, result) in boards.iter().zip(results) {
        let line = match result {
            None => "game not won".to_string(),
            Some(Ok(solution)) => {
                if max_steps.is_some_and(|cap| solution.len() > cap as usize) {
                    "game not won".to_string()
                } else {
                    won += 1;
                    total_moves += solution.len();
                    solution.moves_string()
                }
            }
            Some(Err(err)) => {
                if let Some(board) = board {
                    log::warn!("board {}: {err}", board.compact_string());
                }
                "game not won".to_string()
            }
        };
        lines.push_str(&line);
        lines.push('\n');
    }
    log::info!(
        "dataset: {} boards, {} won, {} total moves",
        boards.len(),
        won,
        total_moves
    );
    Ok(lines)
}
