//! Solver entry points and batch dispatch
//!
//! Thin facade over the search stack: pick a strategy, run one solve to
//! completion, read back the move sequence with its statistics. Batches of
//! independent boards fan out over a worker pool; boards never share state,
//! so one failing board only costs its own slot in the results.

use std::time::Instant;

use log::info;
use rayon::prelude::*;

use crate::board::{Color, GameBoard};
use crate::error::FloodError;
use crate::eval::Strategy;
use crate::search::AStarSolver;
use crate::state::Game;

/// A solved board: the move sequence plus search statistics.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Colors to play, in order.
    pub moves: Vec<Color>,
    /// Positions expanded by the search.
    pub expanded: u64,
    /// Wall-clock time of the solve in milliseconds.
    pub time_ms: u64,
}

impl Solution {
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The moves as a compact solution string (base-35 digits).
    pub fn moves_string(&self) -> String {
        self.moves.iter().map(|c| c.to_char()).collect()
    }
}

/// Solve a board from its start position.
///
/// `queue_cutoff` bounds the frontier; `None` leaves it unbounded, which
/// with [`Strategy::Admissible`] makes the result provably shortest.
pub fn solve(
    board: &GameBoard,
    strategy: Strategy,
    queue_cutoff: Option<usize>,
) -> Result<Solution, FloodError> {
    let started = Instant::now();
    let mut solver = AStarSolver::new(board, strategy, queue_cutoff);
    let moves = solver.run()?;
    let solution = Solution {
        moves,
        expanded: solver.expanded(),
        time_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        "{} solved {}x{} ({} regions) in {} moves, {} expansions, {} ms",
        strategy,
        board.board_size(),
        board.board_size(),
        board.node_count(),
        solution.len(),
        solution.expanded,
        solution.time_ms
    );
    Ok(solution)
}

/// Continue a partially played game to a win.
///
/// The returned sequence includes the already-played prefix, so it is a
/// complete solution for the game's board.
pub fn solve_from_partial(
    game: &Game,
    strategy: Strategy,
    queue_cutoff: Option<usize>,
) -> Result<Solution, FloodError> {
    let started = Instant::now();
    let mut solver = AStarSolver::new(game.board(), strategy, queue_cutoff);
    let rest = solver.run_from(game.state())?;
    let mut moves = game.moves().to_vec();
    moves.extend(rest);
    Ok(Solution {
        moves,
        expanded: solver.expanded(),
        time_ms: started.elapsed().as_millis() as u64,
    })
}

/// Solve many boards in parallel; one result slot per board, order
/// preserved. Failures stay per-board.
pub fn solve_all(
    boards: &[GameBoard],
    strategy: Strategy,
    queue_cutoff: Option<usize>,
) -> Vec<Result<Solution, FloodError>> {
    boards
        .par_iter()
        .map(|board| solve(board, strategy, queue_cutoff))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StartPos;
    use std::sync::Arc;

    fn replay_wins(board: &Arc<GameBoard>, moves: &[Color]) -> bool {
        let mut game = Game::new(Arc::clone(board));
        for &color in moves {
            match game.make_move(color) {
                Ok(next) => game = next,
                Err(_) => return false,
            }
        }
        game.is_won()
    }

    #[test]
    fn test_solve_returns_winning_solution() {
        let board = Arc::new(GameBoard::from_seed("engine", 8, 4, StartPos::UpperLeft).unwrap());
        let solution = solve(&board, Strategy::Admissible, None).unwrap();
        assert!(!solution.is_empty());
        assert!(replay_wins(&board, &solution.moves));
        assert!(solution.expanded > 0);
        assert_eq!(solution.moves_string().len(), solution.len());
    }

    #[test]
    fn test_admissible_is_never_longer() {
        for seed in ["e1", "e2", "e3"] {
            let board = GameBoard::from_seed(seed, 8, 4, StartPos::UpperLeft).unwrap();
            let optimal = solve(&board, Strategy::Admissible, None).unwrap().len();
            for strategy in &Strategy::ALL[1..] {
                let len = solve(&board, *strategy, None).unwrap().len();
                assert!(len >= optimal, "seed {seed}: {strategy} shorter than optimal");
            }
        }
    }

    #[test]
    fn test_solve_from_partial_includes_prefix() {
        let board = Arc::new(GameBoard::from_seed("partial", 8, 4, StartPos::Middle).unwrap());
        let game = Game::new(Arc::clone(&board));
        let first = game.sensible_moves().iter().next().unwrap();
        let game = game.make_move(first).unwrap();

        let solution = solve_from_partial(&game, Strategy::InadmissibleFast, None).unwrap();
        assert_eq!(solution.moves[0], first);
        assert!(replay_wins(&board, &solution.moves));

        // A fresh solve can only be at most as long as prefix + continuation
        let fresh = solve(&board, Strategy::Admissible, None).unwrap();
        assert!(fresh.len() <= solution.len());
    }

    #[test]
    fn test_solve_from_partial_on_won_game() {
        let board = Arc::new(
            GameBoard::from_compact_string("1221", StartPos::UpperLeft, None).unwrap(),
        );
        let game = Game::new(Arc::clone(&board))
            .make_move(Color(2))
            .unwrap()
            .make_move(Color(1))
            .unwrap();
        assert!(game.is_won());
        let solution = solve_from_partial(&game, Strategy::Admissible, None).unwrap();
        assert_eq!(solution.moves, vec![Color(2), Color(1)]);
        assert_eq!(solution.expanded, 0);
    }

    #[test]
    fn test_solve_all_preserves_order_and_isolates_results() {
        let seeds = ["b1", "b2", "b3", "b4"];
        let boards: Vec<GameBoard> = seeds
            .iter()
            .map(|seed| GameBoard::from_seed(seed, 7, 4, StartPos::UpperLeft).unwrap())
            .collect();
        let results = solve_all(&boards, Strategy::InadmissibleFastest, None);
        assert_eq!(results.len(), boards.len());
        for (seed, result) in seeds.iter().zip(&results) {
            let solution = result.as_ref().unwrap();
            let board = Arc::new(GameBoard::from_seed(seed, 7, 4, StartPos::UpperLeft).unwrap());
            assert!(replay_wins(&board, &solution.moves));
        }
    }
}
