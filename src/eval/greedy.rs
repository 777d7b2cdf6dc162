//! Greedy elimination-first policy
//!
//! Finishes any board in at most one move per region: eliminate whole
//! colors whenever possible, otherwise take the color that exposes the
//! most new area behind the border. Used standalone, as the cheapest
//! heuristic, and as the triage score for queue-cutoff compaction.

use crate::board::{Color, GameBoard, NodeSet};
use crate::state::{BoardState, ScratchState};

/// Reusable bitmaps for exposure scoring.
pub struct GreedyScratch {
    candidates: NodeSet,
    exposed: NodeSet,
}

impl GreedyScratch {
    pub fn new(board: &GameBoard) -> Self {
        Self {
            candidates: NodeSet::new(board.node_count()),
            exposed: NodeSet::new(board.node_count()),
        }
    }
}

/// Play `sim` out greedily; returns the number of moves used.
pub fn play_out(board: &GameBoard, sim: &mut ScratchState, buf: &mut GreedyScratch) -> u32 {
    play(board, sim, buf, None)
}

/// Like [`play_out`], but appends the moves played to `moves`.
pub fn play_out_recorded(
    board: &GameBoard,
    sim: &mut ScratchState,
    buf: &mut GreedyScratch,
    moves: &mut Vec<Color>,
) -> u32 {
    play(board, sim, buf, Some(moves))
}

/// Solve the board greedily from its start position, recording the moves.
pub fn solve(board: &GameBoard) -> Vec<Color> {
    let mut sim = ScratchState::new(board);
    let mut buf = GreedyScratch::new(board);
    let mut moves = Vec::new();
    play(board, &mut sim, &mut buf, Some(&mut moves));
    moves
}

fn play(
    board: &GameBoard,
    sim: &mut ScratchState,
    buf: &mut GreedyScratch,
    mut record: Option<&mut Vec<Color>>,
) -> u32 {
    let mut count = 0u32;
    while !sim.is_won() {
        let eliminable = sim.state().eliminable_colors(board);
        if !eliminable.is_empty() {
            // Each eliminated color is one real move; applying them
            // together is just cheaper.
            sim.flood_colors(board, eliminable);
            count += eliminable.count();
            if let Some(moves) = record.as_deref_mut() {
                moves.extend(eliminable.iter());
            }
            continue;
        }
        let color = best_exposure_color(board, sim.state(), buf);
        sim.flood_color(board, color);
        count += 1;
        if let Some(moves) = record.as_deref_mut() {
            moves.push(color);
        }
    }
    count
}

/// Total fields of the regions a move of `color` would newly expose: the
/// area behind the border regions of that color.
pub(crate) fn exposure_score(
    board: &GameBoard,
    state: &BoardState,
    color: Color,
    buf: &mut GreedyScratch,
) -> u64 {
    buf.candidates.copy_from(board.nodes_of_color(color));
    buf.candidates.intersect_with(&state.border);
    buf.exposed.clear_all();
    for id in buf.candidates.iter_ones() {
        buf.exposed.union_with(&board.node(id).bordering);
    }
    buf.exposed.intersect_with(&state.beyond);
    buf.exposed
        .iter_ones()
        .map(|id| board.node(id).field_count() as u64)
        .sum()
}

/// The sensible color with the largest exposure score; ties go to the
/// lowest color value.
fn best_exposure_color(board: &GameBoard, state: &BoardState, buf: &mut GreedyScratch) -> Color {
    let mut best = Color::NONE;
    let mut best_score = 0u64;
    for color in state.sensible_moves(board) {
        let score = exposure_score(board, state, color, buf);
        if best.is_none() || score > best_score {
            best = color;
            best_score = score;
        }
    }
    debug_assert!(!best.is_none(), "no sensible move in an unwon position");
    best
}

/// The two sensible colors with the largest exposure scores, lowest color
/// value first on ties. The second slot repeats the first color when only
/// one move is sensible.
pub(crate) fn best_two_exposure_colors(
    board: &GameBoard,
    state: &BoardState,
    buf: &mut GreedyScratch,
) -> (Color, Color) {
    let mut first = Color::NONE;
    let mut first_score = 0u64;
    let mut second = Color::NONE;
    let mut second_score = 0u64;
    for color in state.sensible_moves(board) {
        let score = exposure_score(board, state, color, buf);
        if first.is_none() || score > first_score {
            second = first;
            second_score = first_score;
            first = color;
            first_score = score;
        } else if second.is_none() || score > second_score {
            second = color;
            second_score = score;
        }
    }
    debug_assert!(!first.is_none(), "no sensible move in an unwon position");
    if second.is_none() {
        second = first;
    }
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StartPos;
    use crate::state::Game;
    use std::sync::Arc;

    #[test]
    fn test_greedy_wins_trivial_boards() {
        let board = GameBoard::from_compact_string("1212", StartPos::UpperLeft, None).unwrap();
        assert_eq!(solve(&board), vec![Color(2)]);

        let board = GameBoard::from_compact_string("1221", StartPos::UpperLeft, None).unwrap();
        assert_eq!(solve(&board), vec![Color(2), Color(1)]);
    }

    #[test]
    fn test_greedy_always_wins_within_region_count() {
        for seed in ["a", "b", "c", "d"] {
            let board = GameBoard::from_seed(seed, 14, 6, StartPos::UpperLeft).unwrap();
            let moves = solve(&board);
            assert!(moves.len() <= board.node_count());

            // The recorded sequence must actually win the game
            let mut game = Game::new(Arc::new(GameBoard::from_seed(
                seed,
                14,
                6,
                StartPos::UpperLeft,
            )
            .unwrap()));
            for &color in &moves {
                game = game.make_move(color).unwrap();
            }
            assert!(game.is_won());
        }
    }

    #[test]
    fn test_play_out_count_matches_solve() {
        let board = GameBoard::from_seed("playout", 12, 5, StartPos::Middle).unwrap();
        let mut sim = ScratchState::new(&board);
        let mut buf = GreedyScratch::new(&board);
        let count = play_out(&board, &mut sim, &mut buf);
        assert!(sim.is_won());
        assert_eq!(count as usize, solve(&board).len());
    }

    #[test]
    fn test_exposure_score_counts_area_behind_border() {
        // 3x3:
        //   1 2 3
        //   1 2 3
        //   1 2 3
        // From the left column, a move of 2 exposes the 3-column (3 cells);
        // 3 is not sensible.
        let board = GameBoard::from_compact_string("123123123", StartPos::UpperLeft, None).unwrap();
        let state = BoardState::initial(&board);
        let mut buf = GreedyScratch::new(&board);
        assert_eq!(exposure_score(&board, &state, Color(2), &mut buf), 3);
        assert_eq!(exposure_score(&board, &state, Color(3), &mut buf), 0);
    }

    #[test]
    fn test_best_two_colors() {
        // 4x4: from the 1-region, color 2 hides more area than color 4
        //   1 1 2 2
        //   1 1 2 2
        //   4 4 3 3
        //   4 4 3 3
        let board =
            GameBoard::from_compact_string("1122112244334433", StartPos::UpperLeft, None).unwrap();
        let state = BoardState::initial(&board);
        let mut buf = GreedyScratch::new(&board);
        let (a, b) = best_two_exposure_colors(&board, &state, &mut buf);
        assert_eq!(a, Color(2));
        assert_eq!(b, Color(4));
    }
}
