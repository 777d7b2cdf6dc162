//! Immutable game view: a position plus its move history

use std::sync::Arc;

use crate::board::{Color, ColorSet, GameBoard, NodeSet};
use crate::error::FloodError;

use super::BoardState;

/// A position with the moves that produced it.
///
/// `Game` is immutable: [`Game::make_move`] returns a new value and rejects
/// colors that are not in the current border, so a `Game` can never hold an
/// inconsistent history.
///
/// # Example
///
/// ```
/// use floodit::{Color, Game, GameBoard, StartPos};
/// use std::sync::Arc;
///
/// let board = GameBoard::from_compact_string("1221", StartPos::UpperLeft, None).unwrap();
/// let game = Game::new(Arc::new(board));
/// let game = game.make_move(Color(2)).unwrap().make_move(Color(1)).unwrap();
/// assert!(game.is_won());
/// assert_eq!(game.moves_string(), "21");
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Arc<GameBoard>,
    state: BoardState,
    moves: Vec<Color>,
    sensible: ColorSet,
}

impl Game {
    /// A fresh game on the given board, no moves played.
    pub fn new(board: Arc<GameBoard>) -> Self {
        let state = BoardState::initial(&board);
        let sensible = state.sensible_moves(&board);
        Self {
            board,
            state,
            moves: Vec::new(),
            sensible,
        }
    }

    #[inline]
    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    #[inline]
    pub fn board_arc(&self) -> Arc<GameBoard> {
        Arc::clone(&self.board)
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// The moves played so far, in play order.
    #[inline]
    pub fn moves(&self) -> &[Color] {
        &self.moves
    }

    /// The colors currently present in the border.
    #[inline]
    pub fn sensible_moves(&self) -> ColorSet {
        self.sensible
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    /// Play one color, returning the resulting game.
    ///
    /// Colors outside the current border are rejected; every other color
    /// strictly grows the claimed area.
    pub fn make_move(&self, color: Color) -> Result<Game, FloodError> {
        if !self.sensible.contains(color) {
            return Err(FloodError::NotSensible { color });
        }
        let mut state = self.state.clone();
        let mut scratch = NodeSet::new(self.board.node_count());
        state.flood_color(&self.board, color, &mut scratch);
        let sensible = state.sensible_moves(&self.board);
        let mut moves = self.moves.clone();
        moves.push(color);
        Ok(Game {
            board: Arc::clone(&self.board),
            state,
            moves,
            sensible,
        })
    }

    /// The move history as a compact solution string.
    pub fn moves_string(&self) -> String {
        self.moves.iter().map(|c| c.to_char()).collect()
    }
}
