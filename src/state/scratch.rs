//! Mutable scratch view of a position
//!
//! Heuristics replay a position dozens of times per expansion; the scratch
//! view owns its working bitmap and resets by copying words, never by
//! allocating.

use crate::board::{Color, ColorSet, GameBoard, NodeSet};

use super::BoardState;

/// A mutable position with an embedded working bitmap.
pub struct ScratchState {
    state: BoardState,
    scratch: NodeSet,
}

impl ScratchState {
    /// A scratch view of the board's initial position.
    pub fn new(board: &GameBoard) -> Self {
        Self {
            state: BoardState::initial(board),
            scratch: NodeSet::new(board.node_count()),
        }
    }

    /// Overwrite the position with `state`, reusing the existing bitmaps.
    pub fn reset_from(&mut self, state: &BoardState) {
        self.state.filled.copy_from(&state.filled);
        self.state.border.copy_from(&state.border);
        self.state.beyond.copy_from(&state.beyond);
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    /// See [`BoardState::flood_color`].
    #[inline]
    pub fn flood_color(&mut self, board: &GameBoard, color: Color) -> bool {
        self.state.flood_color(board, color, &mut self.scratch)
    }

    /// See [`BoardState::flood_colors`].
    #[inline]
    pub fn flood_colors(&mut self, board: &GameBoard, colors: ColorSet) -> bool {
        self.state.flood_colors(board, colors, &mut self.scratch)
    }

    /// See [`BoardState::flood_border`].
    #[inline]
    pub fn flood_border(&mut self, board: &GameBoard) {
        self.state.flood_border(board, &mut self.scratch)
    }

    /// See [`BoardState::absorb`].
    #[inline]
    pub fn take_nodes(&mut self, board: &GameBoard, nodes: &NodeSet) {
        self.state.absorb(board, nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StartPos;

    #[test]
    fn test_reset_matches_source() {
        let board = GameBoard::from_seed("scratch", 8, 4, StartPos::UpperLeft).unwrap();
        let mut sim = ScratchState::new(&board);
        let initial = BoardState::initial(&board);

        // Wander off, then reset
        let color = initial.sensible_moves(&board).iter().next().unwrap();
        sim.flood_color(&board, color);
        assert_ne!(*sim.state(), initial);
        sim.reset_from(&initial);
        assert_eq!(*sim.state(), initial);
    }

    #[test]
    fn test_scratch_floods_match_plain_floods() {
        let board = GameBoard::from_seed("twin", 8, 4, StartPos::Middle).unwrap();
        let mut sim = ScratchState::new(&board);
        let mut plain = BoardState::initial(&board);
        let mut scratch = NodeSet::new(board.node_count());
        while !plain.is_won() {
            let color = plain.sensible_moves(&board).iter().next().unwrap();
            plain.flood_color(&board, color, &mut scratch);
            sim.flood_color(&board, color);
            assert_eq!(*sim.state(), plain);
        }
        assert!(sim.is_won());
    }

    #[test]
    fn test_take_nodes_arbitrary_set() {
        let board = GameBoard::from_compact_string("1221", StartPos::UpperLeft, None).unwrap();
        let mut sim = ScratchState::new(&board);
        // Take every region at once, including the far corner in `beyond`
        let mut all = NodeSet::new(board.node_count());
        all.invert();
        sim.take_nodes(&board, &all);
        assert!(sim.is_won());
        assert_eq!(sim.state().filled.count() as usize, board.node_count());
    }
}
