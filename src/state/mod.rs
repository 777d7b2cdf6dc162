//! The three views of a playing position
//!
//! - [`BoardState`]: the position itself, three coupled region bitmaps.
//! - [`Game`]: an immutable position with its move history, for callers.
//! - [`ScratchState`]: a mutable view that can be reset without
//!   reallocating, for heuristics and state reconstruction.

pub mod game;
pub mod scratch;

pub use game::Game;
pub use scratch::ScratchState;

use crate::board::{Color, ColorSet, GameBoard, NodeSet};

/// A playing position.
///
/// The three sets are pairwise disjoint and together cover every region id:
/// `filled` is claimed, `border` is adjacent to the claim, `beyond` is
/// everything else. The position is won exactly when `border` is empty.
/// `filled` alone identifies the position; the other two sets are derived
/// and kept only because every transition needs them.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardState {
    pub filled: NodeSet,
    pub border: NodeSet,
    pub beyond: NodeSet,
}

impl BoardState {
    /// The position before any move: only the start region is claimed.
    pub fn initial(board: &GameBoard) -> Self {
        let node_count = board.node_count();
        let start = board.start_node() as usize;
        let mut filled = NodeSet::new(node_count);
        filled.set(start);
        let border = board.node(start).bordering.clone();
        let mut beyond = filled.clone();
        beyond.union_with(&border);
        beyond.invert();
        Self { filled, border, beyond }
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.border.is_empty()
    }

    /// Claim every border region of `color`.
    ///
    /// Returns `false` (and leaves the position untouched) when the color
    /// has no region in the border, i.e. the move is not sensible.
    pub fn flood_color(&mut self, board: &GameBoard, color: Color, scratch: &mut NodeSet) -> bool {
        scratch.copy_from(board.nodes_of_color(color));
        scratch.intersect_with(&self.border);
        if scratch.is_empty() {
            return false;
        }
        self.absorb(board, scratch);
        true
    }

    /// Claim every border region whose color is in `colors`, as one step.
    pub fn flood_colors(
        &mut self,
        board: &GameBoard,
        colors: ColorSet,
        scratch: &mut NodeSet,
    ) -> bool {
        scratch.clear_all();
        for color in colors {
            scratch.union_with(board.nodes_of_color(color));
        }
        scratch.intersect_with(&self.border);
        if scratch.is_empty() {
            return false;
        }
        self.absorb(board, scratch);
        true
    }

    /// Claim the whole border regardless of color. Not a legal game move;
    /// this is the relaxation the admissible lower bound is built on.
    pub fn flood_border(&mut self, board: &GameBoard, scratch: &mut NodeSet) {
        if self.border.is_empty() {
            return;
        }
        scratch.copy_from(&self.border);
        self.absorb(board, scratch);
    }

    /// Claim an arbitrary region set and restore the three-way partition.
    pub fn absorb(&mut self, board: &GameBoard, new_nodes: &NodeSet) {
        self.filled.union_with(new_nodes);
        for id in new_nodes.iter_ones() {
            self.border.union_with(&board.node(id).bordering);
        }
        self.border.subtract(&self.filled);
        self.beyond.subtract(&self.filled);
        self.beyond.subtract(&self.border);
    }

    /// The colors present in the border: exactly the moves that change the
    /// position. Iterates whichever side is smaller.
    pub fn sensible_moves(&self, board: &GameBoard) -> ColorSet {
        let mut moves = ColorSet::EMPTY;
        if (self.border.count() as usize) < board.color_count() {
            for id in self.border.iter_ones() {
                moves.add(board.node(id).color);
            }
        } else {
            for color in board.colors() {
                if board.nodes_of_color(color).intersects(&self.border) {
                    moves.add(color);
                }
            }
        }
        moves
    }

    /// The sensible colors that would vanish from the board in one
    /// multi-color step: every remaining region of theirs is in the border.
    pub fn eliminable_colors(&self, board: &GameBoard) -> ColorSet {
        let mut out = ColorSet::EMPTY;
        for color in board.colors() {
            let nodes = board.nodes_of_color(color);
            if !nodes.intersects(&self.beyond) && nodes.intersects(&self.border) {
                out.add(color);
            }
        }
        out
    }

    /// Total grid cells covered by the claimed regions.
    pub fn filled_field_count(&self, board: &GameBoard) -> usize {
        self.filled
            .iter_ones()
            .map(|id| board.node(id).field_count())
            .sum()
    }
}
