//! The heuristic ladder
//!
//! Five strategies trade estimate quality against cost. `Admissible` never
//! overestimates the moves remaining, so A* with it returns shortest
//! solutions; the inadmissible tiers give up optimality for speed, each one
//! cheaper or more aggressive than the last. Every strategy returns 0
//! exactly on won positions.

use std::fmt;
use std::str::FromStr;

use crate::board::GameBoard;
use crate::error::FloodError;
use crate::state::{BoardState, ScratchState};

use super::greedy::{self, GreedyScratch};

/// Which h-function the search driver runs.
///
/// # Example
///
/// ```
/// use floodit::Strategy;
///
/// let strategy: Strategy = "astar_iaf".parse().unwrap();
/// assert_eq!(strategy, Strategy::InadmissibleFast);
/// assert!(!strategy.is_admissible());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Elimination-aware lower bound: count whole-color eliminations at
    /// face value, everything else as color-blind border grabs.
    Admissible,
    /// Two-colors-per-step estimate; falls back to the lower bound once
    /// half the board is filled. Tight but not admissible.
    InadmissibleSlow,
    /// [`Strategy::InadmissibleSlow`] plus a 1/13 surcharge.
    Inadmissible,
    /// Blend of the lower bound and the greedy playout, 1:2.
    InadmissibleFast,
    /// The greedy playout count; never underestimates, often overestimates.
    InadmissibleFastest,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Admissible,
        Strategy::InadmissibleSlow,
        Strategy::Inadmissible,
        Strategy::InadmissibleFast,
        Strategy::InadmissibleFastest,
    ];

    /// The identifier this strategy is selected by.
    pub fn identifier(self) -> &'static str {
        match self {
            Strategy::Admissible => "astar_a",
            Strategy::InadmissibleSlow => "astar_ias",
            Strategy::Inadmissible => "astar_ia",
            Strategy::InadmissibleFast => "astar_iaf",
            Strategy::InadmissibleFastest => "astar_iaff",
        }
    }

    /// Whether h never overestimates; decides the pruner and makes the
    /// first popped win provably shortest.
    #[inline]
    pub fn is_admissible(self) -> bool {
        matches!(self, Strategy::Admissible)
    }

    /// Estimate the moves remaining from `state`.
    #[must_use]
    pub fn estimate(self, board: &GameBoard, state: &BoardState, cx: &mut EvalScratch) -> u32 {
        match self {
            Strategy::Admissible => {
                cx.sim.reset_from(state);
                lower_bound_playout(board, &mut cx.sim)
            }
            Strategy::InadmissibleSlow => slow_estimate(board, state, cx),
            Strategy::Inadmissible => {
                let v = slow_estimate(board, state, cx);
                v + v / 13
            }
            Strategy::InadmissibleFast => {
                cx.sim.reset_from(state);
                let bound = lower_bound_playout(board, &mut cx.sim);
                cx.sim.reset_from(state);
                let greedy = greedy::play_out(board, &mut cx.sim, &mut cx.greedy);
                (bound + 2 * greedy) / 3
            }
            Strategy::InadmissibleFastest => {
                cx.sim.reset_from(state);
                greedy::play_out(board, &mut cx.sim, &mut cx.greedy)
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = FloodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.identifier() == s)
            .ok_or_else(|| FloodError::UnknownStrategy { name: s.to_string() })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Working state for heuristic evaluation: one scratch position plus the
/// greedy buffers, reused across every estimate of a solve.
pub struct EvalScratch {
    pub(crate) sim: ScratchState,
    pub(crate) greedy: GreedyScratch,
}

impl EvalScratch {
    pub fn new(board: &GameBoard) -> Self {
        Self {
            sim: ScratchState::new(board),
            greedy: GreedyScratch::new(board),
        }
    }
}

/// Admissible playout: whole-color eliminations count one move each, any
/// other step takes the entire border for one move.
///
/// A real move can absorb at most the whole border, so the color-blind step
/// never beats reality; and a color that must disappear costs at least one
/// dedicated move. The total therefore never exceeds the true distance.
fn lower_bound_playout(board: &GameBoard, sim: &mut ScratchState) -> u32 {
    let mut count = 0u32;
    while !sim.is_won() {
        let eliminable = sim.state().eliminable_colors(board);
        if !eliminable.is_empty() {
            sim.flood_colors(board, eliminable);
            count += eliminable.count();
        } else {
            sim.flood_border(board);
            count += 1;
        }
    }
    count
}

/// Two best-exposure colors per non-elimination step, counted as one move.
fn two_color_playout(board: &GameBoard, sim: &mut ScratchState, buf: &mut GreedyScratch) -> u32 {
    let mut count = 0u32;
    while !sim.is_won() {
        let eliminable = sim.state().eliminable_colors(board);
        if !eliminable.is_empty() {
            sim.flood_colors(board, eliminable);
            count += eliminable.count();
            continue;
        }
        let (first, second) = greedy::best_two_exposure_colors(board, sim.state(), buf);
        let mut pair = crate::board::ColorSet::EMPTY;
        pair.add(first);
        pair.add(second);
        sim.flood_colors(board, pair);
        count += 1;
    }
    count
}

fn slow_estimate(board: &GameBoard, state: &BoardState, cx: &mut EvalScratch) -> u32 {
    if 2 * state.filled_field_count(board) >= board.field_count() {
        cx.sim.reset_from(state);
        lower_bound_playout(board, &mut cx.sim)
    } else {
        cx.sim.reset_from(state);
        two_color_playout(board, &mut cx.sim, &mut cx.greedy)
    }
}
