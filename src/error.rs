//! Crate-wide error type
//!
//! Input-format problems are reported to the caller before any board is
//! built; invariant violations abort the current solve and carry enough
//! context to diagnose it. Nothing here is recovered from internally.

use thiserror::Error;

use crate::board::Color;

/// Everything that can go wrong while building boards or solving them.
#[derive(Debug, Error)]
pub enum FloodError {
    /// The compact board string does not describe a square grid.
    #[error("board has {len} cells, which is not a square number")]
    BoardLength { len: usize },

    /// A character outside the base-35 alphabet (0-9, A-Y).
    #[error("invalid board character {ch:?} (expected a base-35 digit 0-9, A-Y)")]
    BadColorChar { ch: char },

    /// A cell carries a color value outside the playable range.
    #[error("cell color value {value} out of range 1..=34")]
    CellColor { value: u8 },

    /// The board does not have between 2 and 34 distinct colors.
    #[error("board has {count} distinct colors, expected 2..=34")]
    ColorCount { count: usize },

    /// A step cap below 1 makes the game unplayable.
    #[error("step cap must be at least 1, got {cap}")]
    StepCap { cap: u32 },

    /// The requested color is not present in the current border.
    #[error("color {color} is not a sensible move in this position")]
    NotSensible { color: Color },

    /// Unknown strategy identifier.
    #[error("unknown strategy {name:?} (expected astar_a, astar_ias, astar_ia, astar_iaf or astar_iaff)")]
    UnknownStrategy { name: String },

    /// Unknown start-position name.
    #[error("unknown start position {name:?}")]
    UnknownStartPos { name: String },

    /// The frontier emptied before a won position was popped. Cannot happen
    /// on a well-formed board without a queue cutoff; treated as an internal
    /// invariant violation.
    #[error("search frontier exhausted before reaching a won position")]
    FrontierExhausted,

    /// The move count left the 16-bit g-cost range of the dedup table.
    #[error("move count exceeded the 16-bit g-cost range")]
    MoveOverflow,

    /// The board was solved, but not within the requested step cap.
    #[error("solution needs {required} moves but the step cap is {cap}")]
    StepCapExceeded { required: usize, cap: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
