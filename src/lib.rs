//! Flood-It solver engine
//!
//! An A*-based solver that finds short (with the admissible strategy:
//! shortest) color-move sequences flooding an entire board from one seed
//! cell. The grid is reduced once to a graph of uniform-color regions;
//! everything after that works on fixed-width bitmaps over region ids.
//!
//! # Architecture
//!
//! - [`board`]: colors, points, bitmaps, and the reduced region graph
//! - [`state`]: the three views of a position (immutable game, plain
//!   position, reusable scratch)
//! - [`eval`]: the greedy policy and the five-strategy heuristic ladder
//! - [`search`]: move chains, ring cache, fingerprint dedup, symmetry
//!   pruning, and the A* driver
//! - [`engine`]: solve entry points and parallel batch dispatch
//!
//! # Quick Start
//!
//! ```
//! use floodit::{engine, GameBoard, StartPos, Strategy};
//!
//! // 2x2 checkerboard: 1 2 / 2 1, flood from the upper-left corner
//! let board = GameBoard::from_compact_string("1221", StartPos::UpperLeft, None).unwrap();
//! let solution = engine::solve(&board, Strategy::Admissible, None).unwrap();
//! assert_eq!(solution.moves_string(), "21");
//! ```
//!
//! # Search techniques
//!
//! Tractability on boards up to ~64x64 with 6+ colors comes from a set of
//! interlocking techniques: whole-color elimination preference, symmetry
//! pruning of reorderable move pairs, per-fingerprint g-cost deduplication,
//! and a memory-bounded frontier whose nodes hold handles into a ring cache
//! instead of owning their positions.

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod search;
pub mod state;

// Re-export commonly used types for convenience
pub use board::{Color, ColorSet, GameBoard, NodeSet, Point, StartPos};
pub use engine::{solve, solve_all, solve_from_partial, Solution};
pub use error::FloodError;
pub use eval::Strategy;
pub use state::{BoardState, Game, ScratchState};
