//! Search stack for the solver
//!
//! Contains:
//! - Shared-prefix move chains (frontier nodes never own their histories)
//! - A ring cache of recently expanded positions with replay-on-miss
//! - The fingerprint table deduplicating positions by their `filled` bitmap
//! - Symmetry-breaking move filters
//! - The A* driver tying it all together

pub mod astar;
pub mod fingerprint;
pub mod moves;
pub mod pruning;
pub mod ring;

pub use astar::AStarSolver;
pub use fingerprint::FingerprintMap;
pub use moves::MoveChain;
pub use ring::StateCache;
