//! Position evaluation: the greedy policy and the heuristic ladder
//!
//! Contains:
//! - A greedy elimination-first player, usable standalone and as the
//!   cheapest estimate of moves remaining
//! - The five-strategy ladder the search driver picks its h-function from

pub mod greedy;
pub mod heuristic;

pub use greedy::GreedyScratch;
pub use heuristic::{EvalScratch, Strategy};
