//! A* driver over flood positions
//!
//! The frontier orders positions by `g + h` with deeper nodes preferred on
//! ties. Positions are deduplicated per `filled` fingerprint, frontier
//! nodes hold handles into the ring cache and the move-chain store instead
//! of owning their states, and an optional queue cutoff keeps the frontier
//! memory-bounded by triaging nodes with the greedy playout.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::board::{Color, GameBoard, NodeSet};
use crate::error::FloodError;
use crate::eval::{greedy, EvalScratch, Strategy};
use crate::state::{BoardState, ScratchState};

use super::fingerprint::{FingerprintMap, MAX_G};
use super::moves::{MoveChain, NO_PREV};
use super::pruning;
use super::ring::{StateCache, DEFAULT_CAPACITY};

/// One frontier entry: costs plus handles into the shared stores.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    /// `g + h`
    priority: u32,
    /// Moves played to reach this position (g).
    depth: u16,
    /// Ring-cache index of the position snapshot.
    cached: u64,
    /// Last entry of the move chain.
    chain: i32,
    /// Produced by the forced-elimination step; relaxes the aggressive
    /// pruner for exactly this node's expansion.
    after_elimination: bool,
}

// Min-heap on priority; on ties prefer the deeper node, which drives the
// search toward finishable lines first.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then(self.depth.cmp(&other.depth))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.depth == other.depth
    }
}

impl Eq for SearchNode {}

/// The search driver. One instance per solve; all stores live for exactly
/// one invocation.
pub struct AStarSolver<'a> {
    board: &'a GameBoard,
    strategy: Strategy,
    queue_cutoff: usize,
    frontier: BinaryHeap<SearchNode>,
    seen: FingerprintMap,
    cache: StateCache,
    chain: MoveChain,
    eval: EvalScratch,
    replay: ScratchState,
    move_scratch: NodeSet,
    root: BoardState,
    expanded: u64,
    /// Best triaged position discarded-or-kept at the last compaction.
    /// Cutting the queue can strand the dedup table in rare dead ends;
    /// finishing this position greedily still yields a winning sequence.
    rescue: Option<(i32, BoardState)>,
}

impl<'a> AStarSolver<'a> {
    /// Set a solver up for one board. `queue_cutoff` bounds the frontier
    /// (`None` = unbounded); cutting the queue is the only thing that can
    /// make the result worse than the strategy's own quality.
    #[must_use]
    pub fn new(board: &'a GameBoard, strategy: Strategy, queue_cutoff: Option<usize>) -> Self {
        let key_words = board.node_count().div_ceil(64);
        Self {
            board,
            strategy,
            queue_cutoff: queue_cutoff.unwrap_or(usize::MAX),
            frontier: BinaryHeap::new(),
            seen: FingerprintMap::new(key_words),
            cache: StateCache::new(DEFAULT_CAPACITY),
            chain: MoveChain::new(),
            eval: EvalScratch::new(board),
            replay: ScratchState::new(board),
            move_scratch: NodeSet::new(board.node_count()),
            root: BoardState::initial(board),
            expanded: 0,
            rescue: None,
        }
    }

    /// Positions popped from the frontier so far.
    #[inline]
    pub fn expanded(&self) -> u64 {
        self.expanded
    }

    /// Search from the board's start position.
    pub fn run(&mut self) -> Result<Vec<Color>, FloodError> {
        let root = BoardState::initial(self.board);
        self.run_from(&root)
    }

    /// Search from an arbitrary position of this board. The returned moves
    /// are relative to `start`.
    pub fn run_from(&mut self, start: &BoardState) -> Result<Vec<Color>, FloodError> {
        self.root = start.clone();
        if self.root.is_won() {
            return Ok(Vec::new());
        }

        // Seed one node per sensible starting color
        for color in self.root.sensible_moves(self.board) {
            let mut child = self.root.clone();
            child.flood_color(self.board, color, &mut self.move_scratch);
            if self.seen.put_if_less(child.filled.words(), 1) {
                let chain = self.chain.push(NO_PREV, color);
                self.push_node(child, chain, 1, false);
            }
        }

        while let Some(node) = self.frontier.pop() {
            self.expanded += 1;
            let state = self.resolve(&node);

            if state.is_won() {
                debug!(
                    "won at depth {} after {} expansions ({} fingerprints)",
                    node.depth,
                    self.expanded,
                    self.seen.len()
                );
                return Ok(self.chain.collect(node.chain));
            }

            if !self.strategy.is_admissible() && self.expand_eliminations(&node, &state)? {
                self.compact_if_oversized();
                continue;
            }

            self.expand(&node, &state)?;
            self.compact_if_oversized();
        }

        // With an unbounded frontier every reachable fingerprint gets
        // expanded, so running dry means the board was malformed. After a
        // cutoff the table can block the surviving paths; finish the best
        // triaged position greedily instead of failing.
        if let Some((chain, state)) = self.rescue.take() {
            let mut moves = self.chain.collect(chain);
            self.eval.sim.reset_from(&state);
            greedy::play_out_recorded(self.board, &mut self.eval.sim, &mut self.eval.greedy, &mut moves);
            debug!("frontier dry after cutoff, finished greedily ({} moves)", moves.len());
            return Ok(moves);
        }
        Err(FloodError::FrontierExhausted)
    }

    /// Forced whole-color eliminations: when some colors can vanish from
    /// the board right now, play all of them as one multi-step successor
    /// and skip regular expansion.
    fn expand_eliminations(
        &mut self,
        node: &SearchNode,
        state: &BoardState,
    ) -> Result<bool, FloodError> {
        let eliminable = state.eliminable_colors(self.board);
        if eliminable.is_empty() {
            return Ok(false);
        }
        let mut child = state.clone();
        let mut chain = node.chain;
        for color in eliminable {
            child.flood_color(self.board, color, &mut self.move_scratch);
            chain = self.chain.push(chain, color);
        }
        let g = checked_depth(node.depth, eliminable.count())?;
        if self.seen.put_if_less(child.filled.words(), g) {
            self.push_node(child, chain, g, true);
        }
        Ok(true)
    }

    /// Regular expansion: one successor per allowed color.
    fn expand(&mut self, node: &SearchNode, state: &BoardState) -> Result<(), FloodError> {
        let sensible = state.sensible_moves(self.board);
        let prev = self.chain.last_color(node.chain);
        let allowed = if self.strategy.is_admissible() {
            pruning::admissible_moves(self.board, state, sensible, prev)
        } else {
            pruning::inadmissible_moves(self.board, state, sensible, prev, node.after_elimination)
        };
        let g = checked_depth(node.depth, 1)?;
        for color in allowed {
            let mut child = state.clone();
            child.flood_color(self.board, color, &mut self.move_scratch);
            if !self.seen.put_if_less(child.filled.words(), g) {
                continue;
            }
            let chain = self.chain.push(node.chain, color);
            self.push_node(child, chain, g, false);
        }
        Ok(())
    }

    fn push_node(&mut self, child: BoardState, chain: i32, g: u16, after_elimination: bool) {
        let h = self.strategy.estimate(self.board, &child, &mut self.eval);
        self.frontier.push(SearchNode {
            priority: u32::from(g) + h,
            depth: g,
            cached: self.cache.add(child),
            chain,
            after_elimination,
        });
    }

    /// The node's position: from the ring cache when still resident,
    /// otherwise rebuilt by replaying the move chain from the root.
    fn resolve(&mut self, node: &SearchNode) -> BoardState {
        if let Some(state) = self.cache.get(node.cached) {
            return state.clone();
        }
        self.replay.reset_from(&self.root);
        for color in self.chain.collect(node.chain) {
            self.replay.flood_color(self.board, color);
        }
        self.replay.state().clone()
    }

    /// Halve the frontier once it outgrows the cutoff: triage every node
    /// by `g + greedy(state)` and keep the better half.
    fn compact_if_oversized(&mut self) {
        if self.frontier.len() <= self.queue_cutoff {
            return;
        }
        let before = self.frontier.len();
        let nodes = std::mem::take(&mut self.frontier).into_vec();
        let mut scored: Vec<(u32, SearchNode)> = Vec::with_capacity(nodes.len());
        for node in nodes {
            let state = self.resolve(&node);
            let triage =
                Strategy::InadmissibleFastest.estimate(self.board, &state, &mut self.eval);
            scored.push((u32::from(node.depth) + triage, node));
        }
        scored.sort_by_key(|&(score, _)| score);
        let best = scored[0].1;
        self.rescue = Some((best.chain, self.resolve(&best)));
        scored.truncate(before / 2);
        self.frontier = scored.into_iter().map(|(_, node)| node).collect();
        debug!("queue cutoff: kept {} of {} frontier nodes", self.frontier.len(), before);
    }
}

fn checked_depth(depth: u16, moves: u32) -> Result<u16, FloodError> {
    let g = u32::from(depth) + moves;
    if g > u32::from(MAX_G) {
        return Err(FloodError::MoveOverflow);
    }
    Ok(g as u16)
}
