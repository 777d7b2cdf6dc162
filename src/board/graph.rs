//! The reduced region graph
//!
//! A raw color grid is carved once into maximal 4-connected single-color
//! regions. Each region becomes a node with a dense id; adjacency between
//! regions is stored as a [`NodeSet`] of ids, so the graph carries no
//! pointers and the board can be shared freely after construction.

use std::fmt;

use crate::error::FloodError;

use super::{Color, ColorSet, NodeSet, Point, StartPos, MAX_COLOR_VALUE};

/// One region of the board: a maximal 4-connected area of a single color.
#[derive(Debug, Clone)]
pub struct BoardNode {
    /// Dense id, equal to this node's index in the board's node array.
    pub id: u32,
    pub color: Color,
    /// The grid cells the region covers, in row-major order.
    pub fields: Box<[Point]>,
    /// Ids of adjacent regions. A node never borders itself.
    pub bordering: NodeSet,
}

impl BoardNode {
    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// The whole puzzle, frozen after construction.
///
/// Holds the region nodes, a per-color index over them, and the original
/// grid (kept for rendering and compact-string emission). All lookups are
/// by dense region id.
#[derive(Debug)]
pub struct GameBoard {
    nodes: Box<[BoardNode]>,
    /// Region ids per color value; index = color value, empty set for
    /// colors the board does not use.
    by_color: Box<[NodeSet]>,
    colors: ColorSet,
    board_size: usize,
    grid: Box<[Color]>,
    /// Region id per cell, row-major.
    cell_nodes: Box<[u32]>,
    start_pos: Point,
    start_node: u32,
    maximum_steps: u32,
}

impl GameBoard {
    /// Build a board from a cell grid in row-major order.
    ///
    /// Rejects grids that are not `board_size`² cells, cells outside the
    /// playable color range, boards with fewer than 2 or more than 34
    /// distinct colors, and step caps below 1. Nothing is built on error.
    #[must_use]
    pub fn new(
        grid: Vec<Color>,
        board_size: usize,
        start: StartPos,
        step_cap: Option<u32>,
    ) -> Result<Self, FloodError> {
        if board_size == 0 || grid.len() != board_size * board_size {
            return Err(FloodError::BoardLength { len: grid.len() });
        }
        let mut colors = ColorSet::EMPTY;
        for &cell in &grid {
            if cell.is_none() || cell.value() > MAX_COLOR_VALUE {
                return Err(FloodError::CellColor { value: cell.value() });
            }
            colors.add(cell);
        }
        let color_count = colors.count() as usize;
        if !(2..=MAX_COLOR_VALUE as usize).contains(&color_count) {
            return Err(FloodError::ColorCount { count: color_count });
        }
        let maximum_steps = match step_cap {
            Some(0) => return Err(FloodError::StepCap { cap: 0 }),
            Some(cap) => cap,
            None => (board_size * color_count * 3 / 10).max(1) as u32,
        };

        let (nodes, cell_nodes) = carve_regions(&grid, board_size);
        let node_count = nodes.len();

        let mut by_color: Vec<NodeSet> =
            vec![NodeSet::new(node_count); MAX_COLOR_VALUE as usize + 1];
        for node in &nodes {
            by_color[node.color.value() as usize].set(node.id as usize);
        }

        let start_pos = start.point(board_size);
        let start_node = cell_nodes[start_pos.to_index(board_size)];

        Ok(Self {
            nodes: nodes.into_boxed_slice(),
            by_color: by_color.into_boxed_slice(),
            colors,
            board_size,
            grid: grid.into_boxed_slice(),
            cell_nodes: cell_nodes.into_boxed_slice(),
            start_pos,
            start_node,
            maximum_steps,
        })
    }

    /// Parse a compact board string: `board_size`² base-35 digits, no
    /// whitespace, row-major.
    #[must_use]
    pub fn from_compact_string(
        compact: &str,
        start: StartPos,
        step_cap: Option<u32>,
    ) -> Result<Self, FloodError> {
        let len = compact.chars().count();
        let board_size = (len as f64).sqrt().round() as usize;
        if board_size * board_size != len {
            return Err(FloodError::BoardLength { len });
        }
        let grid = compact
            .chars()
            .map(Color::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(grid, board_size, start, step_cap)
    }

    /// Generate a board deterministically from a string seed.
    ///
    /// The seed is folded to 32 bits and drives a xorshift sequence; the
    /// same seed yields the same board on every run and platform. Cell
    /// values are 1-based: `1 + rand() % colors`.
    #[must_use]
    pub fn from_seed(
        seed: &str,
        board_size: usize,
        colors: u8,
        start: StartPos,
    ) -> Result<Self, FloodError> {
        if !(2..=MAX_COLOR_VALUE).contains(&colors) {
            return Err(FloodError::ColorCount { count: colors as usize });
        }
        let mut state = seed
            .bytes()
            .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
        if state == 0 {
            state = 0x9E37_79B9;
        }
        let mut next = move || {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        };
        let grid: Vec<Color> = (0..board_size * board_size)
            .map(|_| Color(1 + (next() % u32::from(colors)) as u8))
            .collect();
        Self::new(grid, board_size, start, None)
    }

    /// Emit the compact string this board was built from.
    pub fn compact_string(&self) -> String {
        self.grid.iter().map(|c| c.to_char()).collect()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.grid.len()
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    #[inline]
    pub fn nodes(&self) -> &[BoardNode] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: usize) -> &BoardNode {
        &self.nodes[id]
    }

    /// The regions of one color, as an id bitmap.
    #[inline]
    pub fn nodes_of_color(&self, color: Color) -> &NodeSet {
        &self.by_color[color.value() as usize]
    }

    #[inline]
    pub fn colors(&self) -> ColorSet {
        self.colors
    }

    #[inline]
    pub fn color_count(&self) -> usize {
        self.colors.count() as usize
    }

    #[inline]
    pub fn start_pos(&self) -> Point {
        self.start_pos
    }

    /// Id of the region containing the start cell.
    #[inline]
    pub fn start_node(&self) -> u32 {
        self.start_node
    }

    /// Step cap for outer surfaces; the solver itself searches unbounded.
    #[inline]
    pub fn maximum_steps(&self) -> u32 {
        self.maximum_steps
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Color {
        self.grid[p.to_index(self.board_size)]
    }

    /// The region containing a grid cell.
    #[inline]
    pub fn node_at(&self, p: Point) -> &BoardNode {
        &self.nodes[self.cell_nodes[p.to_index(self.board_size)] as usize]
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.chunks(self.board_size) {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Flood-fill the grid into regions and link adjacent regions.
///
/// Returns the node list (ids in row-major discovery order) and the
/// cell-to-region lookup used to resolve the start cell.
fn carve_regions(grid: &[Color], board_size: usize) -> (Vec<BoardNode>, Vec<u32>) {
    let cell_count = grid.len();
    const UNASSIGNED: u32 = u32::MAX;
    let mut cell_node = vec![UNASSIGNED; cell_count];
    let mut regions: Vec<(Color, Vec<Point>)> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for idx in 0..cell_count {
        if cell_node[idx] != UNASSIGNED {
            continue;
        }
        let id = regions.len() as u32;
        let color = grid[idx];
        let mut fields = Vec::new();
        cell_node[idx] = id;
        stack.push(idx);
        while let Some(cur) = stack.pop() {
            fields.push(Point::from_index(cur, board_size));
            let x = cur % board_size;
            let y = cur / board_size;
            let mut visit = |nb: usize| {
                if cell_node[nb] == UNASSIGNED && grid[nb] == color {
                    cell_node[nb] = id;
                    stack.push(nb);
                }
            };
            if x > 0 {
                visit(cur - 1);
            }
            if x + 1 < board_size {
                visit(cur + 1);
            }
            if y > 0 {
                visit(cur - board_size);
            }
            if y + 1 < board_size {
                visit(cur + board_size);
            }
        }
        fields.sort_unstable();
        regions.push((color, fields));
    }

    let node_count = regions.len();
    let mut bordering: Vec<NodeSet> = vec![NodeSet::new(node_count); node_count];
    // One pass over the grid; checking only the right and down neighbor of
    // each cell covers every adjacent pair exactly once.
    for idx in 0..cell_count {
        let a = cell_node[idx] as usize;
        let x = idx % board_size;
        if x + 1 < board_size {
            let b = cell_node[idx + 1] as usize;
            if a != b {
                bordering[a].set(b);
                bordering[b].set(a);
            }
        }
        if idx + board_size < cell_count {
            let b = cell_node[idx + board_size] as usize;
            if a != b {
                bordering[a].set(b);
                bordering[b].set(a);
            }
        }
    }

    let nodes = regions
        .into_iter()
        .zip(bordering)
        .enumerate()
        .map(|(id, ((color, fields), bordering))| BoardNode {
            id: id as u32,
            color,
            fields: fields.into_boxed_slice(),
            bordering,
        })
        .collect();
    (nodes, cell_node)
}
