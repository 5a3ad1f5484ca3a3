//! The two-layer occupancy grid.

use maze_common::CellStatus;

/// Two parallel dense layers of cell occupancy.
///
/// Each layer is a flat `Vec<CellStatus>` indexed by `row * cols +
/// col`, not a `Vec<Vec<_>>`, matching the flat dense-buffer convention
/// this codebase uses for other per-cell state (see the distance
/// arrays in the NBG contraction-hierarchy query engine).
#[derive(Debug, Clone)]
pub struct Grid {
    rows: u32,
    cols: u32,
    layers: [Vec<CellStatus>; 2],
}

impl Grid {
    pub fn new(rows: u32, cols: u32) -> Self {
        let n = (rows as usize) * (cols as usize);
        Self {
            rows,
            cols,
            layers: [vec![CellStatus::Free; n], vec![CellStatus::Free; n]],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    pub fn in_bounds(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    pub fn status(&self, layer: u8, row: u32, col: u32) -> CellStatus {
        self.layers[layer as usize][self.index(row, col)]
    }

    /// Mark a cell permanently blocked. Idempotent. Must only be called
    /// before any search begins — marking obstacles mid-session would
    /// silently invalidate paths already committed around them.
    pub fn mark_obstacle(&mut self, layer: u8, row: u32, col: u32) {
        let idx = self.index(row, col);
        self.layers[layer as usize][idx] = CellStatus::Obstacle;
    }

    /// Commit one cell as occupied by a routed net.
    ///
    /// Requires the prior status to be `Free`; the caller (path search)
    /// must never propose committing a blocked cell, so a violation
    /// here is a bug in the search, not a data problem — hence the
    /// `debug_assert!` rather than a recoverable `Result`.
    pub fn commit_cell(&mut self, layer: u8, row: u32, col: u32) {
        let idx = self.index(row, col);
        debug_assert!(
            self.layers[layer as usize][idx] == CellStatus::Free,
            "commit_cell called on a non-free cell ({layer}, {row}, {col})"
        );
        self.layers[layer as usize][idx] = CellStatus::Committed;
    }

    pub fn commit_path(&mut self, path: &[maze_common::Cell]) {
        for cell in path {
            self.commit_cell(cell.layer, cell.row, cell.col);
        }
    }
}
