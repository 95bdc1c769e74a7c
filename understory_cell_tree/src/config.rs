// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable policy of a cell tree.

/// Split and extended-cell policy.
///
/// Both knobs apply when cells are created or filled; changing them on a live tree
/// affects future insertions only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Node count at which a cell pushes its residents down into children.
    ///
    /// The push happens once, on the insertion that brings the cell to exactly this count.
    /// `0` behaves like `1`.
    pub min_nodes_before_split: usize,
    /// Cells at a level below this may create extended children. `0` disables them.
    pub max_level_for_extended_cells: u32,
}

impl TreeConfig {
    /// Octree defaults: split at 8 nodes, no extended cells.
    pub const fn octree() -> Self {
        Self {
            min_nodes_before_split: 8,
            max_level_for_extended_cells: 0,
        }
    }

    /// Quadtree defaults: split at 4 nodes, no extended cells.
    pub const fn quadtree() -> Self {
        Self {
            min_nodes_before_split: 4,
            max_level_for_extended_cells: 0,
        }
    }

    /// Same config with a different split threshold.
    pub const fn with_min_nodes_before_split(mut self, min_nodes: usize) -> Self {
        self.min_nodes_before_split = min_nodes;
        self
    }

    /// Same config with a different extended-cell depth limit.
    pub const fn with_max_level_for_extended_cells(mut self, level: u32) -> Self {
        self.max_level_for_extended_cells = level;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::octree()
    }
}
