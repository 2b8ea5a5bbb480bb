//! Column allocation for one parallel group.
//!
//! # Algorithm
//! Greedy interval-graph coloring: starts are processed in time order and
//! each block takes the lowest column not holding an open block. For
//! interval graphs this is optimal: the number of columns equals the
//! largest number of simultaneously open blocks.
//!
//! # Reference
//! Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8

use crate::models::BlockId;

/// Open blocks of the current parallel group, one slot per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTable {
    slots: Vec<Option<BlockId>>,
}

impl ColumnTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a block in the first free column, opening a new one if needed.
    ///
    /// Returns the column.
    pub fn assign(&mut self, block: BlockId) -> usize {
        if let Some(col) = self.slots.iter().position(Option::is_none) {
            self.slots[col] = Some(block);
            return col;
        }
        self.slots.push(Some(block));
        self.slots.len() - 1
    }

    /// Places a block in a fixed column, opening columns up to it.
    pub fn place(&mut self, col: usize, block: BlockId) {
        if col >= self.slots.len() {
            self.slots.resize(col + 1, None);
        }
        self.slots[col] = Some(block);
    }

    /// Block currently open in a column.
    pub fn occupant(&self, col: usize) -> Option<BlockId> {
        self.slots.get(col).copied().flatten()
    }

    /// Frees a column if it still holds `block`.
    ///
    /// Returns `true` when the column was freed.
    pub fn release(&mut self, col: usize, block: BlockId) -> bool {
        match self.slots.get_mut(col) {
            Some(slot) if *slot == Some(block) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Exchanges the contents of two existing columns.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Whether a column has been opened in this group.
    #[inline]
    pub fn has_column(&self, col: usize) -> bool {
        col < self.slots.len()
    }

    /// Number of columns opened in this group.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of columns currently holding a block.
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Forgets every column (start of a new group).
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
