//! Day layout (solution) model.
//!
//! The result of one sweep: total content height, hour grid lines, every
//! laid-out block, the parallel groups that partition them, and the items
//! diverted to the whole-day band.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Block, BlockId};

/// An hour gridline at a pixel offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLine {
    /// Hour label (0-23).
    pub hour: u32,
    /// Vertical offset (px).
    pub px: u32,
}

impl GridLine {
    /// Creates a grid line.
    pub fn new(hour: u32, px: u32) -> Self {
        Self { hour, px }
    }
}

/// A maximal run of time with at least one active block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelGroup {
    /// Member blocks, in start order.
    pub blocks: Vec<BlockId>,
    /// Number of columns the group is rendered with.
    pub column_count: usize,
}

/// An item rendered as a full-width band outside the column grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WholeDayBlock {
    /// Item identifier.
    pub id: String,
}

impl WholeDayBlock {
    /// Creates a whole-day block.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Complete layout of one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayLayout {
    /// Total content height (px).
    pub top_px: u32,
    /// Hour gridlines in sweep order.
    pub grid: Vec<GridLine>,
    /// Block arena, indexed by [`BlockId`].
    pub blocks: Vec<Block>,
    /// Parallel groups in emission order.
    pub groups: Vec<ParallelGroup>,
    /// Items diverted out of the column grid.
    pub whole_day_blocks: Vec<WholeDayBlock>,
    #[serde(skip)]
    index: HashMap<String, BlockId>,
}

impl DayLayout {
    pub(crate) fn new(
        top_px: u32,
        grid: Vec<GridLine>,
        blocks: Vec<Block>,
        groups: Vec<ParallelGroup>,
        whole_day_blocks: Vec<WholeDayBlock>,
    ) -> Self {
        let index = blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id.clone(), BlockId(i)))
            .collect();
        Self {
            top_px,
            grid,
            blocks,
            groups,
            whole_day_blocks,
            index,
        }
    }

    /// Finds the block laid out for an item.
    pub fn block(&self, item_id: &str) -> Option<&Block> {
        self.index.get(item_id).map(|&id| &self.blocks[id.index()])
    }

    /// Resolves a block reference.
    pub fn block_at(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Column assigned to an item, if it was laid out.
    pub fn column_of(&self, item_id: &str) -> Option<usize> {
        self.block(item_id).map(|b| b.assigned)
    }

    /// Group an item belongs to.
    pub fn group_of(&self, item_id: &str) -> Option<&ParallelGroup> {
        let group = self.block(item_id)?.group?;
        self.groups.get(group)
    }

    /// Blocks of a group, in start order.
    pub fn group_blocks<'a>(&'a self, group: &'a ParallelGroup) -> impl Iterator<Item = &'a Block> {
        group.blocks.iter().map(move |&id| self.block_at(id))
    }

    /// Whether an item was diverted to the whole-day band.
    pub fn is_whole_day(&self, item_id: &str) -> bool {
        self.whole_day_blocks.iter().any(|w| w.id == item_id)
    }

    /// Widest group's column count (0 for an empty day).
    pub fn max_columns(&self) -> usize {
        self.groups.iter().map(|g| g.column_count).max().unwrap_or(0)
    }

    /// Number of laid-out blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
