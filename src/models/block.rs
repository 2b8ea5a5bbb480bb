//! Block (working layout) model.
//!
//! A block is the engine's representation of one item during and after a
//! sweep. Blocks live in an arena (`Vec<Block>`) and are referenced by
//! [`BlockId`]; column slots hold `Option<BlockId>`.

use serde::{Deserialize, Serialize};

/// Index of a block in the sweep arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub usize);

impl BlockId {
    /// Arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One laid-out item.
///
/// Pixel offsets are measured from the top of the day's content area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Item identifier this block renders.
    pub id: String,
    /// Session of the item, if any.
    pub session_id: Option<String>,
    /// Top offset (px). `None` until the start checkpoint is swept.
    pub start: Option<u32>,
    /// Bottom offset (px). `None` until the block is closed.
    pub end: Option<u32>,
    /// Column within the block's parallel group.
    pub assigned: usize,
    /// Rendered with the collapsed treatment (too short for its content).
    pub collapsed: bool,
    /// Continues past midnight.
    pub unfinished: bool,
    /// Index of the parallel group the block belongs to.
    pub group: Option<usize>,
}

impl Block {
    /// Creates an unplaced block for an item.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            session_id: None,
            start: None,
            end: None,
            assigned: 0,
            collapsed: false,
            unfinished: false,
            group: None,
        }
    }

    /// Whether the start checkpoint has been swept.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Rendered height (px), once both offsets are known.
    pub fn height(&self) -> Option<u32> {
        Some(self.end?.saturating_sub(self.start?))
    }

    /// Whether two placed blocks share vertical pixels.
    ///
    /// Ranges are half-open: touching blocks do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.start, self.end, other.start, other.end) {
            (Some(s1), Some(e1), Some(s2), Some(e2)) => s1 < e2 && s2 < e1,
            _ => false,
        }
    }
}
