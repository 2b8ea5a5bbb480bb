//! Session column stability across redraws.
//!
//! The stability table remembers, per session, the column its blocks were
//! last placed in and which blocks have been laid out for it. After each
//! increment's greedy allocation, [`StabilityTable::reconcile`] tries to put
//! sessions back in their remembered column.
//!
//! # Lifecycle
//! One table per rendering surface. It is passed by `&mut` into every sweep
//! and survives between them; reset it when unrelated data is loaded.
//!
//! # Repair Rules
//! For a started block of a known session not in its preferred column:
//! - preferred column not open in this group → keep the greedy column;
//! - preferred column open but empty, block starts at the current offset →
//!   move there;
//! - preferred column held by a block starting at the same offset whose
//!   session is absent, new in this increment, or has fewer recorded blocks
//!   → swap the two.
//!
//! Repairs only move blocks between existing columns, so they never widen
//! a group.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::trace;

use crate::columns::ColumnTable;
use crate::models::{Block, BlockId};

/// Remembered placement of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlacement {
    /// Most recent column.
    pub col: usize,
    /// Item ids laid out for this session so far.
    pub blocks: BTreeSet<String>,
}

/// Per-session column memory (`lastAssigned`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityTable {
    sessions: BTreeMap<String, SessionPlacement>,
}

impl StabilityTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placement remembered for a session.
    pub fn get(&self, session_id: &str) -> Option<&SessionPlacement> {
        self.sessions.get(session_id)
    }

    /// Column a session prefers.
    pub fn preferred_column(&self, session_id: &str) -> Option<usize> {
        self.get(session_id).map(|p| p.col)
    }

    /// Number of distinct blocks laid out for a session.
    pub fn block_count(&self, session_id: &str) -> usize {
        self.get(session_id).map_or(0, |p| p.blocks.len())
    }

    /// Number of known sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session has been seen.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Forgets every session.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// Repairs the columns of the blocks started in one increment.
    ///
    /// `started` lists the increment's new blocks in allocation order and
    /// `current_px` is the offset they start at. Columns and blocks are
    /// updated together; afterwards every started session block's column
    /// is recorded as its session's preference.
    pub fn reconcile(
        &mut self,
        columns: &mut ColumnTable,
        blocks: &mut [Block],
        started: &[BlockId],
        current_px: u32,
    ) {
        // sessions first seen in this increment have no history to defend
        let mut fresh: HashSet<String> = HashSet::new();

        for &id in started {
            let Some(session) = blocks[id.index()].session_id.clone() else {
                continue;
            };
            let item_id = blocks[id.index()].id.clone();
            let current = blocks[id.index()].assigned;

            let preferred = match self.sessions.get_mut(&session) {
                Some(placement) => {
                    placement.blocks.insert(item_id);
                    placement.col
                }
                None => {
                    self.sessions.insert(
                        session.clone(),
                        SessionPlacement {
                            col: current,
                            blocks: BTreeSet::from([item_id]),
                        },
                    );
                    fresh.insert(session);
                    continue;
                }
            };

            if current == preferred {
                continue;
            }
            if !columns.has_column(preferred) {
                trace!(%session, preferred, "Preferred column not open in this group");
                continue;
            }

            match columns.occupant(preferred) {
                None => {
                    if blocks[id.index()].start == Some(current_px) {
                        columns.swap(current, preferred);
                        blocks[id.index()].assigned = preferred;
                        trace!(%session, from = current, to = preferred, "Moved block to free preferred column");
                    }
                }
                Some(other) => {
                    let holder = &blocks[other.index()];
                    let yields = match holder.session_id.as_deref() {
                        None => true,
                        // siblings of one session never trade places
                        Some(s) if s == session => false,
                        Some(s) if fresh.contains(s) => true,
                        Some(s) => self.block_count(s) < self.block_count(&session),
                    };
                    if yields && holder.start == blocks[id.index()].start {
                        columns.swap(current, preferred);
                        blocks[id.index()].assigned = preferred;
                        blocks[other.index()].assigned = current;
                        trace!(%session, from = current, to = preferred, "Swapped block into preferred column");
                    }
                }
            }
        }

        for &id in started {
            let block = &blocks[id.index()];
            if let Some(session) = &block.session_id {
                if let Some(placement) = self.sessions.get_mut(session) {
                    placement.col = block.assigned;
                }
            }
        }
    }
}
