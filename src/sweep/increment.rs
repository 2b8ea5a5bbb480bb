//! Per-increment processing shared by every geometry strategy.
//!
//! # Steps
//! 1. Collect the checkpoints of the increment window.
//! 2. Close ending blocks at the current offset, stretching undersized ones;
//!    blocks that end before they were opened are deferred.
//! 3. Emit a grid line on whole hours.
//! 4. Flush the parallel group when nothing is active.
//! 5. Open starting blocks; divert whole-day items.
//! 6. Reconcile session columns.
//! 7. Advance the offset (active step or empty step).
//! 8. Close deferred blocks at the minimum height.

use std::collections::HashMap;
use tracing::trace;

use crate::checkpoint::{Checkpoint, CheckpointKind, CheckpointTable, TimeKey};
use crate::columns::ColumnTable;
use crate::config::TimetableConfig;
use crate::geometry::{PixelGeometry, UndersizedBlock};
use crate::models::{Block, BlockId, DayLayout, GridLine, ParallelGroup, WholeDayBlock};
use crate::room::RoomColumns;
use crate::stability::StabilityTable;

/// Checkpoint window of one increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Window {
    /// `[from, to)` as `HHMM` boundaries.
    Clock { from_hhmm: u32, to_hhmm: u32 },
    /// Ends of items continuing past midnight.
    NextDay,
}

/// One sweep step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Increment {
    pub window: Window,
    /// Minutes since midnight at the start of the increment.
    pub start_min: u32,
}

impl Increment {
    pub fn clock(start_min: u32, resolution_min: u32) -> Self {
        Self {
            window: Window::Clock {
                from_hhmm: hhmm(start_min),
                to_hhmm: hhmm(start_min + resolution_min),
            },
            start_min,
        }
    }

    pub fn next_day(start_min: u32) -> Self {
        Self {
            window: Window::NextDay,
            start_min,
        }
    }

    pub fn is_next_day(&self) -> bool {
        self.window == Window::NextDay
    }

    /// Hour starting at this increment, if it is on a whole hour.
    pub fn whole_hour(&self) -> Option<u32> {
        (self.start_min % 60 == 0).then_some(self.start_min / 60)
    }
}

fn hhmm(minutes: u32) -> u32 {
    (minutes / 60) * 100 + minutes % 60
}

/// Column allocation in effect for a sweep.
#[derive(Debug, Clone)]
pub(crate) enum Allocator {
    Greedy,
    Rooms(RoomColumns),
}

impl Allocator {
    fn assign(&mut self, columns: &mut ColumnTable, id: BlockId, item_id: &str) -> usize {
        match self {
            Allocator::Greedy => columns.assign(id),
            Allocator::Rooms(rooms) => {
                let col = rooms.column_for(item_id);
                columns.place(col, id);
                col
            }
        }
    }

    fn reconciles(&self) -> bool {
        matches!(self, Allocator::Greedy)
    }
}

/// Accumulator threaded through the increments of one sweep.
#[derive(Debug, Default)]
pub(crate) struct SweepState {
    pub top_px: u32,
    pub columns: ColumnTable,
    pub current_group: Vec<BlockId>,
    pub blocks: Vec<Block>,
    pub index: HashMap<String, BlockId>,
    pub groups: Vec<ParallelGroup>,
    pub grid: Vec<GridLine>,
    pub whole_day: Vec<WholeDayBlock>,
    pub active: usize,
}

impl SweepState {
    /// Block for an item, created on first reference.
    fn block_for(&mut self, item_id: &str) -> BlockId {
        if let Some(&id) = self.index.get(item_id) {
            return id;
        }
        let id = BlockId(self.blocks.len());
        self.blocks.push(Block::new(item_id));
        self.index.insert(item_id.to_string(), id);
        id
    }

    fn add_whole_day(&mut self, item_id: &str) {
        if !self.whole_day.iter().any(|w| w.id == item_id) {
            self.whole_day.push(WholeDayBlock::new(item_id));
        }
    }

    /// Emits the current group and starts a new one.
    pub fn flush_group(&mut self) {
        if self.current_group.is_empty() {
            return;
        }
        let group = ParallelGroup {
            blocks: std::mem::take(&mut self.current_group),
            column_count: self.columns.column_count(),
        };
        trace!(
            group = self.groups.len(),
            blocks = group.blocks.len(),
            columns = group.column_count,
            "Parallel group closed"
        );
        self.groups.push(group);
        self.columns.clear();
    }

    /// Stamps every block with the index of its group.
    pub fn stamp_groups(&mut self) {
        for (index, group) in self.groups.iter().enumerate() {
            for id in &group.blocks {
                self.blocks[id.index()].group = Some(index);
            }
        }
    }

    pub fn into_layout(self) -> DayLayout {
        DayLayout::new(self.top_px, self.grid, self.blocks, self.groups, self.whole_day)
    }
}

/// Runs one increment of the sweep.
pub(crate) fn process_increment(
    config: &TimetableConfig,
    geometry: &dyn PixelGeometry,
    table: &CheckpointTable,
    state: &mut SweepState,
    allocator: &mut Allocator,
    increment: Increment,
    stability: &mut StabilityTable,
) {
    let points: Vec<&Checkpoint> = match increment.window {
        Window::Clock { from_hhmm, to_hhmm } => table.between(from_hhmm, to_hhmm).collect(),
        Window::NextDay => table.at(TimeKey::NextDay).iter().collect(),
    };
    let min_px = geometry.min_px_per_block();
    let collapse = geometry.undersized() == UndersizedBlock::Collapse;

    let mut closing = Vec::new();
    let mut small = Vec::new();
    let mut shortfall = 0;

    for point in points.iter().filter(|p| p.kind == CheckpointKind::End) {
        let id = state.block_for(&point.item_id);
        let top_px = state.top_px;
        let block = &mut state.blocks[id.index()];
        let Some(start) = block.start else {
            small.push(id);
            continue;
        };

        state.active = state.active.saturating_sub(1);
        state.columns.release(block.assigned, id);

        let height = top_px.saturating_sub(start);
        block.end = Some(top_px);
        if height < min_px {
            block.end = Some(start + min_px);
            block.collapsed |= collapse;
            shortfall = shortfall.max(min_px - height);
        }
        closing.push(id);
    }
    state.top_px += shortfall;

    if geometry.aligns_closing_blocks() {
        let bottom = closing
            .iter()
            .filter_map(|id| state.blocks[id.index()].end)
            .max();
        if let Some(bottom) = bottom {
            for id in &closing {
                state.blocks[id.index()].end = Some(bottom);
            }
        }
    }

    if increment.is_next_day() {
        for id in &closing {
            let block = &mut state.blocks[id.index()];
            block.unfinished = true;
            if let Some(end) = block.end.as_mut() {
                *end += config.unfinished_padding_px;
                state.top_px = state.top_px.max(*end);
            }
        }
    }

    if let Some(hour) = increment.whole_hour().filter(|&h| h <= 24) {
        state.grid.push(GridLine::new(hour % 24, state.top_px));
    }

    if state.active == 0 {
        state.flush_group();
    }

    let mut started = Vec::new();
    for point in &points {
        match point.kind {
            CheckpointKind::Start => {
                let id = state.block_for(&point.item_id);
                let col = allocator.assign(&mut state.columns, id, &point.item_id);
                let block = &mut state.blocks[id.index()];
                block.session_id = point.session_id.clone();
                block.start = Some(state.top_px);
                block.assigned = col;
                state.active += 1;
                state.current_group.push(id);
                started.push(id);
            }
            CheckpointKind::WholeDay => state.add_whole_day(&point.item_id),
            CheckpointKind::End => {}
        }
    }

    if !started.is_empty() && allocator.reconciles() {
        stability.reconcile(&mut state.columns, &mut state.blocks, &started, state.top_px);
    }

    if state.active > 0 {
        state.top_px += geometry.px_step(config.resolution_min) + geometry.overlap_padding_px();
    } else {
        state.top_px += geometry.empty_px(config.resolution_min);
    }

    let mut closed_small = false;
    for id in small {
        let block = &mut state.blocks[id.index()];
        let Some(start) = block.start else {
            trace!(item = %block.id, "End checkpoint for a block that never started");
            continue;
        };
        block.end = Some(start + min_px);
        block.collapsed |= collapse;
        state.columns.release(block.assigned, id);
        state.active = state.active.saturating_sub(1);
        closed_small = true;
    }
    if closed_small {
        state.top_px += min_px;
    }
}
