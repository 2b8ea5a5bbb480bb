//! Day sweep: turns a day's items into a [`DayLayout`].
//!
//! # Algorithm
//!
//! 1. Build the checkpoint table once.
//! 2. Resolve the hour bounds from the checkpoints (or the request's
//!    fallback bounds when there is at most one checkpoint).
//! 3. Walk the day in `resolution_min` increments; each increment closes
//!    blocks, opens blocks, allocates columns, reconciles session columns
//!    and advances the pixel offset according to the geometry strategy.
//! 4. Process the `nextday` checkpoint as a last increment, or add a
//!    trailing grid line.
//! 5. Stamp every block with its parallel group index.
//!
//! # Complexity
//! O(I + n log n) where I = number of increments and n = number of items,
//! plus O(c) per start for the column scan (c = columns in the group).

mod increment;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checkpoint::CheckpointTable;
use crate::config::TimetableConfig;
use crate::error::{ConfigError, Result};
use crate::geometry::PixelGeometry;
use crate::models::{DayLayout, GridLine, Item};
use crate::room::RoomColumns;
use crate::stability::StabilityTable;

use increment::{process_increment, Allocator, Increment, SweepState};

/// Per-call settings of a day layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRequest {
    /// Display granularity tag, passed through to renderers.
    pub detail_level: String,
    /// Fallback first hour (used with at most one checkpoint).
    pub start_hour: u32,
    /// Fallback last hour (used with at most one checkpoint).
    pub end_hour: u32,
    /// Sweep an extra empty hour before the first one.
    ///
    /// Off by default: only the editing view shows the leading hour.
    pub management_mode: bool,
}

impl Default for DayRequest {
    fn default() -> Self {
        Self {
            detail_level: "session".to_string(),
            start_hour: 8,
            end_hour: 17,
            management_mode: false,
        }
    }
}

impl DayRequest {
    /// Creates a request with the default `8:00`-`17:00` fallback bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the detail level tag.
    pub fn with_detail_level(mut self, level: impl Into<String>) -> Self {
        self.detail_level = level.into();
        self
    }

    /// Sets the fallback bounds from `"H:MM"` strings.
    ///
    /// Only the hours are used.
    pub fn with_bounds(mut self, start: &str, end: &str) -> Result<Self> {
        let start_hour = parse_hour(start)?;
        let end_hour = parse_hour(end)?;
        if start_hour > end_hour {
            return Err(ConfigError::InvertedDayBounds {
                start: start_hour,
                end: end_hour,
            });
        }
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        Ok(self)
    }

    /// Enables or disables the leading management hour.
    pub fn with_management_mode(mut self, enabled: bool) -> Self {
        self.management_mode = enabled;
        self
    }
}

/// Parses the hour of an `"H:MM"` string (`0:00` to `24:00`).
pub fn parse_hour(value: &str) -> Result<u32> {
    let invalid = || ConfigError::InvalidDayBound {
        value: value.to_string(),
    };
    let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if hour > 24 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour)
}

/// First and last hour swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepBounds {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl SweepBounds {
    /// Derives the bounds of a sweep.
    ///
    /// With two or more checkpoint keys the bounds span the earliest to the
    /// latest clock key. Otherwise the request's fallback bounds are used,
    /// widened to cover a lone checkpoint.
    pub fn resolve(table: &CheckpointTable, request: &DayRequest) -> Self {
        if table.key_count() > 1 {
            if let (Some(start_hour), Some(end_hour)) = (table.first_hour(), table.last_hour()) {
                return Self {
                    start_hour,
                    end_hour: end_hour.max(start_hour),
                };
            }
        }

        let mut bounds = Self {
            start_hour: request.start_hour,
            end_hour: request.end_hour.max(request.start_hour),
        };
        if let Some(hour) = table.first_hour() {
            bounds.start_hour = bounds.start_hour.min(hour);
            bounds.end_hour = bounds.end_hour.max(hour);
        }
        bounds
    }
}

/// How blocks are given columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnPolicy {
    /// Greedy interval coloring with session stability.
    #[default]
    Greedy,
    /// One fixed column per room.
    ByRoom,
}

/// Shared sweep driver, parameterised by a geometry strategy.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::config::TimetableConfig;
/// use u_timetable::geometry::Compact;
/// use u_timetable::models::Item;
/// use u_timetable::stability::StabilityTable;
/// use u_timetable::sweep::{DayRequest, SweepScheduler};
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
/// let t = |h, m| day.and_hms_opt(h, m, 0).unwrap();
/// let items = vec![
///     Item::new("1", t(9, 0), t(10, 0)),
///     Item::new("2", t(9, 30), t(10, 30)),
/// ];
///
/// let config = TimetableConfig::default();
/// let geometry = Compact::from_config(&config);
/// let mut stability = StabilityTable::new();
/// let layout = SweepScheduler::new(&config, &geometry)
///     .sweep(&items, &DayRequest::new(), &mut stability);
///
/// assert_eq!(layout.groups.len(), 1);
/// assert_eq!(layout.column_of("2"), Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SweepScheduler<'a> {
    config: &'a TimetableConfig,
    geometry: &'a dyn PixelGeometry,
    policy: ColumnPolicy,
}

impl<'a> SweepScheduler<'a> {
    /// Creates a greedy-column sweep.
    pub fn new(config: &'a TimetableConfig, geometry: &'a dyn PixelGeometry) -> Self {
        Self {
            config,
            geometry,
            policy: ColumnPolicy::Greedy,
        }
    }

    /// Sets the column policy.
    pub fn with_policy(mut self, policy: ColumnPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Lays out one day.
    ///
    /// `stability` is read and updated; pass the same table for every
    /// redraw of one surface.
    pub fn sweep(
        &self,
        items: &[Item],
        request: &DayRequest,
        stability: &mut StabilityTable,
    ) -> DayLayout {
        let table = CheckpointTable::build(items, self.config.whole_day_minutes());
        let bounds = SweepBounds::resolve(&table, request);
        let resolution = self.config.resolution_min.max(1);

        debug!(
            layout = self.geometry.name(),
            detail_level = %request.detail_level,
            start_hour = bounds.start_hour,
            end_hour = bounds.end_hour,
            checkpoints = table.key_count(),
            "Sweeping day"
        );

        let mut allocator = match self.policy {
            ColumnPolicy::Greedy => Allocator::Greedy,
            ColumnPolicy::ByRoom => Allocator::Rooms(RoomColumns::from_items(items)),
        };
        let mut state = SweepState::default();
        let mut step = |state: &mut SweepState, allocator: &mut Allocator, increment| {
            process_increment(
                self.config,
                self.geometry,
                &table,
                state,
                allocator,
                increment,
                stability,
            )
        };

        if request.management_mode && bounds.start_hour > 0 {
            let lead = (bounds.start_hour - 1) * 60;
            for offset in (0..60).step_by(resolution as usize) {
                step(&mut state, &mut allocator, Increment::clock(lead + offset, resolution));
            }
        }

        let day_start = bounds.start_hour * 60;
        let day_end = (bounds.end_hour + 1) * 60;
        for start_min in (day_start..day_end).step_by(resolution as usize) {
            step(&mut state, &mut allocator, Increment::clock(start_min, resolution));
        }

        if table.has_next_day() {
            step(&mut state, &mut allocator, Increment::next_day(day_end));
        } else if day_end / 60 < 25 {
            state.grid.push(GridLine::new((day_end / 60) % 24, state.top_px));
        }

        state.flush_group();
        if let Allocator::Rooms(rooms) = &mut allocator {
            rooms.finish(&mut state.blocks, &mut state.groups);
        }
        state.stamp_groups();

        let layout = state.into_layout();
        debug!(
            layout = self.geometry.name(),
            top_px = layout.top_px,
            blocks = layout.block_count(),
            groups = layout.groups.len(),
            whole_day = layout.whole_day_blocks.len(),
            "Day laid out"
        );
        layout
    }
}
