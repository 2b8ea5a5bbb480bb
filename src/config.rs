//! Layout constants.
//!
//! All pixel and time constants used by the sweep live here. Every section
//! carries serde defaults, so a partial document (JSON, TOML, ...) only
//! needs the values it overrides.
//!
//! # Defaults
//!
//! | Constant | Compact | Proportional |
//! |----------|---------|--------------|
//! | px per hour | 150 | 120 |
//! | min px per block | 50 | 25 |
//! | empty increment | 2 px | pixel step |
//!
//! Shared: 1 minute resolution, 7 hour whole-day threshold, 20 px padding
//! for blocks continuing past midnight.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Top-level layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Sweep increment (minutes). Must divide 60.
    pub resolution_min: u32,
    /// Posters lasting longer than this many hours go to the whole-day band.
    pub whole_day_hours: u32,
    /// Extra pixels appended to blocks that continue past midnight.
    pub unfinished_padding_px: u32,
    /// Compact layout constants.
    pub compact: CompactValues,
    /// Proportional layout constants.
    pub proportional: ProportionalValues,
}

/// Constants of the compact layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactValues {
    /// Pixels per hour while at least one block is active.
    pub px_per_hour: u32,
    /// Pixels per increment while nothing is active.
    pub px_per_space: u32,
    /// Minimum rendered block height.
    pub min_px_per_block: u32,
    /// Extra pixels per active increment.
    pub overlap_padding_px: u32,
}

/// Constants of the proportional layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProportionalValues {
    /// Pixels per hour, active or not.
    pub px_per_hour: u32,
    /// Minimum rendered block height.
    pub min_px_per_block: u32,
    /// Extra pixels per active increment.
    pub overlap_padding_px: u32,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            resolution_min: 1,
            whole_day_hours: 7,
            unfinished_padding_px: 20,
            compact: CompactValues::default(),
            proportional: ProportionalValues::default(),
        }
    }
}

impl Default for CompactValues {
    fn default() -> Self {
        Self {
            px_per_hour: 150,
            px_per_space: 2,
            min_px_per_block: 50,
            overlap_padding_px: 0,
        }
    }
}

impl Default for ProportionalValues {
    fn default() -> Self {
        Self {
            px_per_hour: 120,
            min_px_per_block: 25,
            overlap_padding_px: 0,
        }
    }
}

impl TimetableConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sweep resolution.
    pub fn with_resolution(mut self, resolution_min: u32) -> Self {
        self.resolution_min = resolution_min;
        self
    }

    /// Sets the whole-day threshold.
    pub fn with_whole_day_hours(mut self, hours: u32) -> Self {
        self.whole_day_hours = hours;
        self
    }

    /// Sets the compact layout constants.
    pub fn with_compact(mut self, values: CompactValues) -> Self {
        self.compact = values;
        self
    }

    /// Sets the proportional layout constants.
    pub fn with_proportional(mut self, values: ProportionalValues) -> Self {
        self.proportional = values;
        self
    }

    /// Whole-day threshold in minutes.
    #[inline]
    pub fn whole_day_minutes(&self) -> i64 {
        i64::from(self.whole_day_hours) * 60
    }

    /// Checks that every constant yields a usable sweep.
    ///
    /// # Errors
    /// - resolution of zero or not dividing 60
    /// - a layout whose pixel step rounds down to zero
    /// - a layout with a zero minimum block height
    pub fn validate(&self) -> Result<()> {
        if self.resolution_min == 0 || 60 % self.resolution_min != 0 {
            return Err(ConfigError::InvalidResolution(self.resolution_min));
        }

        let layouts = [
            (
                "compact",
                self.compact.px_per_hour,
                self.compact.min_px_per_block,
            ),
            (
                "proportional",
                self.proportional.px_per_hour,
                self.proportional.min_px_per_block,
            ),
        ];
        for (layout, px_per_hour, min_px) in layouts {
            if px_per_hour * self.resolution_min / 60 == 0 {
                return Err(ConfigError::EmptyPixelStep {
                    layout,
                    px_per_hour,
                    resolution_min: self.resolution_min,
                });
            }
            if min_px == 0 {
                return Err(ConfigError::ZeroMinimumHeight { layout });
            }
        }

        Ok(())
    }
}
