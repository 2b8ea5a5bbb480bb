//! Pixel geometry strategies.
//!
//! A strategy turns sweep increments into vertical pixels: how far the
//! offset advances per increment, how tall a block must be, and how an
//! undersized block is drawn. The sweep driver is shared; strategies only
//! supply constants and treatments.
//!
//! | Strategy | Active step | Empty step | Undersized block |
//! |----------|-------------|------------|------------------|
//! | [`Compact`] | px/hour × resolution | `px_per_space` | stretched, ends aligned |
//! | [`Proportional`] | px/hour × resolution | same as active | stretched, collapsed |

use std::fmt::Debug;

use crate::config::{CompactValues, ProportionalValues, TimetableConfig};

/// How a block shorter than the minimum height is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndersizedBlock {
    /// Stretched to the minimum height.
    Stretch,
    /// Stretched to the minimum height and flagged `collapsed`.
    Collapse,
}

/// Pixel policy plugged into the sweep.
pub trait PixelGeometry: Debug {
    /// Strategy name (e.g. "compact").
    fn name(&self) -> &'static str;

    /// Pixels per hour while blocks are active.
    fn px_per_hour(&self) -> u32;

    /// Minimum rendered block height.
    fn min_px_per_block(&self) -> u32;

    /// Treatment of blocks shorter than the minimum.
    fn undersized(&self) -> UndersizedBlock;

    /// Pixels one active increment occupies.
    fn px_step(&self, resolution_min: u32) -> u32 {
        self.px_per_hour() * resolution_min / 60
    }

    /// Pixels one increment occupies while nothing is active.
    fn empty_px(&self, resolution_min: u32) -> u32 {
        self.px_step(resolution_min)
    }

    /// Extra pixels per active increment.
    fn overlap_padding_px(&self) -> u32 {
        0
    }

    /// Whether blocks closing in the same increment share one bottom edge.
    fn aligns_closing_blocks(&self) -> bool {
        false
    }
}

/// Dense layout: empty time shrinks to a thin spacer.
#[derive(Debug, Clone, PartialEq)]
pub struct Compact {
    values: CompactValues,
}

impl Compact {
    /// Creates the strategy from its constants.
    pub fn new(values: CompactValues) -> Self {
        Self { values }
    }

    /// Creates the strategy from a full configuration.
    pub fn from_config(config: &TimetableConfig) -> Self {
        Self::new(config.compact.clone())
    }
}

impl Default for Compact {
    fn default() -> Self {
        Self::new(CompactValues::default())
    }
}

impl PixelGeometry for Compact {
    fn name(&self) -> &'static str {
        "compact"
    }

    fn px_per_hour(&self) -> u32 {
        self.values.px_per_hour
    }

    fn min_px_per_block(&self) -> u32 {
        self.values.min_px_per_block
    }

    fn undersized(&self) -> UndersizedBlock {
        UndersizedBlock::Stretch
    }

    fn empty_px(&self, _resolution_min: u32) -> u32 {
        self.values.px_per_space
    }

    fn overlap_padding_px(&self) -> u32 {
        self.values.overlap_padding_px
    }

    fn aligns_closing_blocks(&self) -> bool {
        true
    }
}

/// Time-true layout: every minute takes the same height.
#[derive(Debug, Clone, PartialEq)]
pub struct Proportional {
    values: ProportionalValues,
}

impl Proportional {
    /// Creates the strategy from its constants.
    pub fn new(values: ProportionalValues) -> Self {
        Self { values }
    }

    /// Creates the strategy from a full configuration.
    pub fn from_config(config: &TimetableConfig) -> Self {
        Self::new(config.proportional.clone())
    }
}

impl Default for Proportional {
    fn default() -> Self {
        Self::new(ProportionalValues::default())
    }
}

impl PixelGeometry for Proportional {
    fn name(&self) -> &'static str {
        "proportional"
    }

    fn px_per_hour(&self) -> u32 {
        self.values.px_per_hour
    }

    fn min_px_per_block(&self) -> u32 {
        self.values.min_px_per_block
    }

    fn undersized(&self) -> UndersizedBlock {
        UndersizedBlock::Collapse
    }

    fn overlap_padding_px(&self) -> u32 {
        self.values.overlap_padding_px
    }
}
