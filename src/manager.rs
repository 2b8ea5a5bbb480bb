//! Layout selection by name.
//!
//! | Kind | Geometry | Columns | Output |
//! |------|----------|---------|--------|
//! | `compact` | [`Compact`] | greedy + stability | [`DayLayout`] |
//! | `proportional` | [`Proportional`] | greedy + stability | [`DayLayout`] |
//! | `room` | [`Compact`] | one per room | [`DayLayout`] |
//! | `poster` | none | none | items unchanged |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TimetableConfig;
use crate::error::{ConfigError, Result};
use crate::geometry::{Compact, Proportional};
use crate::models::{DayLayout, Item};
use crate::stability::StabilityTable;
use crate::sweep::{ColumnPolicy, DayRequest, SweepScheduler};

/// Available layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Compact,
    Proportional,
    Room,
    Poster,
}

impl LayoutKind {
    /// Registered name of the layout.
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Compact => "compact",
            LayoutKind::Proportional => "proportional",
            LayoutKind::Room => "room",
            LayoutKind::Poster => "poster",
        }
    }

    /// All layouts, in registration order.
    pub fn all() -> [LayoutKind; 4] {
        [
            LayoutKind::Compact,
            LayoutKind::Proportional,
            LayoutKind::Room,
            LayoutKind::Poster,
        ]
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownLayout(name.to_string()))
    }
}

/// Result of drawing one day.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    /// Swept layout.
    Laid(DayLayout),
    /// Items handed back untouched (poster layout).
    Passthrough(Vec<Item>),
}

impl DayOutcome {
    /// The swept layout, if any.
    pub fn layout(&self) -> Option<&DayLayout> {
        match self {
            DayOutcome::Laid(layout) => Some(layout),
            DayOutcome::Passthrough(_) => None,
        }
    }

    /// Consumes the outcome, keeping the swept layout.
    pub fn into_layout(self) -> Option<DayLayout> {
        match self {
            DayOutcome::Laid(layout) => Some(layout),
            DayOutcome::Passthrough(_) => None,
        }
    }

    /// The passthrough items, if any.
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            DayOutcome::Laid(_) => None,
            DayOutcome::Passthrough(items) => Some(items),
        }
    }
}

/// Draws days with one layout and one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutManager {
    kind: LayoutKind,
    config: TimetableConfig,
}

impl LayoutManager {
    /// Creates a manager after validating the configuration.
    pub fn new(kind: LayoutKind, config: TimetableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { kind, config })
    }

    /// Creates a manager from a layout name.
    pub fn by_name(name: &str, config: TimetableConfig) -> Result<Self> {
        Self::new(name.parse()?, config)
    }

    #[inline]
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    #[inline]
    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Lays out one day.
    pub fn draw_day(
        &self,
        items: &[Item],
        request: &DayRequest,
        stability: &mut StabilityTable,
    ) -> DayOutcome {
        debug!(layout = self.kind.name(), items = items.len(), "Drawing day");
        match self.kind {
            LayoutKind::Compact => {
                let geometry = Compact::from_config(&self.config);
                let sweep = SweepScheduler::new(&self.config, &geometry);
                DayOutcome::Laid(sweep.sweep(items, request, stability))
            }
            LayoutKind::Proportional => {
                let geometry = Proportional::from_config(&self.config);
                let sweep = SweepScheduler::new(&self.config, &geometry);
                DayOutcome::Laid(sweep.sweep(items, request, stability))
            }
            LayoutKind::Room => {
                let geometry = Compact::from_config(&self.config);
                let sweep =
                    SweepScheduler::new(&self.config, &geometry).with_policy(ColumnPolicy::ByRoom);
                DayOutcome::Laid(sweep.sweep(items, request, stability))
            }
            LayoutKind::Poster => DayOutcome::Passthrough(items.to_vec()),
        }
    }
}
