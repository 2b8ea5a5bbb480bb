//! Timetable layout engine.
//!
//! Turns one day of possibly-overlapping scheduled items (talks, sessions,
//! breaks, posters) into a vertical pixel layout: every block gets a column
//! inside its parallel group, a top and bottom pixel offset, and the day gets
//! hour grid lines. Redraws of the same surface keep recurring sessions in
//! the same column.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Item` (input), `Block`, `DayLayout`,
//!   `ParallelGroup`, `GridLine`, `WholeDayBlock` (output)
//! - **`checkpoint`**: Time-keyed start/end/whole-day checkpoints
//! - **`columns`**: Lowest-free-column allocation within a parallel group
//! - **`stability`**: Per-session column history and reconciliation
//! - **`geometry`**: `PixelGeometry` strategies (`Compact`, `Proportional`)
//! - **`room`**: Room-keyed column policy
//! - **`sweep`**: The shared day sweep (`SweepScheduler`)
//! - **`manager`**: Layout selection by name, poster passthrough
//! - **`surface`**: A view that owns its stability history
//! - **`config`**: Layout constants with validation
//! - **`validation`**: Input integrity checks
//!
//! # Architecture
//!
//! Pure, synchronous computation. The only state retained between calls is
//! the caller-owned `StabilityTable`, passed by `&mut` into each sweep.
//! Strategies plug into one sweep driver; they supply constants and the
//! treatment of undersized blocks.
//!
//! # References
//!
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8
//!   (interval graph coloring)
//! - de Berg et al. (2008), "Computational Geometry", Ch. 2 (plane sweep)

pub mod checkpoint;
pub mod columns;
pub mod config;
pub mod error;
pub mod geometry;
pub mod manager;
pub mod models;
pub mod room;
pub mod stability;
pub mod surface;
pub mod sweep;
pub mod validation;

pub use config::TimetableConfig;
pub use error::{ConfigError, Result};
pub use geometry::{Compact, PixelGeometry, Proportional};
pub use manager::{DayOutcome, LayoutKind, LayoutManager};
pub use models::{DayLayout, Item};
pub use stability::StabilityTable;
pub use surface::TimetableSurface;
pub use sweep::{DayRequest, SweepScheduler};
