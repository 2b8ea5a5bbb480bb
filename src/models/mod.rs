//! Timetable domain models.
//!
//! Provides the input item type, the block arena entries the sweep works
//! on, and the day layout returned to renderers.
//!
//! # Data Flow
//!
//! | Stage | Type | Owner |
//! |-------|------|-------|
//! | Input | `Item` | caller |
//! | Sweep | `Block` (arena, `BlockId`) | sweep |
//! | Output | `DayLayout`, `ParallelGroup`, `GridLine`, `WholeDayBlock` | caller |

mod block;
mod item;
mod layout;

pub use block::{Block, BlockId};
pub use item::Item;
pub use layout::{DayLayout, GridLine, ParallelGroup, WholeDayBlock};
