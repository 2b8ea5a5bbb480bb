//! A rendering surface: one layout manager plus the stability history of
//! everything it has drawn.
//!
//! Redraws of the same surface keep session columns stable. Loading a new
//! event resets the history; tearing the surface down drops it.

use tracing::debug;

use crate::manager::{DayOutcome, LayoutManager};
use crate::models::Item;
use crate::stability::StabilityTable;
use crate::sweep::DayRequest;

/// Owns the stability table of one timetable view.
#[derive(Debug, Clone)]
pub struct TimetableSurface {
    manager: LayoutManager,
    stability: StabilityTable,
}

impl TimetableSurface {
    /// Creates a surface with an empty history.
    pub fn new(manager: LayoutManager) -> Self {
        Self {
            manager,
            stability: StabilityTable::new(),
        }
    }

    /// Draws (or redraws) one day.
    pub fn draw_day(&mut self, items: &[Item], request: &DayRequest) -> DayOutcome {
        self.manager.draw_day(items, request, &mut self.stability)
    }

    /// Switches layout, keeping the history.
    pub fn set_manager(&mut self, manager: LayoutManager) {
        self.manager = manager;
    }

    /// Forgets every session column (new event data loaded).
    pub fn reset(&mut self) {
        debug!(sessions = self.stability.len(), "Stability history reset");
        self.stability.clear();
    }

    #[inline]
    pub fn manager(&self) -> &LayoutManager {
        &self.manager
    }

    #[inline]
    pub fn stability(&self) -> &StabilityTable {
        &self.stability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;
    use crate::manager::LayoutKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn surface() -> TimetableSurface {
        TimetableSurface::new(LayoutManager::new(LayoutKind::Compact, TimetableConfig::default()).unwrap())
    }

    fn first_day() -> Vec<Item> {
        vec![
            Item::new("1", at(9), at(10)).with_session("A"),
            Item::new("2", at(9), at(10)).with_session("B"),
            Item::new("4", at(9), at(10)).with_session("X"),
        ]
    }

    fn second_day() -> Vec<Item> {
        let mut items = first_day();
        items.push(Item::new("3", at(9), at(10)).with_session("Y"));
        items
    }

    #[test]
    fn test_redraw_keeps_session_columns() {
        let mut surface = surface();
        surface.draw_day(&first_day(), &DayRequest::new());
        assert_eq!(surface.stability().len(), 3);

        let outcome = surface.draw_day(&second_day(), &DayRequest::new());
        assert_eq!(outcome.layout().unwrap().column_of("4"), Some(2));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut surface = surface();
        surface.draw_day(&first_day(), &DayRequest::new());
        surface.reset();
        assert!(surface.stability().is_empty());

        // greedy order only: X lands after Y
        let outcome = surface.draw_day(&second_day(), &DayRequest::new());
        assert_eq!(outcome.layout().unwrap().column_of("4"), Some(3));
    }

    #[test]
    fn test_switching_layout_keeps_history() {
        let mut surface = surface();
        surface.draw_day(&first_day(), &DayRequest::new());
        surface.set_manager(
            LayoutManager::new(LayoutKind::Proportional, TimetableConfig::default()).unwrap(),
        );
        assert_eq!(surface.manager().kind(), LayoutKind::Proportional);

        let outcome = surface.draw_day(&second_day(), &DayRequest::new());
        assert_eq!(outcome.layout().unwrap().column_of("4"), Some(2));
    }
}
