//! Timetable item (input) model.
//!
//! An item is one scheduled entry of a day: a talk, a session slot, a
//! break or a poster block. Items are owned by the caller and read-only
//! to the layout engine.
//!
//! # Time Model
//! Timestamps are local wall-clock values (`NaiveDateTime`). The engine
//! only looks at the time-of-day part; the date is used by validation.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// A scheduled timetable entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identifier.
    pub id: String,
    /// Start timestamp. `None` = unscheduled.
    pub start: Option<NaiveDateTime>,
    /// End timestamp. `None` = derive from `start + duration_min`.
    pub end: Option<NaiveDateTime>,
    /// Stability key: items of the same session try to keep their column.
    pub session_id: Option<String>,
    /// Session ordering hint (lower codes are registered first).
    pub session_code: Option<i64>,
    /// Duration in minutes.
    pub duration_min: i64,
    /// Whether this item is a poster block.
    pub is_poster: bool,
    /// Room name (used by the room layout).
    pub room: Option<String>,
}

impl Item {
    /// Creates a scheduled item spanning `[start, end)`.
    ///
    /// The duration is derived from the two timestamps.
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start: Some(start),
            end: Some(end),
            session_id: None,
            session_code: None,
            duration_min: (end - start).num_minutes(),
            is_poster: false,
            room: None,
        }
    }

    /// Creates an item that has not been placed in the timetable yet.
    pub fn unscheduled(id: impl Into<String>, duration_min: i64) -> Self {
        Self {
            id: id.into(),
            start: None,
            end: None,
            session_id: None,
            session_code: None,
            duration_min,
            is_poster: false,
            room: None,
        }
    }

    /// Sets the session (stability key).
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Sets the session ordering code.
    pub fn with_session_code(mut self, code: i64) -> Self {
        self.session_code = Some(code);
        self
    }

    /// Overrides the duration (minutes).
    pub fn with_duration(mut self, duration_min: i64) -> Self {
        self.duration_min = duration_min;
        self
    }

    /// Marks the item as a poster block.
    pub fn as_poster(mut self) -> Self {
        self.is_poster = true;
        self
    }

    /// Sets the room name.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Whether the item has a start timestamp.
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.start.is_some()
    }

    /// End timestamp, falling back to `start + duration` when absent.
    pub fn effective_end(&self) -> Option<NaiveDateTime> {
        match self.end {
            Some(end) => Some(end),
            None => {
                let start = self.start?;
                start.checked_add_signed(TimeDelta::try_minutes(self.duration_min)?)
            }
        }
    }

    /// Room name with surrounding whitespace removed; blank rooms are `None`.
    pub fn room_name(&self) -> Option<&str> {
        self.room
            .as_deref()
            .map(str::trim)
            .filter(|room| !room.is_empty())
    }
}
