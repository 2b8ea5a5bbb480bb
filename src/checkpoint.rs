//! Checkpoint table construction.
//!
//! A checkpoint is a time of day where items start, end, or register as
//! whole-day entries. The table maps each time key to the checkpoints
//! registered there and is rebuilt for every sweep.
//!
//! # Time Keys
//! Keys are `HHMMSS` values (`093000` = 09:30:00). Two special cases:
//! - an end at `000000` means end of day and is stored as `240000`;
//! - an end before its start (the item crosses midnight) is stored under
//!   [`TimeKey::NextDay`], which sorts after every clock key.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

use crate::models::Item;

/// A checkpoint time key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeKey {
    /// Wall-clock time as `HHMMSS`.
    At(u32),
    /// Ends of items that continue into the following day.
    NextDay,
}

impl TimeKey {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: TimeKey = TimeKey::At(0);
    /// Midnight at the end of the day.
    pub const END_OF_DAY: TimeKey = TimeKey::At(240000);

    /// Key for a time of day.
    pub fn from_time(time: NaiveTime) -> Self {
        TimeKey::At(time.hour() * 10000 + time.minute() * 100 + time.second())
    }

    /// Key at the start of an `HHMM` boundary.
    #[inline]
    pub fn from_hhmm(hhmm: u32) -> Self {
        TimeKey::At(hhmm * 100)
    }

    /// Hour component. `None` for [`TimeKey::NextDay`].
    pub fn hour(self) -> Option<u32> {
        match self {
            TimeKey::At(hhmmss) => Some(hhmmss / 10000),
            TimeKey::NextDay => None,
        }
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeKey::At(hhmmss) => write!(f, "{hhmmss:06}"),
            TimeKey::NextDay => f.write_str("nextday"),
        }
    }
}

/// What happens at a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointKind {
    /// The item starts and needs a column.
    Start,
    /// The item ends and releases its column.
    End,
    /// The item bypasses the grid entirely.
    WholeDay,
}

/// One registered event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Item identifier.
    pub item_id: String,
    /// Event type.
    pub kind: CheckpointKind,
    /// Session of the item (start and whole-day events only).
    pub session_id: Option<String>,
}

/// Time-indexed checkpoint table for one sweep.
#[derive(Debug, Clone, Default)]
pub struct CheckpointTable {
    points: BTreeMap<TimeKey, Vec<Checkpoint>>,
}

impl CheckpointTable {
    /// Builds the table for a day's items.
    ///
    /// Items are registered in session-code order, then by id, so starts at
    /// the same time are allocated columns deterministically. Unscheduled
    /// items are skipped. Posters longer than `whole_day_min` minutes only
    /// get a whole-day checkpoint at their start.
    pub fn build(items: &[Item], whole_day_min: i64) -> Self {
        let mut table = Self::default();

        for item in registration_order(items) {
            let (Some(start), Some(end)) = (item.start, item.effective_end()) else {
                trace!(item = %item.id, "Skipping unscheduled item");
                continue;
            };
            let s_key = TimeKey::from_time(start.time());
            let e_key = TimeKey::from_time(end.time());

            if item.is_poster && item.duration_min > whole_day_min {
                table.add(s_key, &item.id, CheckpointKind::WholeDay, item.session_id.clone());
                continue;
            }

            table.add(s_key, &item.id, CheckpointKind::Start, item.session_id.clone());
            let end_key = end_key_for(s_key, e_key);
            table.add(end_key, &item.id, CheckpointKind::End, None);
        }

        table
    }

    fn add(&mut self, key: TimeKey, item_id: &str, kind: CheckpointKind, session_id: Option<String>) {
        self.points.entry(key).or_default().push(Checkpoint {
            item_id: item_id.to_string(),
            kind,
            session_id,
        });
    }

    /// Distinct keys in ascending order (`NextDay` last).
    pub fn keys(&self) -> impl Iterator<Item = TimeKey> + '_ {
        self.points.keys().copied()
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.points.len()
    }

    /// Whether no checkpoint was registered.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Checkpoints registered under a key.
    pub fn at(&self, key: TimeKey) -> &[Checkpoint] {
        self.points.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether some item continues past midnight.
    pub fn has_next_day(&self) -> bool {
        self.points.contains_key(&TimeKey::NextDay)
    }

    /// Checkpoints in `[from, to)`, both `HHMM` boundaries, in key order.
    pub fn between(&self, from_hhmm: u32, to_hhmm: u32) -> impl Iterator<Item = &Checkpoint> {
        self.points
            .range(TimeKey::from_hhmm(from_hhmm)..TimeKey::from_hhmm(to_hhmm))
            .flat_map(|(_, points)| points.iter())
    }

    /// Hour of the earliest clock key.
    pub fn first_hour(&self) -> Option<u32> {
        self.keys().next().and_then(TimeKey::hour)
    }

    /// Hour of the latest clock key, ignoring `NextDay`.
    pub fn last_hour(&self) -> Option<u32> {
        self.points.keys().rev().find_map(|key| key.hour())
    }
}

/// Where the end checkpoint of an item goes.
fn end_key_for(start: TimeKey, end: TimeKey) -> TimeKey {
    match end.cmp(&start) {
        Ordering::Greater => end,
        _ if end == TimeKey::MIDNIGHT => TimeKey::END_OF_DAY,
        // zero-length item: closes in its own increment
        Ordering::Equal => end,
        Ordering::Less => TimeKey::NextDay,
    }
}

/// Numeric ids sort numerically and before textual ids.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum IdKey<'a> {
    Numeric(i64),
    Text(&'a str),
}

impl<'a> IdKey<'a> {
    fn of(id: &'a str) -> Self {
        id.parse().map(IdKey::Numeric).unwrap_or(IdKey::Text(id))
    }
}

/// Orders items for registration.
///
/// Two items with a session code are ordered by code; any other pair is
/// ordered by id. Items are sorted by id, then the slots held by coded items
/// are refilled with those items in code order, so the result does not
/// depend on input order.
fn registration_order(items: &[Item]) -> Vec<&Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by(|a, b| IdKey::of(&a.id).cmp(&IdKey::of(&b.id)));

    let slots: Vec<usize> = (0..ordered.len())
        .filter(|&i| ordered[i].session_code.is_some())
        .collect();
    let mut coded: Vec<&Item> = slots.iter().map(|&i| ordered[i]).collect();
    // stable: equal codes keep id order
    coded.sort_by_key(|item| item.session_code);
    for (slot, item) in slots.into_iter().zip(coded) {
        ordered[slot] = item;
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn next_day(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 7)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn kinds(table: &CheckpointTable, key: TimeKey) -> Vec<(String, CheckpointKind)> {
        table
            .at(key)
            .iter()
            .map(|c| (c.item_id.clone(), c.kind))
            .collect()
    }

    #[test]
    fn test_time_key_format() {
        assert_eq!(TimeKey::At(93000).to_string(), "093000");
        assert_eq!(TimeKey::END_OF_DAY.to_string(), "240000");
        assert_eq!(TimeKey::NextDay.to_string(), "nextday");
        assert_eq!(TimeKey::from_time(at(9, 5, 30).time()), TimeKey::At(90530));
        assert!(TimeKey::NextDay > TimeKey::END_OF_DAY);
        assert_eq!(TimeKey::At(173000).hour(), Some(17));
        assert_eq!(TimeKey::NextDay.hour(), None);
    }

    #[test]
    fn test_start_and_end_checkpoints() {
        let items = vec![Item::new("1", at(9, 0, 0), at(10, 0, 0)).with_session("S1")];
        let table = CheckpointTable::build(&items, 420);

        assert_eq!(table.key_count(), 2);
        let start = table.at(TimeKey::At(90000));
        assert_eq!(start[0].kind, CheckpointKind::Start);
        assert_eq!(start[0].session_id.as_deref(), Some("S1"));
        assert_eq!(kinds(&table, TimeKey::At(100000)), vec![("1".into(), CheckpointKind::End)]);
    }

    #[test]
    fn test_end_at_midnight_becomes_end_of_day() {
        let items = vec![Item::new("1", at(23, 0, 0), next_day(0, 0))];
        let table = CheckpointTable::build(&items, 420);

        assert_eq!(kinds(&table, TimeKey::END_OF_DAY), vec![("1".into(), CheckpointKind::End)]);
        assert!(!table.has_next_day());
        assert_eq!(table.last_hour(), Some(24));
    }

    #[test]
    fn test_crossing_midnight_goes_to_next_day() {
        let items = vec![Item::new("1", at(23, 30, 0), next_day(1, 0))];
        let table = CheckpointTable::build(&items, 420);

        assert!(table.has_next_day());
        assert_eq!(kinds(&table, TimeKey::NextDay), vec![("1".into(), CheckpointKind::End)]);
        // NextDay is ignored for the last hour
        assert_eq!(table.last_hour(), Some(23));
        assert_eq!(table.keys().last(), Some(TimeKey::NextDay));
    }

    #[test]
    fn test_zero_length_item_ends_at_its_start() {
        let items = vec![Item::new("1", at(10, 0, 0), at(10, 0, 0))];
        let table = CheckpointTable::build(&items, 420);

        assert_eq!(table.key_count(), 1);
        assert_eq!(
            kinds(&table, TimeKey::At(100000)),
            vec![
                ("1".into(), CheckpointKind::Start),
                ("1".into(), CheckpointKind::End)
            ]
        );
    }

    #[test]
    fn test_long_poster_is_whole_day() {
        let items = vec![
            Item::new("1", at(9, 0, 0), at(17, 20, 0)).as_poster(),
            // a short poster stays in the grid
            Item::new("2", at(9, 0, 0), at(10, 0, 0)).as_poster(),
        ];
        let table = CheckpointTable::build(&items, 420);

        assert_eq!(
            kinds(&table, TimeKey::At(90000)),
            vec![
                ("1".into(), CheckpointKind::WholeDay),
                ("2".into(), CheckpointKind::Start)
            ]
        );
        assert!(table.at(TimeKey::At(172000)).is_empty());
    }

    #[test]
    fn test_registration_order() {
        let items = vec![
            Item::new("10", at(9, 0, 0), at(10, 0, 0)),
            Item::new("9", at(9, 0, 0), at(10, 0, 0)),
            Item::new("abc", at(9, 0, 0), at(10, 0, 0)),
            Item::new("2", at(9, 0, 0), at(10, 0, 0)).with_session_code(5),
            Item::new("3", at(9, 0, 0), at(10, 0, 0)).with_session_code(1),
        ];
        let table = CheckpointTable::build(&items, 420);
        let order: Vec<&str> = table
            .at(TimeKey::At(90000))
            .iter()
            .map(|c| c.item_id.as_str())
            .collect();

        // coded items swap among their own slots; the rest keep id order
        assert_eq!(order, vec!["3", "2", "9", "10", "abc"]);
    }

    #[test]
    fn test_code_only_compared_between_coded_items() {
        let items = vec![
            Item::new("9", at(9, 0, 0), at(10, 0, 0)),
            Item::new("2", at(9, 0, 0), at(10, 0, 0)).with_session_code(5),
        ];
        let forward = CheckpointTable::build(&items, 420);
        let order: Vec<&str> = forward
            .at(TimeKey::At(90000))
            .iter()
            .map(|c| c.item_id.as_str())
            .collect();
        assert_eq!(order, vec!["2", "9"]);

        let reversed: Vec<Item> = items.into_iter().rev().collect();
        let backward = CheckpointTable::build(&reversed, 420);
        assert_eq!(backward.at(TimeKey::At(90000)), forward.at(TimeKey::At(90000)));
    }

    #[test]
    fn test_unscheduled_items_are_skipped() {
        let items = vec![Item::unscheduled("1", 30)];
        let table = CheckpointTable::build(&items, 420);
        assert!(table.is_empty());
        assert_eq!(table.first_hour(), None);
    }

    #[test]
    fn test_between_is_half_open() {
        let items = vec![
            Item::new("1", at(9, 0, 0), at(9, 5, 0)),
            Item::new("2", at(9, 0, 45), at(9, 30, 0)),
        ];
        let table = CheckpointTable::build(&items, 420);

        let first: Vec<&str> = table.between(900, 901).map(|c| c.item_id.as_str()).collect();
        assert_eq!(first, vec!["1", "2"]);

        // 09:05 belongs to [0905, 0906), not [0904, 0905)
        assert_eq!(table.between(904, 905).count(), 0);
        assert_eq!(table.between(905, 906).count(), 1);
    }
}
