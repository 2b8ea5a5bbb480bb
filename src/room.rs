//! Room-keyed column policy.
//!
//! Instead of coloring intervals, every room owns one column for the whole
//! day. Rooms get columns in the order they are first met during the sweep;
//! once the sweep is over the columns are renumbered by room name so the
//! header reads alphabetically. Blocks without a room sit in column 0.

use std::collections::HashMap;

use crate::models::{Block, Item, ParallelGroup};

/// Room → column mapping for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomColumns {
    rooms: Vec<String>,
    item_rooms: HashMap<String, String>,
}

impl RoomColumns {
    /// Collects the room of every item. Blank rooms count as no room.
    pub fn from_items(items: &[Item]) -> Self {
        let item_rooms = items
            .iter()
            .filter_map(|item| Some((item.id.clone(), item.room_name()?.to_string())))
            .collect();
        Self {
            rooms: Vec::new(),
            item_rooms,
        }
    }

    /// Room of an item.
    pub fn room_of(&self, item_id: &str) -> Option<&str> {
        self.item_rooms.get(item_id).map(String::as_str)
    }

    /// Column for an item, registering its room on first sight.
    pub fn column_for(&mut self, item_id: &str) -> usize {
        let Some(room) = self.item_rooms.get(item_id) else {
            return 0;
        };
        match self.rooms.iter().position(|r| r == room) {
            Some(col) => col,
            None => {
                self.rooms.push(room.clone());
                self.rooms.len() - 1
            }
        }
    }

    /// Rooms in column order.
    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Number of rooms seen so far.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Renumbers columns by room name and sizes every group.
    ///
    /// A group holding a single room-less block spans one column; any other
    /// group spans one column per room.
    pub fn finish(&mut self, blocks: &mut [Block], groups: &mut [ParallelGroup]) {
        self.rooms.sort();

        for group in groups.iter_mut() {
            for id in &group.blocks {
                let block = &mut blocks[id.index()];
                block.assigned = self
                    .room_of(&block.id)
                    .and_then(|room| self.rooms.iter().position(|r| r == room))
                    .unwrap_or(0);
            }

            let lone_roomless = match group.blocks.as_slice() {
                [only] => self.room_of(&blocks[only.index()].id).is_none(),
                _ => false,
            };
            group.column_count = if lone_roomless {
                1
            } else {
                self.rooms.len().max(1)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockId;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn items() -> Vec<Item> {
        vec![
            Item::new("1", at(9), at(10)).with_room("Main"),
            Item::new("2", at(9), at(10)).with_room("Aux"),
            Item::new("3", at(10), at(11)),
            Item::new("4", at(10), at(11)).with_room(" "),
        ]
    }

    #[test]
    fn test_first_seen_columns() {
        let mut rooms = RoomColumns::from_items(&items());
        assert_eq!(rooms.column_for("1"), 0);
        assert_eq!(rooms.column_for("2"), 1);
        assert_eq!(rooms.column_for("1"), 0);
        assert_eq!(rooms.column_for("3"), 0); // no room
        assert_eq!(rooms.column_for("4"), 0); // blank room
        assert_eq!(rooms.rooms(), &["Main".to_string(), "Aux".to_string()]);
        assert_eq!(rooms.room_count(), 2);
    }

    #[test]
    fn test_finish_sorts_rooms() {
        let mut rooms = RoomColumns::from_items(&items());
        assert_eq!(rooms.room_count(), 0);
        rooms.column_for("1");
        rooms.column_for("2");

        let mut blocks = vec![Block::new("1"), Block::new("2"), Block::new("3")];
        let mut groups = vec![
            ParallelGroup {
                blocks: vec![BlockId(0), BlockId(1)],
                column_count: 2,
            },
            ParallelGroup {
                blocks: vec![BlockId(2)],
                column_count: 1,
            },
        ];
        rooms.finish(&mut blocks, &mut groups);

        assert_eq!(blocks[0].assigned, 1); // Main
        assert_eq!(blocks[1].assigned, 0); // Aux
        assert_eq!(blocks[2].assigned, 0);
        assert_eq!(groups[0].column_count, 2);
        assert_eq!(groups[1].column_count, 1);
    }
}
