use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use crate::state::MINIMUM_COUNTER_VALUE;

/// Carry limits below zero mean "unlimited"
pub const REALLY_BIG_NUMBER: usize = 32767;

/// Counts and settings from the top of a database file.
///
/// Every `number_of_*` field is the highest id, so each table holds one more
/// entry than its count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub game_bytes: i64,
    pub number_of_objects: usize,
    pub number_of_actions: usize,
    pub number_of_words: usize,
    pub number_of_rooms: usize,
    pub max_objects_carried: usize,
    pub starting_room: usize,
    pub number_of_treasures: usize,
    pub word_length: usize,
    pub time_limit: i32,
    pub number_of_messages: usize,
    pub treasure_room: usize,
    pub adventure_version: i32,
    pub adventure_number: i32,
}

impl Header {
    /// Room the player is sent to on death
    pub fn dead_room(&self) -> usize {
        self.number_of_rooms
    }

    /// Turns of light in a full light source, never below the counter floor
    pub fn light_turns(&self) -> i32 {
        self.time_limit.max(MINIMUM_COUNTER_VALUE)
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "
Adventure number:         {}
Adventure version:        {}
Objects:                  {}
Actions:                  {}
Words:                    {}
Rooms:                    {}
Messages:                 {}
Carry limit:              {}
Starting room:            {}
Treasures:                {}
Treasure room:            {}
Word length:              {}
Light time limit:         {}
",
            self.adventure_number,
            self.adventure_version,
            self.number_of_objects + 1,
            self.number_of_actions + 1,
            self.number_of_words + 1,
            self.number_of_rooms + 1,
            self.number_of_messages + 1,
            self.max_objects_carried,
            self.starting_room,
            self.number_of_treasures,
            self.treasure_room,
            self.word_length,
            self.time_limit,
        )
    }
}
