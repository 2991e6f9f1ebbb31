//! Save file format
//!
//! A save file is plain text, one decimal integer per line:
//!
//! ```text
//! adventure version
//! adventure number
//! current room
//! alternate rooms        6 lines
//! counter register
//! alternate counters     9 lines
//! object locations       one line per object
//! status flags           32 lines, 0 or 1
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::database::Database;
use crate::error::{AdventureError, Result};
use crate::state::{
    StatusFlags, WorldState, ALTERNATE_COUNTERS, ALTERNATE_ROOM_REGISTERS,
    MINIMUM_COUNTER_VALUE, ROOM_INVENTORY, STATUS_FLAGS,
};

/// Snapshot of the world ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveGame {
    values: Vec<i64>,
}

impl SaveGame {
    pub fn from_world(world: &WorldState, db: &Database) -> Self {
        let mut values = vec![
            i64::from(db.header.adventure_version),
            i64::from(db.header.adventure_number),
            world.current_room as i64,
        ];
        values.extend(world.alternate_room.iter().map(|&room| room as i64));
        values.push(i64::from(world.counter_register));
        values.extend(world.alternate_counter.iter().map(|&c| i64::from(c)));
        values.extend(world.object_location.iter().map(|&l| i64::from(l)));
        values.extend(world.status_flags.iter().take(STATUS_FLAGS).map(|bit| i64::from(*bit)));
        SaveGame { values }
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for value in &self.values {
            text.push_str(&value.to_string());
            text.push('\n');
        }
        text
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        info!("Saving game to {:?}", path);
        fs::write(path, self.to_text())?;
        Ok(())
    }
}

/// A save file read back in, not yet checked against a database
#[derive(Debug, Clone)]
pub struct RestoreGame {
    values: Vec<i64>,
}

impl RestoreGame {
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading save game from {:?}", path);
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let mut values = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value = line.parse::<i64>().map_err(|_| {
                AdventureError::InvalidSave(format!("line {} is not a number: '{}'", index + 1, line))
            })?;
            values.push(value);
        }
        debug!("Read {} values from save file", values.len());
        Ok(RestoreGame { values })
    }

    /// Build the saved world for this database.
    ///
    /// Nothing is touched on failure; the caller swaps the returned state in.
    pub fn restore(&self, db: &Database) -> Result<WorldState> {
        let mut values = self.values.iter().copied();
        let mut next = |what: &str| {
            values
                .next()
                .ok_or_else(|| AdventureError::InvalidSave(format!("missing {}", what)))
        };

        let version = next("adventure version")?;
        if version != i64::from(db.header.adventure_version) {
            return Err(AdventureError::SaveVersionMismatch {
                expected: db.header.adventure_version,
                found: version,
            });
        }
        let number = next("adventure number")?;
        if number != i64::from(db.header.adventure_number) {
            return Err(AdventureError::SaveAdventureMismatch {
                expected: db.header.adventure_number,
                found: number,
            });
        }

        let rooms = db.header.number_of_rooms as i64;
        let room = |value: i64, what: &str| -> Result<usize> {
            if (0..=rooms).contains(&value) {
                Ok(value as usize)
            } else {
                Err(AdventureError::InvalidSave(format!("{} {} is not a room", what, value)))
            }
        };
        // counters never drop below the floor while a game is played
        let counter = |value: i64, what: &str| -> Result<i32> {
            i32::try_from(value)
                .ok()
                .filter(|&value| value >= MINIMUM_COUNTER_VALUE)
                .ok_or_else(|| {
                    AdventureError::InvalidSave(format!("{} {} is out of range", what, value))
                })
        };

        let current_room = room(next("current room")?, "current room")?;

        let mut alternate_room = [0; ALTERNATE_ROOM_REGISTERS];
        for slot in alternate_room.iter_mut() {
            *slot = room(next("alternate room")?, "alternate room")?;
        }

        let counter_register = counter(next("counter")?, "counter")?;

        let mut alternate_counter = [0; ALTERNATE_COUNTERS];
        for slot in alternate_counter.iter_mut() {
            *slot = counter(next("alternate counter")?, "alternate counter")?;
        }

        let mut object_location = Vec::with_capacity(db.objects.len());
        for _ in 0..db.objects.len() {
            let location = next("object location")?;
            if location < i64::from(ROOM_INVENTORY) || location > rooms {
                return Err(AdventureError::InvalidSave(format!(
                    "object location {} is not a room",
                    location
                )));
            }
            object_location.push(location as i32);
        }

        let mut status_flags = StatusFlags::ZERO;
        for flag in 0..STATUS_FLAGS {
            status_flags.set(flag, next("status flag")? != 0);
        }

        if next("end of file").is_ok() {
            return Err(AdventureError::InvalidSave(
                "more values than the database needs".to_string(),
            ));
        }

        Ok(WorldState {
            current_room,
            object_location,
            status_flags,
            counter_register,
            alternate_counter,
            alternate_room,
        })
    }
}
