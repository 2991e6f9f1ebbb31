//! Mutable world state
//!
//! Everything a turn can change lives in [`WorldState`]. The static tables
//! in [`Database`] are only read; a successful LOAD GAME replaces the whole
//! state at once.

use bitvec::prelude::*;

use crate::database::Database;
use crate::error::{AdventureError, Result};

pub const ALTERNATE_COUNTERS: usize = 9;
pub const ALTERNATE_ROOM_REGISTERS: usize = 6;
pub const STATUS_FLAGS: usize = 32;

/// Flag 15: darkness is in effect
pub const FLAG_NIGHT: usize = 15;
/// Flag 16: the light source has run dry
pub const FLAG_LAMP_EMPTY: usize = 16;
/// Alternate counter holding the light countdown
pub const COUNTER_TIME_LIMIT: usize = 8;
/// Object id of the light source
pub const LIGHT_SOURCE_ID: usize = 9;

pub const ROOM_INVENTORY: i32 = -1;
pub const ROOM_STORE: i32 = 0;
pub const MINIMUM_COUNTER_VALUE: i32 = -1;

pub type StatusFlags = BitArr!(for STATUS_FLAGS, in u32, Lsb0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldState {
    pub current_room: usize,
    pub object_location: Vec<i32>,
    pub status_flags: StatusFlags,
    pub counter_register: i32,
    pub alternate_counter: [i32; ALTERNATE_COUNTERS],
    pub alternate_room: [usize; ALTERNATE_ROOM_REGISTERS],
}

impl WorldState {
    /// Starting state for a freshly loaded database
    pub fn new(db: &Database) -> Self {
        let mut alternate_counter = [0; ALTERNATE_COUNTERS];
        alternate_counter[COUNTER_TIME_LIMIT] = db.header.light_turns();

        WorldState {
            current_room: db.header.starting_room,
            object_location: db.objects.iter().map(|o| o.original_location).collect(),
            status_flags: StatusFlags::ZERO,
            counter_register: 0,
            alternate_counter,
            alternate_room: [0; ALTERNATE_ROOM_REGISTERS],
        }
    }

    pub fn location(&self, object: usize) -> Result<i32> {
        self.object_location
            .get(object)
            .copied()
            .ok_or_else(|| AdventureError::invalid_reference(format!("object {}", object)))
    }

    pub fn set_location(&mut self, object: usize, location: i32) -> Result<()> {
        let slot = self
            .object_location
            .get_mut(object)
            .ok_or_else(|| AdventureError::invalid_reference(format!("object {}", object)))?;
        *slot = location;
        Ok(())
    }

    pub fn flag(&self, flag: usize) -> Result<bool> {
        self.status_flags
            .get(flag)
            .map(|bit| *bit)
            .ok_or_else(|| AdventureError::invalid_reference(format!("flag {}", flag)))
    }

    pub fn set_flag(&mut self, flag: usize, value: bool) -> Result<()> {
        if flag >= STATUS_FLAGS {
            return Err(AdventureError::invalid_reference(format!("flag {}", flag)));
        }
        self.status_flags.set(flag, value);
        Ok(())
    }

    pub fn current_room_location(&self) -> i32 {
        self.current_room as i32
    }

    pub fn is_carried(&self, object: usize) -> Result<bool> {
        Ok(self.location(object)? == ROOM_INVENTORY)
    }

    pub fn is_here(&self, object: usize) -> Result<bool> {
        Ok(self.location(object)? == self.current_room_location())
    }

    pub fn is_available(&self, object: usize) -> Result<bool> {
        Ok(self.is_carried(object)? || self.is_here(object)?)
    }

    pub fn carried_count(&self) -> usize {
        self.object_location
            .iter()
            .filter(|&&location| location == ROOM_INVENTORY)
            .count()
    }

    /// Objects at a location, in id order
    pub fn objects_at(&self, location: i32) -> impl Iterator<Item = usize> + '_ {
        self.object_location
            .iter()
            .enumerate()
            .filter(move |(_, &l)| l == location)
            .map(|(id, _)| id)
    }

    /// Location of the light source, if the database has one
    pub fn light_source_location(&self) -> Option<i32> {
        self.object_location.get(LIGHT_SOURCE_ID).copied()
    }

    /// Night is on and there is no working light carried or in the room
    pub fn is_dark(&self) -> bool {
        if !self.status_flags[FLAG_NIGHT] {
            return false;
        }
        let lit = match self.light_source_location() {
            Some(location) => {
                (location == ROOM_INVENTORY || location == self.current_room_location())
                    && !self.status_flags[FLAG_LAMP_EMPTY]
            }
            None => false,
        };
        !lit
    }

    /// Swap the counter register with an alternate counter
    pub fn swap_counter(&mut self, index: usize) -> Result<()> {
        let slot = self
            .alternate_counter
            .get_mut(index)
            .ok_or_else(|| AdventureError::invalid_reference(format!("counter {}", index)))?;
        std::mem::swap(slot, &mut self.counter_register);
        Ok(())
    }

    /// Swap the current room with an alternate room register
    pub fn swap_room(&mut self, index: usize) -> Result<()> {
        let slot = self
            .alternate_room
            .get_mut(index)
            .ok_or_else(|| AdventureError::invalid_reference(format!("room register {}", index)))?;
        std::mem::swap(slot, &mut self.current_room);
        Ok(())
    }

    /// Subtract from the counter register, never going below the floor
    pub fn decrease_counter(&mut self, amount: i32) {
        self.counter_register = self
            .counter_register
            .saturating_sub(amount)
            .max(MINIMUM_COUNTER_VALUE);
    }
}
