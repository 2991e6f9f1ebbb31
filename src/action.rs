//! Action record codec
//!
//! An action is stored as eight integers:
//!
//! ```text
//! [0]     verb * 150 + noun
//! [1..=5] condition slots, code + 20 * parameter
//! [6..=7] two commands each, first * 150 + second
//! ```
//!
//! Commands carry no operands of their own. Their parameters live in the
//! condition slots whose code is 0, and are handed out in slot order by a
//! [`ParamCursor`] that is shared by every command of one execution.

use crate::error::{AdventureError, Result};

pub const ACTION_ENTRIES: usize = 8;
pub const CONDITIONS: usize = 5;
pub const COMMANDS_IN_ACTION: usize = 4;
pub const COMMAND_CODE_DIVISOR: i32 = 150;
pub const CONDITION_DIVISOR: i32 = 20;
const ACTION_COMMAND_OFFSET: usize = 6;

/// Condition code that marks a parameter slot
pub const PAR_CONDITION_CODE: i32 = 0;

/// What an action parameter refers to, for load-time range checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Object,
    Room,
    Flag,
    /// Plain number compared with or added to the counter register
    Number,
    /// Alternate counter index
    Counter,
    /// Alternate room register index
    RoomRegister,
}

/// What triggers an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Verb 0, noun 0: runs after an action that executed CONT
    Continuation,
    /// Verb 0, noun > 0: fires at random with the given percent chance
    Automatic { probability: i32 },
    /// Triggered by player input
    Word { verb: i32, noun: i32 },
}

/// One decoded condition slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionSlot {
    pub code: i32,
    pub param: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    raw: [i32; ACTION_ENTRIES],
    description: String,
}

impl Action {
    pub fn new(raw: [i32; ACTION_ENTRIES], description: impl Into<String>) -> Self {
        Action {
            raw,
            description: description.into(),
        }
    }

    /// Free-text comment from the database, only used in debug logs
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn verb(&self) -> i32 {
        decode_header(self.raw[0]).0
    }

    pub fn noun(&self) -> i32 {
        decode_header(self.raw[0]).1
    }

    pub fn kind(&self) -> ActionKind {
        match (self.verb(), self.noun()) {
            (0, 0) => ActionKind::Continuation,
            (0, probability) => ActionKind::Automatic { probability },
            (verb, noun) => ActionKind::Word { verb, noun },
        }
    }

    /// Condition slot 1..=5
    pub fn condition(&self, slot: usize) -> ConditionSlot {
        let (code, param) = decode_condition(self.raw[slot]);
        ConditionSlot { code, param }
    }

    /// All five condition slots, parameter slots included
    pub fn conditions(&self) -> impl Iterator<Item = ConditionSlot> + '_ {
        (1..=CONDITIONS).map(move |slot| self.condition(slot))
    }

    /// Command code for command index 0..=3
    pub fn command(&self, index: usize) -> i32 {
        let merged = self.raw[index / 2 + ACTION_COMMAND_OFFSET];
        let (even, odd) = decode_command_pair(merged);
        if index % 2 != 0 {
            odd
        } else {
            even
        }
    }

    pub fn commands(&self) -> [i32; COMMANDS_IN_ACTION] {
        [self.command(0), self.command(1), self.command(2), self.command(3)]
    }

    /// Fresh parameter cursor positioned before condition slot 1
    pub fn param_cursor(&self, action_id: usize) -> ParamCursor<'_> {
        ParamCursor {
            action: self,
            action_id,
            slot: 1,
        }
    }
}

/// Hands out command parameters from an action's parameter slots
#[derive(Debug)]
pub struct ParamCursor<'a> {
    action: &'a Action,
    action_id: usize,
    slot: usize,
}

impl ParamCursor<'_> {
    /// Advance to the next slot with code 0 and return its parameter
    pub fn next_param(&mut self) -> Result<i32> {
        while self.slot <= CONDITIONS {
            let condition = self.action.condition(self.slot);
            self.slot += 1;
            if condition.code == PAR_CONDITION_CODE {
                return Ok(condition.param);
            }
        }
        Err(AdventureError::ParameterExhausted {
            action: self.action_id,
        })
    }

    /// Slot the next search starts from
    pub fn position(&self) -> usize {
        self.slot
    }
}

pub fn encode_header(verb: i32, noun: i32) -> i32 {
    verb * COMMAND_CODE_DIVISOR + noun
}

pub fn decode_header(raw: i32) -> (i32, i32) {
    (raw / COMMAND_CODE_DIVISOR, raw % COMMAND_CODE_DIVISOR)
}

pub fn encode_condition(code: i32, param: i32) -> i32 {
    param * CONDITION_DIVISOR + code
}

/// Returns `(code, param)`
pub fn decode_condition(raw: i32) -> (i32, i32) {
    (raw % CONDITION_DIVISOR, raw / CONDITION_DIVISOR)
}

pub fn encode_command_pair(first: i32, second: i32) -> i32 {
    first * COMMAND_CODE_DIVISOR + second
}

pub fn decode_command_pair(stored: i32) -> (i32, i32) {
    (stored / COMMAND_CODE_DIVISOR, stored % COMMAND_CODE_DIVISOR)
}
