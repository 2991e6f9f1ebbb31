//! Condition evaluator
//!
//! Twenty predicates, selected by `raw % 20` of a condition slot. Code 0 is
//! the parameter marker and always holds.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ParamKind, PAR_CONDITION_CODE};
use crate::database::Database;
use crate::error::{AdventureError, Result};
use crate::state::{WorldState, ROOM_STORE};

/// How ORIG and -ORIG are evaluated.
///
/// Shipped interpreters compare an object's location with itself, which
/// makes ORIG always true and -ORIG always false. Databases written against
/// those interpreters depend on that, so it is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrigMode {
    #[default]
    Verbatim,
    /// Compare with the location the object had when the database was loaded
    OriginalLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Par,
    Has,
    InWith,
    Available,
    In,
    NotInWith,
    NotHave,
    NotIn,
    Bit,
    NotBit,
    Any,
    NotAny,
    NotAvailable,
    NotInStore,
    InStore,
    CounterLessEqual,
    CounterGreater,
    Orig,
    NotOrig,
    CounterEqual,
}

const CONDITIONS: [Condition; 20] = [
    Condition::Par,
    Condition::Has,
    Condition::InWith,
    Condition::Available,
    Condition::In,
    Condition::NotInWith,
    Condition::NotHave,
    Condition::NotIn,
    Condition::Bit,
    Condition::NotBit,
    Condition::Any,
    Condition::NotAny,
    Condition::NotAvailable,
    Condition::NotInStore,
    Condition::InStore,
    Condition::CounterLessEqual,
    Condition::CounterGreater,
    Condition::Orig,
    Condition::NotOrig,
    Condition::CounterEqual,
];

impl Condition {
    pub fn from_code(code: i32) -> Option<Condition> {
        usize::try_from(code)
            .ok()
            .and_then(|index| CONDITIONS.get(index))
            .copied()
    }

    pub fn code(self) -> i32 {
        CONDITIONS
            .iter()
            .position(|&c| c == self)
            .map_or(PAR_CONDITION_CODE, |index| index as i32)
    }

    /// Mnemonic used by the format's disassembly listings
    pub fn name(self) -> &'static str {
        match self {
            Condition::Par => "Par",
            Condition::Has => "HAS",
            Condition::InWith => "IN/W",
            Condition::Available => "AVL",
            Condition::In => "IN",
            Condition::NotInWith => "-IN/W",
            Condition::NotHave => "-HAVE",
            Condition::NotIn => "-IN",
            Condition::Bit => "BIT",
            Condition::NotBit => "-BIT",
            Condition::Any => "ANY",
            Condition::NotAny => "-ANY",
            Condition::NotAvailable => "-AVL",
            Condition::NotInStore => "-RM0",
            Condition::InStore => "RM0",
            Condition::CounterLessEqual => "CT<=",
            Condition::CounterGreater => "CT>",
            Condition::Orig => "ORIG",
            Condition::NotOrig => "-ORIG",
            Condition::CounterEqual => "CT=",
        }
    }

    /// What the slot parameter refers to, `None` when it is ignored
    pub fn param_kind(self) -> Option<ParamKind> {
        match self {
            Condition::Par | Condition::Any | Condition::NotAny => None,
            Condition::In | Condition::NotIn => Some(ParamKind::Room),
            Condition::Bit | Condition::NotBit => Some(ParamKind::Flag),
            Condition::CounterLessEqual | Condition::CounterGreater | Condition::CounterEqual => {
                Some(ParamKind::Number)
            }
            _ => Some(ParamKind::Object),
        }
    }

    pub fn evaluate(
        self,
        param: i32,
        world: &WorldState,
        db: &Database,
        orig: OrigMode,
    ) -> Result<bool> {
        let object = || -> Result<usize> {
            usize::try_from(param)
                .map_err(|_| AdventureError::invalid_reference(format!("object {}", param)))
        };
        let room = world.current_room_location();

        let result = match self {
            Condition::Par => true,
            Condition::Has => world.is_carried(object()?)?,
            Condition::InWith => world.is_here(object()?)?,
            Condition::Available => world.is_available(object()?)?,
            Condition::In => room == param,
            Condition::NotInWith => !world.is_here(object()?)?,
            Condition::NotHave => !world.is_carried(object()?)?,
            Condition::NotIn => room != param,
            Condition::Bit => world.flag(flag_index(param)?)?,
            Condition::NotBit => !world.flag(flag_index(param)?)?,
            Condition::Any => world.carried_count() > 0,
            Condition::NotAny => world.carried_count() == 0,
            Condition::NotAvailable => !world.is_available(object()?)?,
            Condition::NotInStore => world.location(object()?)? != ROOM_STORE,
            Condition::InStore => world.location(object()?)? == ROOM_STORE,
            Condition::CounterLessEqual => world.counter_register <= param,
            Condition::CounterGreater => world.counter_register > param,
            Condition::Orig => at_original_location(object()?, world, db, orig)?,
            Condition::NotOrig => !at_original_location(object()?, world, db, orig)?,
            Condition::CounterEqual => world.counter_register == param,
        };
        Ok(result)
    }
}

fn flag_index(param: i32) -> Result<usize> {
    usize::try_from(param).map_err(|_| AdventureError::invalid_reference(format!("flag {}", param)))
}

fn at_original_location(
    object: usize,
    world: &WorldState,
    db: &Database,
    orig: OrigMode,
) -> Result<bool> {
    let location = world.location(object)?;
    match orig {
        // location compared with itself
        OrigMode::Verbatim => Ok(true),
        OrigMode::OriginalLocation => Ok(location == db.object(object)?.original_location),
    }
}

/// Evaluate every real condition of an action, stopping at the first failure
pub fn conditions_hold(
    action: &Action,
    world: &WorldState,
    db: &Database,
    orig: OrigMode,
) -> Result<bool> {
    for slot in action.conditions() {
        if slot.code == PAR_CONDITION_CODE {
            continue;
        }
        let condition = Condition::from_code(slot.code).ok_or_else(|| {
            AdventureError::invalid_reference(format!("condition code {}", slot.code))
        })?;
        let holds = condition.evaluate(slot.param, world, db, orig)?;
        trace!("  {} {} -> {}", condition.name(), slot.param, holds);
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}
