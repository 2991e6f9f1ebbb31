//! Command executor
//!
//! Runs the four command slots of an action. Messages are printed, opcodes
//! are dispatched through [`Interpreter::execute_opcode`], and parameters
//! are drawn from one cursor shared by all four slots.

use std::thread;
use std::time::Duration;

use log::{debug, info, trace};

use crate::action::{ParamCursor, COMMANDS_IN_ACTION};
use crate::command::{CommandSlot, Opcode};
use crate::error::{AdventureError, Result};
use crate::interpreter::{GameOutcome, Interpreter, TurnResult};
use crate::state::{
    COUNTER_TIME_LIMIT, FLAG_LAMP_EMPTY, FLAG_NIGHT, LIGHT_SOURCE_ID, ROOM_INVENTORY, ROOM_STORE,
};
use crate::prng::PERCENT_UNITS;

/// Result of executing one opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Go on with the next command slot
    Continue,
    /// Skip the rest of this action's commands
    Abort,
    /// Stop the game
    GameOver(GameOutcome),
}

impl Interpreter {
    /// Execute the commands of one action whose conditions have passed
    pub(crate) fn execute_commands(&mut self, id: usize) -> Result<TurnResult> {
        let action = self.db.actions[id].clone();
        debug!("executing action {} ({})", id, action.description());

        let mut cursor = action.param_cursor(id);
        for index in 0..COMMANDS_IN_ACTION {
            match CommandSlot::classify(action.command(index)) {
                CommandSlot::Nop => {}
                CommandSlot::Message(message) => {
                    trace!("  message {}", message);
                    self.display.print_line(self.db.message(message)?)?;
                }
                CommandSlot::Op(op) => {
                    trace!("  {}", op.name());
                    match self.execute_opcode(op, &mut cursor)? {
                        ExecutionResult::Continue => {}
                        ExecutionResult::Abort => break,
                        ExecutionResult::GameOver(outcome) => {
                            return Ok(TurnResult::GameOver(outcome))
                        }
                    }
                }
                CommandSlot::Undefined(value) => {
                    return Err(AdventureError::invalid_reference(format!(
                        "command {} in action {}",
                        value, id
                    )));
                }
            }
        }
        Ok(TurnResult::Continue)
    }

    pub fn execute_opcode(
        &mut self,
        op: Opcode,
        params: &mut ParamCursor<'_>,
    ) -> Result<ExecutionResult> {
        match op {
            Opcode::Get => {
                if self.world.carried_count() >= self.db.header.max_objects_carried {
                    self.display
                        .print_line("I've too much too carry. try -take inventory-")?;
                    return Ok(ExecutionResult::Abort);
                }
                let object = index_param(params)?;
                self.world.set_location(object, ROOM_INVENTORY)?;
            }
            Opcode::SuperGet => {
                let object = index_param(params)?;
                self.world.set_location(object, ROOM_INVENTORY)?;
            }
            Opcode::Drop => {
                let object = index_param(params)?;
                let here = self.world.current_room_location();
                self.world.set_location(object, here)?;
            }
            Opcode::Goto => {
                let room = index_param(params)?;
                self.db.room(room)?;
                self.world.current_room = room;
            }
            Opcode::Destroy | Opcode::Destroy2 => {
                let object = index_param(params)?;
                self.world.set_location(object, ROOM_STORE)?;
            }
            Opcode::Night => self.world.set_flag(FLAG_NIGHT, true)?,
            Opcode::Day => self.world.set_flag(FLAG_NIGHT, false)?,
            Opcode::SetFlag => {
                let flag = index_param(params)?;
                self.world.set_flag(flag, true)?;
            }
            Opcode::ClearFlag => {
                let flag = index_param(params)?;
                self.world.set_flag(flag, false)?;
            }
            Opcode::SetFlag0 => self.world.set_flag(0, true)?,
            Opcode::ClearFlag0 => self.world.set_flag(0, false)?,
            Opcode::Dead => {
                info!("player died");
                self.display.print_line("I'm dead...")?;
                self.world.current_room = self.db.header.dead_room();
                self.world.set_flag(FLAG_NIGHT, false)?;
                self.show_room_description()?;
            }
            Opcode::PutObject => {
                let object = index_param(params)?;
                let room = params.next_param()?;
                self.world.set_location(object, room)?;
            }
            Opcode::Finish => {
                info!("game finished");
                return Ok(ExecutionResult::GameOver(GameOutcome::Finished));
            }
            Opcode::Look | Opcode::Look2 => self.show_room_description()?,
            Opcode::Score => return self.score(),
            Opcode::Inventory => self.inventory()?,
            Opcode::Fill => {
                self.world.alternate_counter[COUNTER_TIME_LIMIT] = self.db.header.light_turns();
                self.world.set_location(LIGHT_SOURCE_ID, ROOM_INVENTORY)?;
                self.world.set_flag(FLAG_LAMP_EMPTY, false)?;
            }
            Opcode::ClearScreen => {
                if self.config.clear_screen {
                    self.display.clear_screen()?;
                }
            }
            Opcode::Save => self.save_game()?,
            Opcode::SwapObjects => {
                let first = index_param(params)?;
                let second = index_param(params)?;
                let first_location = self.world.location(first)?;
                let second_location = self.world.location(second)?;
                self.world.set_location(first, second_location)?;
                self.world.set_location(second, first_location)?;
            }
            Opcode::Continue => self.continuation = true,
            Opcode::PutWith => {
                let object = index_param(params)?;
                let other = index_param(params)?;
                let location = self.world.location(other)?;
                self.world.set_location(object, location)?;
            }
            Opcode::DecrementCounter => self.world.decrease_counter(1),
            Opcode::PrintCounter => {
                self.display.print(&self.world.counter_register.to_string())?;
            }
            Opcode::SetCounter => self.world.counter_register = params.next_param()?,
            Opcode::SwapRoom0 => self.world.swap_room(0)?,
            Opcode::SwapCounter => {
                let counter = index_param(params)?;
                self.world.swap_counter(counter)?;
            }
            Opcode::AddCounter => {
                let amount = params.next_param()?;
                self.world.counter_register = self.world.counter_register.saturating_add(amount);
            }
            Opcode::SubtractCounter => {
                let amount = params.next_param()?;
                self.world.decrease_counter(amount);
            }
            Opcode::SayNoun => self.display.print(&self.noun_text)?,
            Opcode::SayNounLine => self.display.print_line(&self.noun_text)?,
            Opcode::NewLine => self.display.print("\n")?,
            Opcode::SwapRoom => {
                let register = index_param(params)?;
                self.world.swap_room(register)?;
            }
            Opcode::Delay => {
                self.display.flush()?;
                thread::sleep(Duration::from_millis(self.config.delay_ms));
            }
        }
        Ok(ExecutionResult::Continue)
    }

    fn score(&mut self) -> Result<ExecutionResult> {
        let treasure_room = self.db.header.treasure_room as i32;
        let stored = self
            .db
            .objects
            .iter()
            .zip(self.world.object_location.iter())
            .filter(|&(object, &location)| object.is_treasure() && location == treasure_room)
            .count();
        let total = self.db.header.number_of_treasures;
        let rating = if total == 0 {
            0
        } else {
            stored * PERCENT_UNITS as usize / total
        };

        self.display.print_line(&format!(
            "I've stored {} treasures. ON A SCALE OF 0 TO {} THAT RATES A {}",
            stored, PERCENT_UNITS, rating
        ))?;
        if total > 0 && stored >= total {
            self.display.print_line("Well done.")?;
            return Ok(ExecutionResult::GameOver(GameOutcome::Won));
        }
        Ok(ExecutionResult::Continue)
    }

    fn inventory(&mut self) -> Result<()> {
        let mut text = String::new();
        for object in self.world.objects_at(ROOM_INVENTORY) {
            text.push_str(&self.db.object(object)?.display_text());
            text.push_str(". ");
        }
        if text.is_empty() {
            text.push_str("Nothing");
        }
        text.push_str("\n\n");
        self.display.print(&text)?;
        Ok(())
    }
}

/// Next parameter as a table index
fn index_param(params: &mut ParamCursor<'_>) -> Result<usize> {
    let value = params.next_param()?;
    usize::try_from(value)
        .map_err(|_| AdventureError::invalid_reference(format!("parameter {}", value)))
}
