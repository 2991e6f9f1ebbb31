//! Turn dispatcher
//!
//! One turn reads a line, matches it against the vocabulary and walks the
//! action table in order. Within a pass:
//!
//! - a continuation action (verb 0, noun 0) runs only while the previous
//!   action left CONT set;
//! - on the ambient pass (no verb) automatic actions fire at random;
//! - on a word pass the first action for the verb whose noun matches and
//!   whose conditions hold runs, and the pass ends unless it set CONT.
//!
//! GO with a direction, plain GET/DROP of objects, darkness and the light
//! countdown are built in.

use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexSet;
use log::{debug, info, trace, warn};

use crate::action::{Action, ActionKind};
use crate::condition::conditions_hold;
use crate::config::InterpreterConfig;
use crate::database::Database;
use crate::display_trait::AdventureDisplay;
use crate::error::{AdventureError, Result};
use crate::input::CommandInput;
use crate::prng::AdventureRand;
use crate::save::{RestoreGame, SaveGame};
use crate::state::{
    WorldState, COUNTER_TIME_LIMIT, FLAG_LAMP_EMPTY, FLAG_NIGHT, LIGHT_SOURCE_ID, ROOM_INVENTORY,
    ROOM_STORE,
};
use crate::vocabulary::{
    truncate_chars, WordKind, DIRECTION_NAMES, DIRECTION_NOUNS, VERB_AUTO, VERB_CARRY, VERB_DROP,
    VERB_GO,
};

pub const PROMPT: &str = "Tell me what to do";
const LIGHT_WARNING_THRESHOLD: i32 = 25;

const INTRO: &str = "
                 *** Welcome ***

 Unless told differently you must find *TREASURES*
and-return-them-to-their-proper--place!

I'm your puppet. Give me english commands that
consist of a noun and verb. Some examples...

To find out what you're carrying you might say: TAKE INVENTORY
to go into a hole you might say: GO HOLE
to save current game: SAVE GAME

You will at times need special items to do things: But I'm
sure you'll be a good adventurer and figure these things out.

     Happy adventuring... Hit enter to start";

/// Why a game stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// FINI was executed
    Finished,
    /// Every treasure was stored and scored
    Won,
    /// The player's input ran out
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    Continue,
    GameOver(GameOutcome),
}

pub struct Interpreter {
    pub db: Database,
    pub world: WorldState,
    pub config: InterpreterConfig,
    pub(crate) rng: AdventureRand,
    pub(crate) display: Box<dyn AdventureDisplay>,
    pub(crate) input: Box<dyn CommandInput>,
    /// Set by CONT, lets the following continuation actions run
    pub(crate) continuation: bool,
    /// Second word of the last command, as typed
    pub(crate) noun_text: String,
}

impl Interpreter {
    pub fn new(
        db: Database,
        config: InterpreterConfig,
        display: Box<dyn AdventureDisplay>,
        input: Box<dyn CommandInput>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => AdventureRand::new_predictable(seed),
            None => AdventureRand::new_from_clock(),
        };
        let world = WorldState::new(&db);
        Interpreter {
            db,
            world,
            config,
            rng,
            display,
            input,
            continuation: false,
            noun_text: String::new(),
        }
    }

    /// Play until the game ends or input runs out
    pub fn run(&mut self) -> Result<GameOutcome> {
        if let TurnResult::GameOver(outcome) = self.start()? {
            return Ok(outcome);
        }

        loop {
            self.display.print_line(PROMPT)?;
            self.display.flush()?;

            let line = match self.input.read_line()? {
                Some(line) => line,
                None => {
                    info!("Input exhausted, leaving the game");
                    return Ok(GameOutcome::EndOfInput);
                }
            };
            self.display.print_line("")?;

            if let TurnResult::GameOver(outcome) = self.process_line(&line)? {
                self.display.flush()?;
                return Ok(outcome);
            }
        }
    }

    /// Intro, first room and the ambient pass before the first prompt
    pub fn start(&mut self) -> Result<TurnResult> {
        if self.config.show_intro {
            self.show_intro()?;
        }
        self.show_room_description()?;
        self.run_actions(VERB_AUTO, 0)
    }

    /// Handle one line of player input
    pub fn process_line(&mut self, line: &str) -> Result<TurnResult> {
        debug!("input: '{}'", line);
        if is_load_request(line) {
            if self.load_game()? {
                self.show_room_description()?;
            }
            return Ok(TurnResult::Continue);
        }

        let viable = self.viable_verbs()?;
        let parsed = self.db.vocabulary.parse(line, &viable);
        self.noun_text = parsed.noun_text.clone();

        if parsed.has_unknown_words() {
            self.display.print_line("You use word(s) I don't know")?;
            return Ok(TurnResult::Continue);
        }

        if let TurnResult::GameOver(outcome) = self.run_actions(parsed.verb, parsed.noun)? {
            return Ok(TurnResult::GameOver(outcome));
        }
        self.check_light()?;
        self.run_actions(VERB_AUTO, parsed.noun)
    }

    /// One dispatch pass over the action table
    pub fn run_actions(&mut self, verb: usize, noun: usize) -> Result<TurnResult> {
        if verb == VERB_GO && noun <= DIRECTION_NOUNS {
            self.handle_go(noun)?;
            return Ok(TurnResult::Continue);
        }

        let mut found_word = false;
        let mut word_action_done = false;
        self.continuation = false;

        for id in 0..self.db.actions.len() {
            let kind = self.db.actions[id].kind();

            if self.continuation && kind == ActionKind::Continuation {
                if self.action_applies(id)? {
                    if let TurnResult::GameOver(outcome) = self.execute_commands(id)? {
                        return Ok(TurnResult::GameOver(outcome));
                    }
                }
            } else {
                self.continuation = false;
            }

            match kind {
                ActionKind::Automatic { probability } if verb == VERB_AUTO => {
                    self.continuation = false;
                    let roll = self.rng.percentile() as i32;
                    trace!("action {} rolls {} against {}", id, roll, probability);
                    if roll < probability && self.action_applies(id)? {
                        if let TurnResult::GameOver(outcome) = self.execute_commands(id)? {
                            return Ok(TurnResult::GameOver(outcome));
                        }
                    }
                }
                ActionKind::Word {
                    verb: action_verb,
                    noun: action_noun,
                } if verb != VERB_AUTO && action_verb as usize == verb && !word_action_done => {
                    self.continuation = false;
                    if action_noun == 0 || action_noun as usize == noun {
                        found_word = true;
                        if self.action_applies(id)? {
                            if let TurnResult::GameOver(outcome) = self.execute_commands(id)? {
                                return Ok(TurnResult::GameOver(outcome));
                            }
                            word_action_done = true;
                            if !self.continuation {
                                return Ok(TurnResult::Continue);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        if verb == VERB_AUTO || word_action_done {
            return Ok(TurnResult::Continue);
        }
        if self.handle_carry_and_drop(verb, noun)? {
            return Ok(TurnResult::Continue);
        }

        if found_word {
            self.display.print_line("I can't do that yet")?;
        } else {
            self.display.print_line("I don't understand your command")?;
        }
        Ok(TurnResult::Continue)
    }

    fn action_applies(&self, id: usize) -> Result<bool> {
        let action: &Action = &self.db.actions[id];
        trace!("checking action {} ({})", id, action.description());
        conditions_hold(action, &self.world, &self.db, self.config.orig_condition)
    }

    /// Verbs with at least one action whose conditions hold right now
    pub fn viable_verbs(&self) -> Result<IndexSet<usize>> {
        let mut verbs = IndexSet::new();
        for (id, action) in self.db.actions.iter().enumerate() {
            if let ActionKind::Word { verb, .. } = action.kind() {
                if !verbs.contains(&(verb as usize)) && self.action_applies(id)? {
                    verbs.insert(verb as usize);
                }
            }
        }
        Ok(verbs)
    }

    /// Built-in GO: directions 1..=6, or a complaint when none was given
    pub fn handle_go(&mut self, direction: usize) -> Result<()> {
        let dark = self.world.is_dark();
        if dark {
            self.display.print_line("Dangerous to move in the dark!")?;
        }
        if direction < 1 {
            self.display.print_line("Give me a direction too.")?;
            return Ok(());
        }

        let mut destination = self.db.room(self.world.current_room)?.exits[direction - 1];
        if destination == 0 {
            if !dark {
                self.display.print_line("I can't go in that direction")?;
                return Ok(());
            }
            self.display.print_line("I fell down and broke my neck.")?;
            destination = self.db.header.dead_room();
            self.world.set_flag(FLAG_NIGHT, false)?;
        }

        debug!("moving from room {} to room {}", self.world.current_room, destination);
        self.world.current_room = destination;
        self.show_room_description()
    }

    pub fn show_room_description(&mut self) -> Result<()> {
        if self.world.is_dark() {
            self.display.print_line("I can't see: Its too dark.")?;
            return Ok(());
        }

        let room = self.db.room(self.world.current_room)?;
        let mut text = match room.verbatim_description() {
            Some(description) => description.to_string(),
            None => format!("I'm in a {}", room.description),
        };

        let mut items = self
            .world
            .objects_at(self.world.current_room_location())
            .peekable();
        if items.peek().is_some() {
            text.push_str(". Visible items here: \n");
            for object in items {
                text.push_str(&self.db.object(object)?.display_text());
                text.push_str(". ");
            }
        }
        text.push('\n');

        let exits: Vec<&str> = room
            .exits
            .iter()
            .zip(DIRECTION_NAMES.iter())
            .filter(|(&exit, _)| exit != 0)
            .map(|(_, &name)| name)
            .collect();
        if !exits.is_empty() {
            text.push_str("Obvious exits: ");
            for name in exits {
                text.push_str(name);
                text.push(' ');
            }
        }
        text.push_str("\n\n");

        self.display.print(&text)?;
        Ok(())
    }

    /// Burn one turn of light while the light source is carried
    pub fn check_light(&mut self) -> Result<()> {
        if self.world.light_source_location() != Some(ROOM_INVENTORY) {
            return Ok(());
        }

        let remaining = &mut self.world.alternate_counter[COUNTER_TIME_LIMIT];
        *remaining = remaining.saturating_sub(1);
        let remaining = *remaining;

        if remaining < 0 {
            info!("light source exhausted");
            self.display.print_line("Light has run out")?;
            self.world.set_location(LIGHT_SOURCE_ID, ROOM_STORE)?;
            self.world.set_flag(FLAG_LAMP_EMPTY, true)?;
        } else if remaining < LIGHT_WARNING_THRESHOLD {
            self.display
                .print_line(&format!("Light runs out in {} turns!", remaining))?;
        }
        Ok(())
    }

    /// GET and DROP of objects named by their `/NOUN/` marker, used when
    /// no action handled the command
    pub fn handle_carry_and_drop(&mut self, verb: usize, noun: usize) -> Result<bool> {
        if verb != VERB_CARRY && verb != VERB_DROP {
            return Ok(false);
        }

        if noun == 0 && !self.noun_names_an_object() {
            self.display.print_line("What?")?;
            return Ok(true);
        }

        let here = self.world.current_room_location();
        if verb == VERB_CARRY {
            if self.world.carried_count() >= self.db.header.max_objects_carried {
                self.display
                    .print_line("I've too much too carry. try -take inventory-")?;
            } else if !self.get_or_drop(noun, here, ROOM_INVENTORY)? {
                self.display.print_line("I don't see it here")?;
            }
        } else if !self.get_or_drop(noun, ROOM_INVENTORY, here)? {
            self.display.print_line("I'm not carrying it")?;
        }
        Ok(true)
    }

    fn typed_noun(&self) -> String {
        truncate_chars(&self.noun_text.to_uppercase(), self.db.header.word_length)
    }

    fn noun_names_an_object(&self) -> bool {
        let typed = self.typed_noun();
        !typed.is_empty()
            && self.db.objects.iter().any(|object| {
                object
                    .noun_marker()
                    .is_some_and(|marker| marker.to_uppercase() == typed)
            })
    }

    /// Move the first object at `from` whose marker matches the noun
    fn get_or_drop(&mut self, noun: usize, from: i32, to: i32) -> Result<bool> {
        let word_length = self.db.header.word_length;
        let typed = self.typed_noun();
        let vocabulary_noun = if noun > 0 {
            self.db
                .vocabulary
                .display_text(noun, WordKind::Noun)
                .map(|text| truncate_chars(&text.to_uppercase(), word_length))
        } else {
            None
        };

        let candidates: Vec<usize> = self.world.objects_at(from).collect();
        for object in candidates {
            let Some(marker) = self.db.object(object)?.noun_marker() else {
                continue;
            };
            let marker = truncate_chars(&marker.to_uppercase(), word_length);
            if marker.is_empty() {
                continue;
            }
            if vocabulary_noun.as_deref() == Some(marker.as_str()) || marker == typed {
                debug!("moving object {} from {} to {}", object, from, to);
                self.world.set_location(object, to)?;
                self.display.print_line("OK")?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn show_intro(&mut self) -> Result<()> {
        if self.config.clear_screen {
            self.display.clear_screen()?;
        }
        self.display.print_line(INTRO)?;
        self.display.flush()?;
        self.input.read_line()?;
        if self.config.clear_screen {
            self.display.clear_screen()?;
        }
        Ok(())
    }

    fn ask_file_name(&mut self) -> Result<Option<String>> {
        self.display.print_line("Name of save file:")?;
        self.display.flush()?;
        Ok(self.input.read_line()?.map(|name| name.trim().to_string()))
    }

    /// SAVE: ask for a file name and write the world to it
    pub fn save_game(&mut self) -> Result<()> {
        let Some(name) = self.ask_file_name()? else {
            return Ok(());
        };
        let save = SaveGame::from_world(&self.world, &self.db);
        if let Err(e) = save.write_to_file(Path::new(&name)) {
            warn!("save to {} failed: {}", name, e);
            self.display
                .print_line(&format!("Couldn't save \"{}\".", name))?;
        }
        Ok(())
    }

    /// LOAD GAME: ask for a file name and replace the world with its contents.
    /// Returns whether the world changed.
    pub fn load_game(&mut self) -> Result<bool> {
        let Some(name) = self.ask_file_name()? else {
            return Ok(false);
        };

        let restored = RestoreGame::from_file(Path::new(&name))
            .and_then(|restore| restore.restore(&self.db));
        let message = match restored {
            Ok(world) => {
                info!("restored game from {}", name);
                self.world = world;
                return Ok(true);
            }
            Err(AdventureError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                format!("Couldn't load \"{}\". Doesn't exist!", name)
            }
            Err(AdventureError::Io(e)) => {
                warn!("reading save file {} failed: {}", name, e);
                format!("Couldn't load \"{}\".", name)
            }
            Err(AdventureError::SaveVersionMismatch { .. }) => {
                "Invalid savegame version".to_string()
            }
            Err(AdventureError::SaveAdventureMismatch { .. }) => {
                "Invalid savegame adventure number".to_string()
            }
            Err(AdventureError::InvalidSave(reason)) => {
                warn!("rejected save file {}: {}", name, reason);
                format!("Couldn't load \"{}\". Invalid savegame", name)
            }
            Err(e) => return Err(e),
        };
        self.display.print_line(&message)?;
        Ok(false)
    }
}

/// `LOAD GAME`, any case, spaces optional
fn is_load_request(line: &str) -> bool {
    let upper = line.trim_start().to_uppercase();
    upper
        .strip_prefix("LOAD")
        .is_some_and(|rest| rest.trim_start().starts_with("GAME"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Opcode;
    use crate::test_utils::AdventureBuilder;
    use test_log::test;

    const JUMP: i32 = 15;
    const WAIT: i32 = 14;

    #[test]
    fn test_load_request_matching() {
        assert!(is_load_request("LOAD GAME"));
        assert!(is_load_request("  load   game please"));
        assert!(is_load_request("loadgame"));
        assert!(!is_load_request("LOAD"));
        assert!(!is_load_request("please load game"));
    }

    #[test]
    fn test_start_describes_first_room() {
        let (mut game, transcript) = AdventureBuilder::new().interpreter(Vec::<String>::new());
        game.start().unwrap();
        assert_eq!(
            transcript.contents(),
            "I'm in a forest clearing. Visible items here: \n\
             Sign. *Gold coin*. Rusty axe. Lit lamp. \n\
             Obvious exits: NORTH EAST \n\n"
        );
    }

    #[test]
    fn test_verbatim_room_and_no_exits() {
        let (mut game, transcript) = AdventureBuilder::new().interpreter(Vec::<String>::new());
        game.world.current_room = 4;
        game.show_room_description().unwrap();
        assert_eq!(transcript.contents(), "Limbo\n\n\n");
    }

    #[test]
    fn test_movement() {
        let (mut game, transcript) = AdventureBuilder::new().interpreter(Vec::<String>::new());
        game.process_line("go north").unwrap();
        assert_eq!(game.world.current_room, 2);
        assert!(transcript.take().starts_with("I'm in a dark cave"));

        game.process_line("go west").unwrap();
        assert_eq!(game.world.current_room, 2);
        assert_eq!(transcript.take(), "I can't go in that direction\n");

        game.process_line("go").unwrap();
        assert_eq!(transcript.take(), "Give me a direction too.\n");

        game.process_line("s").unwrap();
        assert_eq!(game.world.current_room, 1);
    }

    #[test]
    fn test_moving_blind_in_the_dark() {
        let (mut game, transcript) = AdventureBuilder::new().interpreter(Vec::<String>::new());
        game.world.set_location(LIGHT_SOURCE_ID, ROOM_STORE).unwrap();
        game.world.set_flag(FLAG_NIGHT, true).unwrap();

        game.process_line("n").unwrap();
        assert_eq!(game.world.current_room, 2);
        assert_eq!(
            transcript.take(),
            "Dangerous to move in the dark!\nI can't see: Its too dark.\n"
        );

        game.process_line("w").unwrap();
        assert_eq!(game.world.current_room, game.db.header.dead_room());
        assert!(!game.world.flag(FLAG_NIGHT).unwrap());
        assert_eq!(
            transcript.take(),
            "Dangerous to move in the dark!\nI fell down and broke my neck.\nLimbo\n\n\n"
        );
    }

    #[test]
    fn test_unknown_words() {
        let (mut game, transcript) = AdventureBuilder::new().interpreter(Vec::<String>::new());
        game.process_line("xyzzy").unwrap();
        game.process_line("look frobozz").unwrap();
        game.process_line("").unwrap();
        assert_eq!(
            transcript.lines(),
            vec![
                "You use word(s) I don't know",
                "You use word(s) I don't know",
                "You use word(s) I don't know",
            ]
        );
    }

    #[test]
    fn test_no_matching_action() {
        let (mut game, transcript) = AdventureBuilder::new()
            .action(JUMP, 0, &[(4, 3)], &[1])
            .interpreter(Vec::<String>::new());
        game.process_line("jump").unwrap();
        game.process_line("wait").unwrap();
        assert_eq!(
            transcript.lines(),
            vec!["I can't do that yet", "I don't understand your command"]
        );
    }

    #[test]
    fn test_first_applicable_action_wins() {
        let (mut game, transcript) = AdventureBuilder::new()
            .action(JUMP, 0, &[(4, 3)], &[1])
            .action(JUMP, 0, &[], &[2])
            .action(JUMP, 0, &[], &[3])
            .interpreter(Vec::<String>::new());
        game.process_line("jump").unwrap();
        assert_eq!(transcript.contents(), "Nothing happens.\n");
    }

    #[test]
    fn test_noun_must_match_unless_wildcard() {
        let (mut game, transcript) = AdventureBuilder::new()
            .action(JUMP, 16, &[], &[1])
            .action(JUMP, 0, &[], &[2])
            .interpreter(Vec::<String>::new());
        game.process_line("jump book").unwrap();
        game.process_line("jump sign").unwrap();
        assert_eq!(
            transcript.lines(),
            vec!["The door creaks open.", "Nothing happens."]
        );
    }

    #[test]
    fn test_continuation_chain() {
        let (mut game, transcript) = AdventureBuilder::new()
            .action(JUMP, 0, &[], &[1, Opcode::Continue.slot_value()])
            .action(0, 0, &[], &[2])
            .action(0, 0, &[(4, 3)], &[3])
            .action(0, 0, &[], &[Opcode::SetFlag0.slot_value()])
            .action(WAIT, 0, &[], &[])
            .action(0, 0, &[], &[3])
            .interpreter(Vec::<String>::new());
        game.process_line("jump").unwrap();
        assert_eq!(
            transcript.lines(),
            vec!["The door creaks open.", "Nothing happens."]
        );
        assert!(game.world.flag(0).unwrap());
        assert!(!game.continuation);
    }

    #[test]
    fn test_continuation_does_not_leak_into_next_pass() {
        let (mut game, transcript) = AdventureBuilder::new()
            .action(JUMP, 0, &[], &[Opcode::Continue.slot_value()])
            .action(WAIT, 0, &[], &[])
            .action(0, 0, &[], &[3])
            .interpreter(Vec::<String>::new());
        game.process_line("jump").unwrap();
        assert_eq!(transcript.contents(), "");
    }

    #[test]
    fn test_automatic_actions_on_ambient_pass() {
        // seed 0 rolls 75 then 0
        let (mut game, transcript) = AdventureBuilder::new()
            .action(0, 50, &[], &[2])
            .action(0, 1, &[], &[1])
            .action(JUMP, 0, &[], &[])
            .interpreter(Vec::<String>::new());
        game.run_actions(VERB_AUTO, 0).unwrap();
        assert_eq!(transcript.take(), "The door creaks open.\n");

        // a word pass never rolls for automatic actions
        game.run_actions(JUMP as usize, 0).unwrap();
        assert_eq!(transcript.take(), "");
    }

    #[test]
    fn test_turn_runs_word_pass_then_ambient_pass() {
        let (mut game, transcript) = AdventureBuilder::new()
            .action(0, 100, &[(8, 1)], &[3])
            .action(JUMP, 0, &[(0, 1)], &[1, Opcode::SetFlag.slot_value()])
            .interpreter(Vec::<String>::new());
        game.process_line("jump").unwrap();
        assert_eq!(
            transcript.lines(),
            vec!["The door creaks open.", "A voice booms out."]
        );
    }

    #[test]
    fn test_carry_and_drop_fallback() {
        let (mut game, transcript) = AdventureBuilder::new().interpreter(Vec::<String>::new());
        game.process_line("get axe").unwrap();
        assert!(game.world.is_carried(5).unwrap());
        game.process_line("take book").unwrap();
        game.process_line("drop key").unwrap();
        game.process_line("drop axe").unwrap();
        assert_eq!(game.world.location(5).unwrap(), 1);
        game.process_line("get").unwrap();
        assert_eq!(
            transcript.lines(),
            vec!["OK", "I don't see it here", "I'm not carrying it", "OK", "What?"]
        );
    }

    #[test]
    fn test_carry_noun_outside_vocabulary() {
        // CHEST is only known from the object's marker
        let (mut game, transcript) = AdventureBuilder::new().interpreter(Vec::<String>::new());
        game.world.current_room = 2;
        game.process_line("get chest").unwrap();
        assert!(game.world.is_carried(8).unwrap());
        game.process_line("get frob").unwrap();
        assert_eq!(transcript.lines(), vec!["OK", "What?"]);
    }

    #[test]
    fn test_carry_limit_in_fallback() {
        let (mut game, transcript) = AdventureBuilder::new()
            .max_carry(1)
            .object_location(6, ROOM_INVENTORY)
            .interpreter(Vec::<String>::new());
        game.process_line("get axe").unwrap();
        assert_eq!(game.world.location(5).unwrap(), 1);
        assert_eq!(
            transcript.contents(),
            "I've too much too carry. try -take inventory-\n"
        );
    }

    #[test]
    fn test_light_countdown() {
        let (mut game, transcript) = AdventureBuilder::new()
            .time_limit(2)
            .object_location(LIGHT_SOURCE_ID, ROOM_INVENTORY)
            .interpreter(Vec::<String>::new());
        for _ in 0..3 {
            game.process_line("look").unwrap();
        }
        assert_eq!(
            transcript.lines(),
            vec![
                "I don't understand your command",
                "Light runs out in 1 turns!",
                "I don't understand your command",
                "Light runs out in 0 turns!",
                "I don't understand your command",
                "Light has run out",
            ]
        );
        assert_eq!(game.world.location(LIGHT_SOURCE_ID).unwrap(), ROOM_STORE);
        assert!(game.world.flag(FLAG_LAMP_EMPTY).unwrap());
    }

    #[test]
    fn test_light_untouched_when_not_carried() {
        let (mut game, _transcript) = AdventureBuilder::new()
            .time_limit(2)
            .interpreter(Vec::<String>::new());
        game.process_line("look").unwrap();
        assert_eq!(game.world.alternate_counter[COUNTER_TIME_LIMIT], 2);
    }

    #[test]
    fn test_single_letter_direction() {
        let (mut game, _transcript) = AdventureBuilder::new().interpreter(Vec::<String>::new());
        game.process_line("e").unwrap();
        assert_eq!(game.world.current_room, 3);
    }

    #[test]
    fn test_save_and_load_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saga.sav");
        let path = path.to_str().unwrap().to_string();

        let (mut game, transcript) = AdventureBuilder::new()
            .action(7, 0, &[], &[Opcode::Save.slot_value()])
            .interpreter(vec![path.clone(), path.clone()]);
        game.process_line("save game").unwrap();
        assert!(Path::new(&path).exists());

        game.process_line("get axe").unwrap();
        game.process_line("n").unwrap();
        transcript.take();

        game.process_line("LOAD GAME").unwrap();
        assert_eq!(game.world.current_room, 1);
        assert_eq!(game.world.location(5).unwrap(), 1);
        assert!(transcript
            .take()
            .starts_with("Name of save file:\nI'm in a forest clearing"));
    }

    #[test]
    fn test_load_missing_file() {
        let (mut game, transcript) = AdventureBuilder::new()
            .interpreter(vec!["/nonexistent/saga.sav"]);
        let before = game.world.clone();
        game.process_line("load game").unwrap();
        assert_eq!(game.world, before);
        assert_eq!(
            transcript.lines(),
            vec![
                "Name of save file:",
                "Couldn't load \"/nonexistent/saga.sav\". Doesn't exist!",
            ]
        );
    }

    #[test]
    fn test_load_unreadable_file_is_not_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.sav");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let name = path.to_str().unwrap().to_string();

        let (mut game, transcript) = AdventureBuilder::new().interpreter(vec![name.clone()]);
        let before = game.world.clone();
        game.process_line("load game").unwrap();
        assert_eq!(game.world, before);
        assert_eq!(
            transcript.lines(),
            vec!["Name of save file:".to_string(), format!("Couldn't load \"{}\".", name)]
        );
    }

    #[test]
    fn test_load_other_adventure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.sav");
        let other = AdventureBuilder::new().number(7).build();
        SaveGame::from_world(&WorldState::new(&other), &other)
            .write_to_file(&path)
            .unwrap();

        let (mut game, transcript) = AdventureBuilder::new()
            .interpreter(vec![path.to_str().unwrap().to_string()]);
        game.process_line("load game").unwrap();
        assert!(transcript.contains("Invalid savegame adventure number"));
    }

    #[test]
    fn test_run_until_input_ends() {
        let (mut game, transcript) = AdventureBuilder::new().interpreter(vec!["n"]);
        assert_eq!(game.run().unwrap(), GameOutcome::EndOfInput);
        let lines = transcript.lines();
        assert_eq!(lines.iter().filter(|l| *l == PROMPT).count(), 2);
        assert!(transcript.contains("I'm in a dark cave"));
    }

    #[test]
    fn test_intro_waits_for_enter() {
        let (mut game, transcript) = AdventureBuilder::new().interpreter(vec!["", "n"]);
        game.config.show_intro = true;
        game.run().unwrap();
        assert!(transcript.contains("*** Welcome ***"));
        assert_eq!(game.world.current_room, 2);
    }
}
