//! Database loader
//!
//! Reads the packed text format into immutable tables. The file is a flat
//! sequence of integers and double-quoted strings:
//!
//! ```text
//! header        12 integers
//! actions       (actions + 1) * 8 integers
//! words         (words + 1) * 2 strings, verb then noun
//! rooms         (rooms + 1) * (6 exits, description)
//! messages      (messages + 1) strings
//! objects       (objects + 1) * (description, location)
//! descriptions  (actions + 1) action comments
//! trailer       version, adventure number
//! ```
//!
//! Everything is checked once here so the interpreter can index tables
//! without second-guessing the data.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::action::{Action, ParamKind, ACTION_ENTRIES, COMMANDS_IN_ACTION, PAR_CONDITION_CODE};
use crate::command::{CommandSlot, Opcode};
use crate::condition::Condition;
use crate::error::{AdventureError, Result};
use crate::header::{Header, REALLY_BIG_NUMBER};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::state::{
    ALTERNATE_COUNTERS, ALTERNATE_ROOM_REGISTERS, LIGHT_SOURCE_ID, ROOM_INVENTORY, STATUS_FLAGS,
};
use crate::vocabulary::{Vocabulary, VocabularyWord, DIRECTION_NOUNS};

const QUOTE_ESCAPE: char = '`';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub description: String,
    /// Destinations for N, S, E, W, U, D; 0 means no exit
    pub exits: [usize; DIRECTION_NOUNS],
}

impl Room {
    /// Descriptions starting with `*` are shown without "I'm in a"
    pub fn verbatim_description(&self) -> Option<&str> {
        self.description.strip_prefix('*')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub description: String,
    pub original_location: i32,
}

impl Object {
    pub fn is_treasure(&self) -> bool {
        self.description.starts_with('*')
    }

    /// Word between the first pair of slashes, e.g. `LAMP` in `Old lamp/LAMP/`
    pub fn noun_marker(&self) -> Option<&str> {
        let mut parts = self.description.split('/');
        parts.next();
        let marker = parts.next()?;
        parts.next().map(|_| marker)
    }

    /// Description as the player sees it, slash marker removed
    pub fn display_text(&self) -> String {
        match (self.description.find('/'), self.description.rfind('/')) {
            (Some(first), Some(last)) if first < last => {
                format!("{}{}", &self.description[..first], &self.description[last + 1..])
            }
            _ => self.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pub header: Header,
    pub actions: Vec<Action>,
    pub vocabulary: Vocabulary,
    pub rooms: Vec<Room>,
    pub messages: Vec<String>,
    pub objects: Vec<Object>,
}

impl Database {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Database> {
        let path = path.as_ref();
        info!("Loading adventure database {}", path.display());
        let text = fs::read_to_string(path)?;
        Database::parse(&text)
    }

    /// Parse and validate database text
    pub fn parse(text: &str) -> Result<Database> {
        let text = text.replace("\r\n", "\n");
        let tokens = Lexer::new(&text).tokenize()?;
        let db = DatabaseReader::new(tokens).read()?;
        db.validate()?;
        debug!("{}", db.header);
        Ok(db)
    }

    pub fn room(&self, room: usize) -> Result<&Room> {
        self.rooms
            .get(room)
            .ok_or_else(|| AdventureError::invalid_reference(format!("room {}", room)))
    }

    pub fn message(&self, message: usize) -> Result<&str> {
        self.messages
            .get(message)
            .map(String::as_str)
            .ok_or_else(|| AdventureError::invalid_reference(format!("message {}", message)))
    }

    pub fn object(&self, object: usize) -> Result<&Object> {
        self.objects
            .get(object)
            .ok_or_else(|| AdventureError::invalid_reference(format!("object {}", object)))
    }

    /// Check every cross reference in the tables
    pub fn validate(&self) -> Result<()> {
        let rooms = self.header.number_of_rooms;
        if self.header.starting_room > rooms {
            return Err(AdventureError::invalid_database(format!(
                "starting room {} is past the last room {}",
                self.header.starting_room, rooms
            )));
        }
        if self.header.treasure_room > rooms {
            return Err(AdventureError::invalid_database(format!(
                "treasure room {} is past the last room {}",
                self.header.treasure_room, rooms
            )));
        }
        if self.header.word_length == 0 {
            return Err(AdventureError::invalid_database("word length is 0"));
        }

        for (id, room) in self.rooms.iter().enumerate() {
            if let Some(exit) = room.exits.iter().find(|&&exit| exit > rooms) {
                return Err(AdventureError::invalid_database(format!(
                    "room {} has an exit to room {}",
                    id, exit
                )));
            }
        }

        for (id, object) in self.objects.iter().enumerate() {
            let location = object.original_location;
            if location < ROOM_INVENTORY || location > rooms as i32 {
                return Err(AdventureError::invalid_database(format!(
                    "object {} starts in room {}",
                    id, location
                )));
            }
        }

        for (id, action) in self.actions.iter().enumerate() {
            self.validate_action(id, action)?;
        }
        Ok(())
    }

    fn validate_action(&self, id: usize, action: &Action) -> Result<()> {
        let bad = |what: String| {
            AdventureError::invalid_database(format!("action {} ({}): {}", id, action.description(), what))
        };

        if action.verb() as usize > self.header.number_of_words
            || action.noun() as usize > self.header.number_of_words
        {
            warn!(
                "action {} refers to word {}/{} outside the vocabulary",
                id,
                action.verb(),
                action.noun()
            );
        }

        for slot in action.conditions() {
            if slot.code == PAR_CONDITION_CODE {
                continue;
            }
            let condition = Condition::from_code(slot.code)
                .ok_or_else(|| bad(format!("condition code {}", slot.code)))?;
            if let Some(kind) = condition.param_kind() {
                self.check_param(kind, slot.param)
                    .map_err(|what| bad(format!("{} {}", condition.name(), what)))?;
            }
        }

        let mut cursor = action.param_cursor(id);
        for index in 0..COMMANDS_IN_ACTION {
            match CommandSlot::classify(action.command(index)) {
                CommandSlot::Nop => {}
                CommandSlot::Message(message) => {
                    if message > self.header.number_of_messages {
                        return Err(bad(format!("message {} does not exist", message)));
                    }
                }
                CommandSlot::Undefined(value) => {
                    return Err(bad(format!("undefined command {}", value)));
                }
                CommandSlot::Op(op) => {
                    if op == Opcode::Fill && LIGHT_SOURCE_ID > self.header.number_of_objects {
                        return Err(bad("FILL without a light source object".to_string()));
                    }
                    for &kind in op.params() {
                        let param = cursor
                            .next_param()
                            .map_err(|_| bad(format!("{} is missing a parameter", op.name())))?;
                        self.check_param(kind, param)
                            .map_err(|what| bad(format!("{} {}", op.name(), what)))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_param(&self, kind: ParamKind, param: i32) -> std::result::Result<(), String> {
        let limit = match kind {
            ParamKind::Object => self.header.number_of_objects + 1,
            ParamKind::Room => self.header.number_of_rooms + 1,
            ParamKind::Flag => STATUS_FLAGS,
            ParamKind::Counter => ALTERNATE_COUNTERS,
            ParamKind::RoomRegister => ALTERNATE_ROOM_REGISTERS,
            ParamKind::Number => return Ok(()),
        };
        match usize::try_from(param) {
            Ok(value) if value < limit => Ok(()),
            _ => Err(format!("{:?} parameter {} is out of range", kind, param)),
        }
    }
}

/// Recursive-descent reader over the token stream
struct DatabaseReader {
    tokens: Vec<Token>,
    position: usize,
}

impl DatabaseReader {
    fn new(tokens: Vec<Token>) -> Self {
        DatabaseReader {
            tokens,
            position: 0,
        }
    }

    fn read(mut self) -> Result<Database> {
        let mut header = self.read_header()?;
        debug!(
            "header: {} objects, {} actions, {} words, {} rooms, {} messages",
            header.number_of_objects + 1,
            header.number_of_actions + 1,
            header.number_of_words + 1,
            header.number_of_rooms + 1,
            header.number_of_messages + 1
        );

        let mut raw_actions = Vec::with_capacity(header.number_of_actions + 1);
        for _ in 0..=header.number_of_actions {
            let mut raw = [0; ACTION_ENTRIES];
            for entry in raw.iter_mut() {
                *entry = self.non_negative_i32("action entry")?;
            }
            raw_actions.push(raw);
        }

        let mut words = Vec::with_capacity(header.number_of_words + 1);
        for _ in 0..=header.number_of_words {
            let verb = self.text("verb")?;
            let noun = self.text("noun")?;
            words.push(VocabularyWord::new(verb, noun));
        }

        let mut rooms = Vec::with_capacity(header.number_of_rooms + 1);
        for _ in 0..=header.number_of_rooms {
            let mut exits = [0; DIRECTION_NOUNS];
            for exit in exits.iter_mut() {
                *exit = self.count("room exit")?;
            }
            let description = unescape(&self.text("room description")?);
            rooms.push(Room { description, exits });
        }

        let mut messages = Vec::with_capacity(header.number_of_messages + 1);
        for _ in 0..=header.number_of_messages {
            messages.push(unescape(&self.text("message")?));
        }

        let mut objects = Vec::with_capacity(header.number_of_objects + 1);
        for _ in 0..=header.number_of_objects {
            let description = unescape(&self.text("object description")?);
            let original_location = self.i32("object location")?;
            objects.push(Object {
                description,
                original_location,
            });
        }

        let mut actions = Vec::with_capacity(raw_actions.len());
        for raw in raw_actions {
            let description = self.text("action description")?;
            actions.push(Action::new(raw, description));
        }

        header.adventure_version = self.i32("adventure version")?;
        header.adventure_number = self.i32("adventure number")?;

        if !self.at_end() {
            debug!("ignoring data after the adventure number");
        }

        let vocabulary = Vocabulary::new(words, header.word_length);
        info!(
            "Loaded adventure {} version {}",
            header.adventure_number, header.adventure_version
        );
        Ok(Database {
            header,
            actions,
            vocabulary,
            rooms,
            messages,
            objects,
        })
    }

    fn read_header(&mut self) -> Result<Header> {
        let game_bytes = self.integer("game size")?;
        let number_of_objects = self.count("number of objects")?;
        let number_of_actions = self.count("number of actions")?;
        let number_of_words = self.count("number of words")?;
        let number_of_rooms = self.count("number of rooms")?;
        let max_carry = self.integer("carry limit")?;
        let max_objects_carried = if max_carry < 0 {
            REALLY_BIG_NUMBER
        } else {
            self.to_usize(max_carry, "carry limit")?
        };
        let starting_room = self.count("starting room")?;
        let number_of_treasures = self.count("number of treasures")?;
        let word_length = self.count("word length")?;
        let time_limit = self.i32("light time limit")?;
        let number_of_messages = self.count("number of messages")?;
        let treasure_room = self.count("treasure room")?;

        Ok(Header {
            game_bytes,
            number_of_objects,
            number_of_actions,
            number_of_words,
            number_of_rooms,
            max_objects_carried,
            starting_room,
            number_of_treasures,
            word_length,
            time_limit,
            number_of_messages,
            treasure_room,
            adventure_version: 0,
            adventure_number: 0,
        })
    }

    fn next(&mut self, what: &str) -> Result<Token> {
        match self.tokens.get(self.position) {
            Some(token) if token.kind != TokenKind::EOF => {
                self.position += 1;
                Ok(token.clone())
            }
            Some(token) => Err(AdventureError::data_format(
                token.line,
                format!("expected {}, found end of file", what),
            )),
            None => Err(AdventureError::data_format(
                0,
                format!("expected {}, found end of file", what),
            )),
        }
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.position.saturating_sub(1))
            .map_or(0, |t| t.line)
    }

    fn at_end(&self) -> bool {
        self.tokens
            .get(self.position)
            .map_or(true, |t| t.kind == TokenKind::EOF)
    }

    fn integer(&mut self, what: &str) -> Result<i64> {
        let token = self.next(what)?;
        match token.kind {
            TokenKind::Integer(value) => Ok(value),
            other => Err(AdventureError::data_format(
                token.line,
                format!("expected {}, found {}", what, other.describe()),
            )),
        }
    }

    fn text(&mut self, what: &str) -> Result<String> {
        let token = self.next(what)?;
        match token.kind {
            TokenKind::Text(text) => Ok(text),
            other => Err(AdventureError::data_format(
                token.line,
                format!("expected {}, found {}", what, other.describe()),
            )),
        }
    }

    fn i32(&mut self, what: &str) -> Result<i32> {
        let value = self.integer(what)?;
        i32::try_from(value).map_err(|_| {
            AdventureError::data_format(self.line(), format!("{} {} is too large", what, value))
        })
    }

    fn non_negative_i32(&mut self, what: &str) -> Result<i32> {
        let value = self.i32(what)?;
        if value < 0 {
            return Err(AdventureError::data_format(
                self.line(),
                format!("{} {} is negative", what, value),
            ));
        }
        Ok(value)
    }

    fn count(&mut self, what: &str) -> Result<usize> {
        let value = self.integer(what)?;
        self.to_usize(value, what)
    }

    fn to_usize(&self, value: i64, what: &str) -> Result<usize> {
        if value < 0 || value > i64::from(i32::MAX) {
            return Err(AdventureError::data_format(
                self.line(),
                format!("{} {} is out of range", what, value),
            ));
        }
        Ok(value as usize)
    }
}

/// Back-ticks stand for double quotes inside quoted text
fn unescape(text: &str) -> String {
    text.replace(QUOTE_ESCAPE, "\"")
}
