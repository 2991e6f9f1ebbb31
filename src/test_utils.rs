// Test utilities for building small adventure databases in memory
use crate::action::{encode_command_pair, encode_condition, encode_header, ACTION_ENTRIES, CONDITIONS};
use crate::config::InterpreterConfig;
use crate::database::Database;
use crate::display_headless::{HeadlessDisplay, Transcript};
use crate::input::ScriptedInput;
use crate::interpreter::Interpreter;

const WORDS: [(&str, &str); 20] = [
    ("AUT", "ANY"),
    ("GO", "NORTH"),
    ("*WALK", "SOUTH"),
    ("LOOK", "EAST"),
    ("SCORE", "WEST"),
    ("INVEN", "UP"),
    ("QUIT", "DOWN"),
    ("SAVE", "LAMP"),
    ("OPEN", "COIN"),
    ("LIGHT", "GEM"),
    ("GET", "RUBY"),
    ("*TAKE", "PEARL"),
    ("SAY", "DOOR"),
    ("FILL", "KEY"),
    ("WAIT", "INVEN"),
    ("JUMP", "GAME"),
    ("READ", "BOOK"),
    ("UNLOC", "SIGN"),
    ("DROP", "AXE"),
    ("*PUT", "BOTTL"),
];

/// Builds database text around a fixed map:
///
/// ```text
/// room 1 forest clearing   N -> 2, E -> 3   sign, coin, axe, lamp
/// room 2 dark cave         S -> 1           gem, book, chest
/// room 3 treasure vault    W -> 1
/// room 4 limbo (dead room)
/// ```
#[derive(Debug, Clone)]
pub struct AdventureBuilder {
    actions: Vec<([i32; ACTION_ENTRIES], String)>,
    rooms: Vec<([usize; 6], String)>,
    objects: Vec<(String, i32)>,
    messages: Vec<String>,
    max_carry: i32,
    treasures: usize,
    time_limit: i32,
    number: i32,
}

impl AdventureBuilder {
    pub const VERSION: i32 = 3;
    pub const NUMBER: i32 = 42;

    pub fn new() -> Self {
        let rooms = vec![
            ([0; 6], ""),
            ([2, 0, 3, 0, 0, 0], "forest clearing"),
            ([0, 1, 0, 0, 0, 0], "dark cave"),
            ([0, 0, 0, 1, 0, 0], "*I'm in the treasure vault"),
            ([0; 6], "*Limbo"),
        ];
        let objects = vec![
            ("Sign/SIGN/", 1),
            ("*Gold coin*/COIN/", 1),
            ("*Green gem*/GEM/", 2),
            ("*Ruby*/RUBY/", 0),
            ("*Pearl*/PEARL/", 0),
            ("Rusty axe/AXE/", 1),
            ("Brass key/KEY/", 0),
            ("Old book/BOOK/", 2),
            ("Wooden chest/CHEST/", 2),
            ("Lit lamp/LAMP/", 1),
        ];
        let messages = vec![
            "",
            "The door creaks open.",
            "Nothing happens.",
            "A voice booms out.",
        ];

        AdventureBuilder {
            actions: Vec::new(),
            rooms: rooms
                .into_iter()
                .map(|(exits, text)| (exits, text.to_string()))
                .collect(),
            objects: objects
                .into_iter()
                .map(|(text, location)| (text.to_string(), location))
                .collect(),
            messages: messages.into_iter().map(str::to_string).collect(),
            max_carry: 5,
            treasures: 4,
            time_limit: 30,
            number: Self::NUMBER,
        }
    }

    /// Add an action. Condition slots not given are parameter slots holding 0.
    pub fn action(mut self, verb: i32, noun: i32, conditions: &[(i32, i32)], commands: &[i32]) -> Self {
        let mut raw = [0; ACTION_ENTRIES];
        raw[0] = encode_header(verb, noun);
        for (slot, &(code, param)) in conditions.iter().take(CONDITIONS).enumerate() {
            raw[slot + 1] = encode_condition(code, param);
        }
        let command = |i: usize| commands.get(i).copied().unwrap_or(0);
        raw[6] = encode_command_pair(command(0), command(1));
        raw[7] = encode_command_pair(command(2), command(3));
        self.actions.push((raw, format!("action {}", self.actions.len())));
        self
    }

    pub fn raw_action(mut self, raw: [i32; ACTION_ENTRIES]) -> Self {
        self.actions.push((raw, "raw".to_string()));
        self
    }

    pub fn exit(mut self, room: usize, direction: usize, destination: usize) -> Self {
        self.rooms[room].0[direction] = destination;
        self
    }

    pub fn object_location(mut self, object: usize, location: i32) -> Self {
        self.objects[object].1 = location;
        self
    }

    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.messages.push(text.into());
        self
    }

    pub fn max_carry(mut self, limit: i32) -> Self {
        self.max_carry = limit;
        self
    }

    pub fn treasures(mut self, count: usize) -> Self {
        self.treasures = count;
        self
    }

    pub fn time_limit(mut self, turns: i32) -> Self {
        self.time_limit = turns;
        self
    }

    pub fn number(mut self, number: i32) -> Self {
        self.number = number;
        self
    }

    pub fn to_text(&self) -> String {
        let mut actions = self.actions.clone();
        if actions.is_empty() {
            actions.push(([0; ACTION_ENTRIES], "empty".to_string()));
        }

        let mut out = String::new();
        let header = [
            0,
            self.objects.len() as i64 - 1,
            actions.len() as i64 - 1,
            WORDS.len() as i64 - 1,
            self.rooms.len() as i64 - 1,
            i64::from(self.max_carry),
            1,
            self.treasures as i64,
            5,
            i64::from(self.time_limit),
            self.messages.len() as i64 - 1,
            3,
        ];
        for value in header {
            out.push_str(&format!("{}\n", value));
        }
        for (raw, _) in &actions {
            let line: Vec<String> = raw.iter().map(i32::to_string).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        for (verb, noun) in WORDS {
            out.push_str(&format!("\"{}\" \"{}\"\n", verb, noun));
        }
        for (exits, text) in &self.rooms {
            let exits: Vec<String> = exits.iter().map(usize::to_string).collect();
            out.push_str(&format!("{} \"{}\"\n", exits.join(" "), text));
        }
        for text in &self.messages {
            out.push_str(&format!("\"{}\"\n", text));
        }
        for (text, location) in &self.objects {
            out.push_str(&format!("\"{}\" {}\n", text, location));
        }
        for (_, description) in &actions {
            out.push_str(&format!("\"{}\"\n", description));
        }
        out.push_str(&format!("{}\n{}\n", Self::VERSION, self.number));
        out
    }

    pub fn build(&self) -> Database {
        Database::parse(&self.to_text()).expect("builder database should load")
    }

    /// Interpreter over this database with a headless display and a fixed seed of 0
    pub fn interpreter<I, S>(&self, lines: I) -> (Interpreter, Transcript)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let display = HeadlessDisplay::new();
        let transcript = display.transcript();
        let game = Interpreter::new(
            self.build(),
            InterpreterConfig::scripted(0),
            Box::new(display),
            Box::new(ScriptedInput::new(lines)),
        );
        (game, transcript)
    }
}

impl Default for AdventureBuilder {
    fn default() -> Self {
        Self::new()
    }
}
