//! Vocabulary matcher
//!
//! Verbs and nouns share one table of `(verb, noun)` text pairs. A leading
//! `*` marks a synonym, which resolves to the closest earlier entry in the
//! same column that is not a synonym.

use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use indexmap::IndexSet;
use log::debug;

pub const VERB_AUTO: usize = 0;
pub const VERB_GO: usize = 1;
pub const VERB_CARRY: usize = 10;
pub const VERB_DROP: usize = 18;
/// Nouns 1..=6 are the directions, in exit order
pub const DIRECTION_NOUNS: usize = 6;

pub const DIRECTION_NAMES: [&str; DIRECTION_NOUNS] = ["NORTH", "SOUTH", "EAST", "WEST", "UP", "DOWN"];

const SYNONYM_MARKER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    Verb,
    Noun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyWord {
    pub verb: String,
    pub noun: String,
}

impl VocabularyWord {
    pub fn new(verb: impl Into<String>, noun: impl Into<String>) -> Self {
        VocabularyWord {
            verb: verb.into(),
            noun: noun.into(),
        }
    }

    pub fn text(&self, kind: WordKind) -> &str {
        match kind {
            WordKind::Verb => &self.verb,
            WordKind::Noun => &self.noun,
        }
    }
}

/// Verb and noun ids for one line of input, plus the words as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub verb: usize,
    pub noun: usize,
    pub verb_text: String,
    pub noun_text: String,
}

impl ParsedInput {
    /// An unrecognised verb, or a noun that was typed but not recognised.
    /// CARRY and DROP are let through so they can match object nouns.
    pub fn has_unknown_words(&self) -> bool {
        if self.verb == VERB_CARRY || self.verb == VERB_DROP {
            return false;
        }
        self.verb == 0 || (!self.noun_text.is_empty() && self.noun == 0)
    }
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<VocabularyWord>,
    word_length: usize,
}

impl Vocabulary {
    pub fn new(words: Vec<VocabularyWord>, word_length: usize) -> Self {
        Vocabulary { words, word_length }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stored text for an id, synonym marker included
    pub fn text(&self, id: usize, kind: WordKind) -> Option<&str> {
        self.words.get(id).map(|w| w.text(kind))
    }

    /// Stored text with the synonym marker removed
    pub fn display_text(&self, id: usize, kind: WordKind) -> Option<&str> {
        self.text(id, kind).map(|t| t.trim_start_matches(SYNONYM_MARKER))
    }

    /// Id of the entry a synonym stands for
    pub fn canonical_id(&self, id: usize, kind: WordKind) -> usize {
        self.words
            .iter()
            .enumerate()
            .take(id.saturating_add(1))
            .rev()
            .find(|(_, w)| !w.text(kind).starts_with(SYNONYM_MARKER))
            .map_or(0, |(i, _)| i)
    }

    /// Look a typed word up in one column.
    ///
    /// Both sides are cut to the word length and compared without regard to
    /// case. An exact match anywhere in the table wins; failing that, the
    /// first entry the typed word abbreviates. So this is not a plain "first
    /// id that matches" scan: with `UPPER` before `UP`, typing `UP` finds the
    /// later `UP` entry even though it also abbreviates `UPPER`. Returns the
    /// canonical id, or 0 when nothing matches.
    pub fn lookup(&self, token: &str, kind: WordKind) -> usize {
        let wanted = truncate_chars(&token.to_uppercase(), self.word_length);
        if wanted.is_empty() {
            return 0;
        }

        let stored = |w: &VocabularyWord| {
            truncate_chars(
                &w.text(kind).trim_start_matches(SYNONYM_MARKER).to_uppercase(),
                self.word_length,
            )
        };

        let exact = self.words.iter().position(|w| stored(w) == wanted);
        let found = exact.or_else(|| {
            self.words.iter().position(|w| {
                let text = stored(w);
                !text.is_empty() && text.starts_with(&wanted)
            })
        });

        match found {
            Some(id) => self.canonical_id(id, kind),
            None => 0,
        }
    }

    /// Rewrite a bare direction into GO + direction.
    ///
    /// Applies when the typed verb abbreviates one of the direction nouns and
    /// does not begin with any verb that currently has a runnable action.
    /// Returns the replacement tokens.
    pub fn resolve_direction_shortcut(
        &self,
        tokens: &[String],
        viable_verbs: &IndexSet<usize>,
    ) -> Option<Vec<String>> {
        let entered = truncate_chars(&tokens.first()?.to_uppercase(), self.word_length);
        if entered.is_empty() {
            return None;
        }

        for &verb in viable_verbs {
            let verb_text = self.display_text(verb, WordKind::Verb).unwrap_or_default();
            if !verb_text.is_empty() && entered.starts_with(&verb_text.to_uppercase()) {
                return None;
            }
        }

        let go = self.display_text(VERB_GO, WordKind::Verb)?;
        (1..=DIRECTION_NOUNS)
            .filter_map(|noun| self.display_text(noun, WordKind::Noun))
            .find(|direction| {
                !direction.is_empty() && direction.to_uppercase().starts_with(&entered)
            })
            .map(|direction| {
                debug!("direction shortcut {} -> {} {}", entered, go, direction);
                vec![go.to_string(), direction.to_string()]
            })
    }

    /// Turn an input line into verb and noun ids
    pub fn parse(&self, line: &str, viable_verbs: &IndexSet<usize>) -> ParsedInput {
        let mut tokens = tokenize(line);
        if let Some(rewritten) = self.resolve_direction_shortcut(&tokens, viable_verbs) {
            tokens = rewritten;
        }

        let verb_text = tokens.first().cloned().unwrap_or_default();
        let noun_text = tokens.get(1).cloned().unwrap_or_default();
        let parsed = ParsedInput {
            verb: self.lookup(&verb_text, WordKind::Verb),
            noun: self.lookup(&noun_text, WordKind::Noun),
            verb_text,
            noun_text,
        };
        debug!(
            "parsed '{}' '{}' as verb {} noun {}",
            parsed.verb_text, parsed.noun_text, parsed.verb, parsed.noun
        );
        parsed
    }
}

impl Display for Vocabulary {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        writeln!(f, "{} words, word length {}", self.words.len(), self.word_length)?;
        for (id, word) in self.words.iter().enumerate() {
            writeln!(f, "{:4}  {:10} {}", id, word.verb, word.noun)?;
        }
        Ok(())
    }
}

/// Split on single spaces after dropping leading spaces
pub fn tokenize(line: &str) -> Vec<String> {
    line.trim_start_matches(' ')
        .split(' ')
        .map(str::to_string)
        .collect()
}

/// First `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
