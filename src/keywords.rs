//! Reserved words per source language.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::{Error, Highlighter};

pub const PYTHON2: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "exec", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "not", "or",
    "pass", "print", "raise", "return", "try", "while", "with", "yield",
];

pub const PYTHON3: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

static BUILTIN: Lazy<KeywordRegistry> = Lazy::new(KeywordRegistry::builtin);

/// An ordered list of reserved words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordSet {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl KeywordSet {
    /// Words are trimmed; blank entries and repeats are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = KeywordSet::default();
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() && set.lookup.insert(word.to_owned()) {
                set.words.push(word.to_owned());
            }
        }
        set
    }

    /// Case-sensitive, ignoring surrounding whitespace.
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word.trim())
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Named keyword sets, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    sets: Vec<(String, KeywordSet)>,
}

impl KeywordRegistry {
    pub fn new() -> Self {
        KeywordRegistry::default()
    }

    /// Registry holding the languages this crate ships with.
    pub fn builtin() -> Self {
        let mut registry = KeywordRegistry::new();
        registry.register("python2", KeywordSet::new(PYTHON2));
        registry.register("python3", KeywordSet::new(PYTHON3));
        registry
    }

    /// Shared instance of [`KeywordRegistry::builtin`].
    pub fn shared() -> &'static KeywordRegistry {
        &BUILTIN
    }

    /// Adds a language, replacing any set already registered under `name`.
    pub fn register(&mut self, name: &str, set: KeywordSet) {
        match self.sets.iter().position(|(existing, _)| existing == name) {
            Some(idx) => self.sets[idx].1 = set,
            None => self.sets.push((name.to_owned(), set)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&KeywordSet> {
        self.sets
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, set)| set)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|(name, _)| name.as_str())
    }

    /// Builds a highlighter for `language`.
    pub fn configure(&self, language: &str) -> Result<Highlighter, Error> {
        match self.get(language) {
            Some(set) => Ok(Highlighter::new(set.clone())?),
            None => Err(Error::UnknownLanguage(language.to_owned())),
        }
    }
}
