//! Folds the token stream into records.
//!
//! The accumulator is either before the first header (`Preamble`, tokens are
//! dropped) or inside a block, where properties and their continuation lines
//! fill a [`RecordBuilder`]. Each header flushes the block in progress.

use crate::catalog::classify::classify;
use crate::catalog::lexer::{tokenize, Token};
use crate::model::{BootEntry, HeaderKind};
use log::debug;

/// Descriptions of pseudo-entries that are never offered for booting.
pub const EXCLUDED_DESCRIPTIONS: &[&str] = &[
    "Windows Memory Diagnostic",
    "Windows Resume Application",
];

pub const CURRENT_SENTINEL: &str = "current";
pub const DEFAULT_SENTINEL: &str = "default";

/// Everything captured for one block, bootable or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: Option<HeaderKind>,
    pub identifier: String,
    pub description: String,
    pub device: String,
    pub path: String,
    pub is_current: bool,
    pub is_default: bool,
    pub properties: Vec<(String, String)>,
}

pub fn is_excluded(description: &str) -> bool {
    let description = description.trim();
    EXCLUDED_DESCRIPTIONS
        .iter()
        .any(|label| label.eq_ignore_ascii_case(description))
}

fn is_sentinel(token: &str, sentinel: &str) -> bool {
    token
        .trim_start_matches('{')
        .trim_end_matches('}')
        .eq_ignore_ascii_case(sentinel)
}

impl Record {
    pub fn is_bootable(&self) -> bool {
        let selectable_kind = matches!(self.kind, Some(kind) if kind != HeaderKind::BootManager);
        selectable_kind
            && !self.identifier.is_empty()
            && !self.description.trim().is_empty()
            && !is_excluded(&self.description)
    }

    pub fn into_entry(self) -> Option<BootEntry> {
        if !self.is_bootable() {
            debug!("Dropping record {:?} ({:?})", self.identifier, self.description);
            return None;
        }
        let kind = self.kind?;
        Some(BootEntry {
            os_family: classify(&self.description, &self.path),
            identifier: self.identifier,
            description: self.description,
            device: self.device,
            path: self.path,
            is_default: self.is_default,
            is_current: self.is_current,
            kind,
            properties: self.properties,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Identifier,
    Description,
    Device,
    Path,
    Property(usize),
}

struct RecordBuilder {
    record: Record,
    last: Option<Target>,
}

impl RecordBuilder {
    fn new(kind: Option<HeaderKind>) -> Self {
        Self {
            record: Record {
                kind,
                identifier: String::new(),
                description: String::new(),
                device: String::new(),
                path: String::new(),
                is_current: false,
                is_default: false,
                properties: Vec::new(),
            },
            last: None,
        }
    }

    fn property(&mut self, key: &str, value: &str) {
        let target = match key.to_ascii_lowercase().as_str() {
            "identifier" => Target::Identifier,
            "description" => Target::Description,
            "device" => Target::Device,
            "path" => Target::Path,
            _ => {
                self.record.properties.push((key.to_string(), String::new()));
                Target::Property(self.record.properties.len() - 1)
            }
        };
        if let Target::Identifier = target {
            self.record.identifier.clear();
            self.record.is_current = false;
            self.record.is_default = false;
        } else if let Some(field) = self.field(target) {
            field.clear();
        }
        self.append(target, value);
        self.last = Some(target);
    }

    fn continuation(&mut self, value: &str) {
        match self.last {
            Some(target) => self.append(target, value),
            None => debug!("Continuation {:?} without a key", value),
        }
    }

    fn field(&mut self, target: Target) -> Option<&mut String> {
        match target {
            Target::Identifier => None,
            Target::Description => Some(&mut self.record.description),
            Target::Device => Some(&mut self.record.device),
            Target::Path => Some(&mut self.record.path),
            Target::Property(i) => self.record.properties.get_mut(i).map(|(_, v)| v),
        }
    }

    fn append(&mut self, target: Target, value: &str) {
        if let Target::Identifier = target {
            self.identifier_tokens(value);
            return;
        }
        if let Some(field) = self.field(target) {
            if !field.is_empty() && !value.is_empty() {
                field.push(' ');
            }
            field.push_str(value);
        }
    }

    /// The first token names the record; any token may be a sentinel alias.
    fn identifier_tokens(&mut self, value: &str) {
        let tokens = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());
        for token in tokens {
            if self.record.identifier.is_empty() {
                self.record.identifier = token.to_string();
            }
            if is_sentinel(token, CURRENT_SENTINEL) {
                self.record.is_current = true;
            }
            if is_sentinel(token, DEFAULT_SENTINEL) {
                self.record.is_default = true;
            }
        }
    }

    fn finish(self) -> Record {
        self.record
    }
}

enum State {
    Preamble,
    InBlock(RecordBuilder),
}

/// Every record in emission order, including the ones that are not bootable.
pub fn parse_records(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut state = State::Preamble;

    for token in tokenize(text) {
        let header = header_of(&token);
        if let Token::UnknownHeader(title) = token {
            debug!("Unrecognized header {:?}, its record is not bootable", title);
        }
        state = match (state, token) {
            (State::InBlock(builder), Token::Header(_) | Token::UnknownHeader(_)) => {
                records.push(builder.finish());
                State::InBlock(RecordBuilder::new(header))
            }
            (State::Preamble, Token::Header(_) | Token::UnknownHeader(_)) => {
                State::InBlock(RecordBuilder::new(header))
            }
            (State::InBlock(mut builder), Token::Property { key, value }) => {
                builder.property(key, value);
                State::InBlock(builder)
            }
            (State::InBlock(mut builder), Token::Continuation(value)) => {
                builder.continuation(value);
                State::InBlock(builder)
            }
            (State::InBlock(mut builder), Token::Blank) => {
                builder.last = None;
                State::InBlock(builder)
            }
            (state, Token::Separator) => state,
            (State::Preamble, other) => {
                debug!("Skipping {:?} before the first header", other);
                State::Preamble
            }
        };
    }

    if let State::InBlock(builder) = state {
        records.push(builder.finish());
    }
    records
}

fn header_of(token: &Token<'_>) -> Option<HeaderKind> {
    match token {
        Token::Header(kind) => Some(*kind),
        _ => None,
    }
}

pub fn parse_entries(text: &str) -> Vec<BootEntry> {
    parse_records(text)
        .into_iter()
        .filter_map(Record::into_entry)
        .collect()
}
