//! Line tokenizer for `bcdedit /enum` style output.
//!
//! Every line becomes exactly one [`Token`]. A record starts at a header line,
//! which bcdedit always underlines with dashes:
//!
//! ```text
//! Windows Boot Loader
//! -------------------
//! identifier              {current}
//! device                  partition=C:
//! displayorder            {current}
//!                         {9dea862c-5cdd-4e70-acc1-f32b344d4795}
//! ```

use crate::model::HeaderKind;
use regex::Regex;
use std::sync::LazyLock;

/// Header lines that open a record, matched case-insensitively against the whole line.
pub const HEADER_PATTERNS: &[(HeaderKind, &str)] = &[
    (HeaderKind::BootManager, r"^(windows|firmware) boot manager$"),
    (HeaderKind::BootLoader, r"^windows boot loader$"),
    (HeaderKind::Firmware, r"^firmware application \([0-9a-f]+\)$"),
    (
        HeaderKind::Legacy,
        r"^(resume from hibernate|real-mode boot sector|windows legacy os loader)$",
    ),
];

static HEADERS: LazyLock<Vec<(HeaderKind, Regex)>> = LazyLock::new(|| {
    HEADER_PATTERNS
        .iter()
        .map(|(kind, pattern)| {
            let re = Regex::new(&format!("(?i){}", pattern)).expect("valid header pattern");
            (*kind, re)
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Header(HeaderKind),
    /// An underlined title we do not know; its record is never bootable.
    UnknownHeader(&'a str),
    Separator,
    Property { key: &'a str, value: &'a str },
    /// An indented line carrying another value for the previous key.
    Continuation(&'a str),
    Blank,
}

pub fn header_kind(line: &str) -> Option<HeaderKind> {
    let line = line.trim();
    HEADERS
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(kind, _)| *kind)
}

fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-')
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| classify_line(line, lines.get(i + 1).copied()))
        .collect()
}

fn classify_line<'a>(line: &'a str, next: Option<&str>) -> Token<'a> {
    let line = line.trim_end();

    if line.trim().is_empty() {
        return Token::Blank;
    }
    if is_separator(line) {
        return Token::Separator;
    }
    if line.starts_with(char::is_whitespace) {
        return Token::Continuation(line.trim());
    }
    if let Some(kind) = header_kind(line) {
        return Token::Header(kind);
    }
    if next.is_some_and(is_separator) {
        return Token::UnknownHeader(line);
    }

    match line.split_once(char::is_whitespace) {
        Some((key, value)) => Token::Property { key, value: value.trim() },
        None => Token::Property { key: line, value: "" },
    }
}
