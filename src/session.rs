use crate::backend::BootStore;
use crate::catalog::list_bootable_entries;
use crate::console::Console;
use crate::error::FatalError;
use crate::model::BootEntry;
use std::io;
use std::time::Duration;

/// What the operator typed at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Cancel,
    Refresh,
    /// Zero-based index into the catalog.
    Select(usize),
    Invalid,
}

pub fn parse_input(line: &str, len: usize) -> Input {
    let line = line.trim();
    if line.eq_ignore_ascii_case("c") {
        return Input::Cancel;
    }
    if line.eq_ignore_ascii_case("r") {
        return Input::Refresh;
    }
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return Input::Invalid;
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Input::Select(n - 1),
        _ => Input::Invalid,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(BootEntry),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Listing,
    AwaitingInput,
    Refreshing,
    Selected(usize),
    Cancelled,
}

pub fn render_menu(entries: &[BootEntry]) -> String {
    let mut out = String::from("\nInstalled operating systems:\n\n");
    for (i, entry) in entries.iter().enumerate() {
        let mut row = format!("  [{}] {}", i + 1, entry.description);
        let tags = entry.tags();
        if !tags.is_empty() {
            row.push_str(&format!(" ({})", tags.join(", ")));
        }
        row.push_str(&format!("  <{}>", entry.os_family));
        let location = entry.location();
        if !location.is_empty() {
            row.push_str(&format!("  {}", location));
        }
        out.push_str(&row);
        out.push('\n');
    }
    out.push_str("\n  [R] Refresh  [C] Cancel\n");
    out
}

/// Interactive choice of one catalog entry.
pub struct Session<'a> {
    store: &'a dyn BootStore,
    console: &'a mut dyn Console,
    entries: Vec<BootEntry>,
    refresh_pause: Duration,
}

impl<'a> Session<'a> {
    pub fn new(
        store: &'a dyn BootStore,
        console: &'a mut dyn Console,
        entries: Vec<BootEntry>,
        refresh_pause: Duration,
    ) -> Self {
        Self {
            store,
            console,
            entries,
            refresh_pause,
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[BootEntry] {
        &self.entries
    }

    pub fn run(&mut self) -> Result<Outcome, FatalError> {
        let mut state = State::Listing;
        loop {
            log::debug!("Session: {:?}", state);
            state = match state {
                State::Listing => {
                    let menu = render_menu(&self.entries);
                    self.console.write(&menu);
                    State::AwaitingInput
                }
                State::AwaitingInput => self.await_input()?,
                State::Refreshing => {
                    self.refresh()?;
                    State::Listing
                }
                State::Selected(index) => {
                    let entry = self.entries[index].clone();
                    log::info!("Session: selected {} ({})", entry.description, entry.identifier);
                    return Ok(Outcome::Selected(entry));
                }
                State::Cancelled => {
                    log::info!("Session: cancelled");
                    return Ok(Outcome::Cancelled);
                }
            };
        }
    }

    fn await_input(&mut self) -> io::Result<State> {
        self.console
            .write(&format!("\nSelect an entry to boot next [1-{}], R or C: ", self.entries.len()));
        let Some(line) = self.console.read_line()? else {
            return Ok(State::Cancelled);
        };
        let next = match parse_input(&line, self.entries.len()) {
            Input::Cancel => State::Cancelled,
            Input::Refresh => State::Refreshing,
            Input::Select(index) => State::Selected(index),
            Input::Invalid => {
                self.console.write("Invalid selection.\n");
                State::AwaitingInput
            }
        };
        Ok(next)
    }

    /// Swaps in a fresh catalog; on failure the current one stays as it was.
    /// A store that now reports nothing bootable ends the session.
    fn refresh(&mut self) -> Result<(), FatalError> {
        self.console.write("Refreshing...\n");
        match list_bootable_entries(self.store) {
            Ok(entries) if entries.is_empty() => return Err(FatalError::NoBootableEntries),
            Ok(entries) => self.entries = entries,
            Err(e) => {
                log::warn!("Refresh failed: {}", e);
                self.console.write(&format!("Refresh failed: {}\n", e));
                if let Some(output) = e.output() {
                    self.console.write(&format!("{}\n", output.trim_end()));
                }
                self.console.sleep(self.refresh_pause);
            }
        }
        Ok(())
    }
}
