use crate::catalog::list_bootable_entries;
use crate::commit::{commit_one_time_boot, Collaborators, CommitResult, CommitSettings};
use crate::config::Config;
use crate::console::Console;
use crate::error::FatalError;
use crate::session::{self, render_menu, Session};

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub list: bool,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed,
    Cancelled,
    Committed(CommitResult),
}

/// Catalog, then selection, then commit. Every `Err` is a non-zero exit.
pub fn run(
    options: Options,
    config: &Config,
    backends: &Collaborators<'_>,
    console: &mut dyn Console,
) -> Result<Outcome, FatalError> {
    let entries = list_bootable_entries(backends.store).map_err(FatalError::Enumerate)?;
    if entries.is_empty() {
        return Err(FatalError::NoBootableEntries);
    }

    if options.list {
        let text = if options.json {
            serde_json::to_string_pretty(&entries)? + "\n"
        } else {
            render_menu(&entries)
        };
        console.write(&text);
        return Ok(Outcome::Listed);
    }

    let outcome = Session::new(
        backends.store,
        console,
        entries,
        config.session.refresh_pause(),
    )
    .run()?;

    let entry = match outcome {
        session::Outcome::Selected(entry) => entry,
        session::Outcome::Cancelled => {
            console.write("Cancelled. Nothing was changed.\n");
            return Ok(Outcome::Cancelled);
        }
    };

    let settings = CommitSettings {
        system_volume: config.commit.system_volume(),
        countdown_seconds: config.commit.countdown_seconds,
    };
    let result = commit_one_time_boot(&entry, backends, console, &settings)?;
    Ok(Outcome::Committed(result))
}
