use crate::backend::{BootStore, Encryption, ProtectionStatus, Restarter};
use crate::console::{confirm, Console};
use crate::error::{BackendError, FatalError, Operation};
use crate::model::BootEntry;
use std::time::Duration;

/// Reboots the encryption suspension covers.
const SUSPEND_REBOOTS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suspension {
    /// No encryption tool, or the volume is not protected.
    NotApplicable,
    Declined,
    Suspended,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    Declined,
    Requested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub suspension: Suspension,
    pub restart: RestartOutcome,
}

/// The platform side of a commit.
pub struct Collaborators<'a> {
    pub store: &'a dyn BootStore,
    pub encryption: &'a dyn Encryption,
    pub restarter: &'a dyn Restarter,
}

pub struct CommitSettings {
    pub system_volume: String,
    pub countdown_seconds: u32,
}

/// Sets `entry` as the one-time boot target, then handles encryption and the restart.
pub fn commit_one_time_boot(
    entry: &BootEntry,
    backends: &Collaborators<'_>,
    console: &mut dyn Console,
    settings: &CommitSettings,
) -> Result<CommitResult, FatalError> {
    set_boot_sequence(backends.store, &entry.identifier).map_err(FatalError::Commit)?;
    console.write(&format!("\n{} will be started on the next restart.\n", entry.description));

    let suspension = offer_suspension(backends.encryption, console, &settings.system_volume)?;

    if !confirm(console, "Restart now?")? {
        console.write("Not restarting. The selection applies to the next restart.\n");
        if suspension == Suspension::Suspended {
            console.write("Encryption stays suspended until then.\n");
        }
        return Ok(CommitResult {
            suspension,
            restart: RestartOutcome::Declined,
        });
    }

    countdown(console, settings.countdown_seconds);
    backends.restarter.restart().map_err(FatalError::Restart)?;

    Ok(CommitResult {
        suspension,
        restart: RestartOutcome::Requested,
    })
}

fn set_boot_sequence(store: &dyn BootStore, identifier: &str) -> Result<(), BackendError> {
    log::info!("Setting one-time boot sequence to {}", identifier);
    let output = store
        .set_boot_sequence(identifier)
        .map_err(|source| BackendError::Spawn {
            operation: Operation::SetBootSequence,
            source,
        })?;

    if !output.success() {
        return Err(BackendError::Rejected {
            operation: Operation::SetBootSequence,
            status: output.status,
            output: output.text,
        });
    }
    Ok(())
}

/// Checks the running system's volume, never the target's.
fn offer_suspension(
    encryption: &dyn Encryption,
    console: &mut dyn Console,
    volume: &str,
) -> Result<Suspension, FatalError> {
    match encryption.status(volume) {
        Err(e) => {
            log::warn!("Skipping encryption check on {}: {}", volume, e);
            console.write("Encryption status unavailable, skipping suspension.\n");
            Ok(Suspension::NotApplicable)
        }
        Ok(ProtectionStatus::NotProtected) => {
            log::info!("{} is not protected", volume);
            Ok(Suspension::NotApplicable)
        }
        Ok(ProtectionStatus::Protected) => {
            let question = format!(
                "{} is encrypted. Suspend protection for the next restart?",
                volume
            );
            if !confirm(console, &question)? {
                return Ok(Suspension::Declined);
            }
            match encryption.suspend(volume, SUSPEND_REBOOTS) {
                Ok(()) => {
                    console.write("Encryption suspended for one restart.\n");
                    Ok(Suspension::Suspended)
                }
                Err(e) => {
                    log::warn!("Suspending encryption on {} failed: {}", volume, e);
                    console.write(&format!("Could not suspend encryption: {}\n", e));
                    Ok(Suspension::Failed(e.to_string()))
                }
            }
        }
    }
}

fn countdown(console: &mut dyn Console, seconds: u32) {
    for remaining in (1..=seconds).rev() {
        console.write(&format!("\rRestarting in {}... ", remaining));
        console.sleep(Duration::from_secs(1));
    }
    console.write("\rRestarting now.       \n");
}
