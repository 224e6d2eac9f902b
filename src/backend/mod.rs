use crate::error::EncryptionError;
use crate::model::CommandOutput;
use std::io;
use std::process::Command;

/// The persistent boot configuration store.
pub trait BootStore {
    fn enumerate(&self) -> io::Result<CommandOutput>;
    fn set_boot_sequence(&self, identifier: &str) -> io::Result<CommandOutput>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionStatus {
    NotProtected,
    Protected,
}

/// Volume encryption. An `Err` from `status` means the capability is not available.
pub trait Encryption {
    fn status(&self, volume: &str) -> Result<ProtectionStatus, EncryptionError>;
    fn suspend(&self, volume: &str, reboots: u32) -> Result<(), EncryptionError>;
}

/// Asks the platform to reboot now. Does not wait for anything.
pub trait Restarter {
    fn restart(&self) -> io::Result<()>;
}

pub mod bcdedit;
pub mod bitlocker;
pub mod restart;

/// Runs `program args...` to completion, merging stdout and stderr.
pub(crate) fn run_captured(program: &str, args: &[&str]) -> io::Result<CommandOutput> {
    log::debug!("Running {} {:?}", program, args);
    let output = Command::new(program).args(args).output()?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }

    log::debug!("{} exited with {:?}", program, output.status.code());
    Ok(CommandOutput {
        status: output.status.code(),
        text,
    })
}
