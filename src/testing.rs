//! In-memory stand-ins for the external collaborators.

use crate::backend::{BootStore, Encryption, ProtectionStatus, Restarter};
use crate::console::Console;
use crate::error::EncryptionError;
use crate::model::CommandOutput;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

pub fn ok(text: &str) -> CommandOutput {
    CommandOutput { status: Some(0), text: text.to_string() }
}

pub fn failed(status: i32, text: &str) -> CommandOutput {
    CommandOutput { status: Some(status), text: text.to_string() }
}

/// Replays queued enumerate results; the last one repeats once the queue runs dry.
pub struct FakeStore {
    enumerations: RefCell<VecDeque<CommandOutput>>,
    last_enumeration: RefCell<Option<CommandOutput>>,
    sequence_result: CommandOutput,
    pub enumerate_calls: Cell<usize>,
    pub sequences: RefCell<Vec<String>>,
}

impl FakeStore {
    pub fn new(enumerations: Vec<CommandOutput>) -> Self {
        Self {
            enumerations: RefCell::new(enumerations.into()),
            last_enumeration: RefCell::new(None),
            sequence_result: ok("The operation completed successfully."),
            enumerate_calls: Cell::new(0),
            sequences: RefCell::new(Vec::new()),
        }
    }

    pub fn with_sequence_result(mut self, result: CommandOutput) -> Self {
        self.sequence_result = result;
        self
    }
}

impl BootStore for FakeStore {
    fn enumerate(&self) -> io::Result<CommandOutput> {
        self.enumerate_calls.set(self.enumerate_calls.get() + 1);
        if let Some(next) = self.enumerations.borrow_mut().pop_front() {
            *self.last_enumeration.borrow_mut() = Some(next);
        }
        self.last_enumeration
            .borrow()
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "bcdedit not found"))
    }

    fn set_boot_sequence(&self, identifier: &str) -> io::Result<CommandOutput> {
        self.sequences.borrow_mut().push(identifier.to_string());
        Ok(self.sequence_result.clone())
    }
}

pub struct FakeEncryption {
    status: Option<ProtectionStatus>, // None: capability unavailable
    suspend_ok: bool,
    pub status_calls: RefCell<Vec<String>>,
    pub suspensions: RefCell<Vec<(String, u32)>>,
}

impl FakeEncryption {
    pub fn new(status: Option<ProtectionStatus>, suspend_ok: bool) -> Self {
        Self {
            status,
            suspend_ok,
            status_calls: RefCell::new(Vec::new()),
            suspensions: RefCell::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self::new(None, false)
    }
}

impl Encryption for FakeEncryption {
    fn status(&self, volume: &str) -> Result<ProtectionStatus, EncryptionError> {
        self.status_calls.borrow_mut().push(volume.to_string());
        self.status.ok_or_else(|| {
            EncryptionError::Unavailable(io::Error::new(io::ErrorKind::NotFound, "manage-bde not found"))
        })
    }

    fn suspend(&self, volume: &str, reboots: u32) -> Result<(), EncryptionError> {
        self.suspensions.borrow_mut().push((volume.to_string(), reboots));
        if self.suspend_ok {
            Ok(())
        } else {
            Err(EncryptionError::Failed {
                status: Some(1),
                output: "ERROR: access denied".to_string(),
            })
        }
    }
}

#[derive(Default)]
pub struct FakeRestarter {
    pub fail: bool,
    pub calls: Cell<usize>,
}

impl Restarter for FakeRestarter {
    fn restart(&self) -> io::Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "restart refused"))
        } else {
            Ok(())
        }
    }
}

/// Feeds queued lines as operator input and records everything written.
pub struct ScriptedConsole {
    input: VecDeque<String>,
    pub output: String,
    pub sleeps: Vec<Duration>,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|s| s.to_string()).collect(),
            output: String::new(),
            sleeps: Vec::new(),
        }
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

/// `bcdedit /enum all` output with a boot manager, the running Windows and Ubuntu.
pub const DUAL_BOOT: &str = "\
Windows Boot Manager
--------------------
identifier              {bootmgr}
device                  partition=\\Device\\HarddiskVolume1
path                    \\EFI\\Microsoft\\Boot\\bootmgfw.efi
description             Windows Boot Manager
locale                  en-US
default                 {current}
displayorder            {current}
                        {abc-123}
timeout                 30

Windows Boot Loader
-------------------
identifier              {current}
                        {default}
device                  partition=C:
path                    \\Windows\\system32\\winload.efi
description             Windows 11
locale                  en-US
recoverysequence        {f2a1c5d4-0000-11ef-9a44-8c1645e1d0a2}
osdevice                partition=C:
systemroot              \\Windows

Windows Boot Loader
-------------------
identifier              {abc-123}
device                  partition=\\Device\\HarddiskVolume1
path                    \\EFI\\ubuntu\\shimx64.efi
description             Ubuntu
";
