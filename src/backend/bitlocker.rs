use crate::backend::{run_captured, Encryption, ProtectionStatus};
use crate::error::EncryptionError;
use regex::Regex;
use std::sync::LazyLock;

static PROTECTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*Protection Status:\s*(.+?)\s*$").expect("valid regex")
});

/// BitLocker through `manage-bde`.
pub struct ManageBde {
    program: String,
}

impl ManageBde {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

/// Reads the `Protection Status:` line of `manage-bde -status` output.
pub fn parse_protection_status(text: &str) -> Option<ProtectionStatus> {
    let caps = PROTECTION_LINE.captures(text)?;
    let value = caps[1].to_ascii_lowercase();
    if value.starts_with("protection on") {
        Some(ProtectionStatus::Protected)
    } else {
        Some(ProtectionStatus::NotProtected)
    }
}

impl Encryption for ManageBde {
    fn status(&self, volume: &str) -> Result<ProtectionStatus, EncryptionError> {
        let output = run_captured(&self.program, &["-status", volume])?;
        if !output.success() {
            return Err(EncryptionError::Failed {
                status: output.status,
                output: output.text,
            });
        }
        parse_protection_status(&output.text).ok_or(EncryptionError::Failed {
            status: output.status,
            output: output.text,
        })
    }

    fn suspend(&self, volume: &str, reboots: u32) -> Result<(), EncryptionError> {
        let count = reboots.to_string();
        let output = run_captured(
            &self.program,
            &["-protectors", "-disable", volume, "-RebootCount", &count],
        )?;
        if output.success() {
            Ok(())
        } else {
            Err(EncryptionError::Failed {
                status: output.status,
                output: output.text,
            })
        }
    }
}
