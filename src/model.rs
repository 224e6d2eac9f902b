use serde::Serialize;
use std::fmt;

/// Which kind of header a record was captured under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeaderKind {
    BootManager,
    BootLoader,
    Firmware,
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OsFamily {
    Windows,
    Linux,
    Other,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsFamily::Windows => "Windows",
            OsFamily::Linux => "Linux",
            OsFamily::Other => "Other",
        };
        f.write_str(name)
    }
}

/// One bootable record as reported by the boot store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootEntry {
    pub identifier: String,         // e.g. "{current}" or "{9dea862c-...}"
    pub description: String,        // Display label, never empty
    pub device: String,             // Raw locator, display only
    pub path: String,               // Raw loader path, display only
    pub os_family: OsFamily,
    pub is_default: bool,
    pub is_current: bool,
    pub kind: HeaderKind,
    pub properties: Vec<(String, String)>, // Everything else, verbatim
}

impl BootEntry {
    /// The "(Current, Default)" style tags shown next to the description.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.is_current {
            tags.push("Current");
        }
        if self.is_default {
            tags.push("Default");
        }
        tags
    }

    /// Best-effort "device path" text, empty when the store reported neither.
    pub fn location(&self) -> String {
        [self.device.as_str(), self.path.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Raw result of one backend process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: Option<i32>, // None when the process was terminated by a signal
    pub text: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}
