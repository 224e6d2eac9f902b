use thiserror::Error;

/// The boot-store operation a [`BackendError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Enumerate,
    SetBootSequence,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Enumerate => f.write_str("enumerate boot entries"),
            Operation::SetBootSequence => f.write_str("set one-time boot sequence"),
        }
    }
}

/// The boot store refused, or could not be asked.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("could not run the boot store tool to {operation}: {source}")]
    Spawn {
        operation: Operation,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "boot store failed to {operation} (status {})",
        .status.map_or_else(|| "unknown".to_string(), |s| s.to_string())
    )]
    Rejected {
        operation: Operation,
        status: Option<i32>,
        output: String,
    },
}

impl BackendError {
    /// Raw text the backend printed, for diagnostics.
    pub fn output(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { output, .. } => Some(output.as_str()),
            BackendError::Spawn { .. } => None,
        }
    }
}

/// The encryption backend is missing or answered something unusable.
#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("encryption tool unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("encryption tool failed (status {status:?}): {output}")]
    Failed { status: Option<i32>, output: String },
}

/// Conditions that end the run with a non-zero exit code.
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("could not read the boot configuration")]
    Enumerate(#[source] BackendError),

    #[error("no bootable entries were found in the boot configuration")]
    NoBootableEntries,

    #[error("could not set the one-time boot entry")]
    Commit(#[source] BackendError),

    #[error("the one-time boot entry is set, but the restart request failed")]
    Restart(#[source] std::io::Error),

    #[error("console I/O failed")]
    Console(#[from] std::io::Error),

    #[error("could not serialize the boot entries")]
    Json(#[from] serde_json::Error),
}

impl FatalError {
    /// Likely causes and remedies, printed under the diagnostic.
    pub fn remedies(&self) -> &'static [&'static str] {
        match self {
            FatalError::Enumerate(_) => &[
                "run the program from an elevated (Administrator) console",
                "make sure bcdedit is available on PATH or configured in [backend]",
                "check that the boot configuration store is not locked by another tool",
            ],
            FatalError::NoBootableEntries => &[
                "run `bcdedit /enum all` to see what the boot store reports",
                "other operating systems may only be reachable through the firmware menu",
            ],
            FatalError::Commit(_) => &[
                "run the program from an elevated (Administrator) console",
                "refresh the list; the entry may have been removed",
            ],
            FatalError::Restart(_) => &[
                "restart the machine manually; the one-time boot entry stays set",
                "check the [backend] restart command in the configuration",
            ],
            FatalError::Console(_) => &["run the program from an interactive console"],
            FatalError::Json(_) => &["run with --list without --json to see the entries as text"],
        }
    }

    /// Backend text attached to the failure, if any.
    pub fn backend_output(&self) -> Option<&str> {
        match self {
            FatalError::Enumerate(e) | FatalError::Commit(e) => e.output(),
            _ => None,
        }
    }
}
