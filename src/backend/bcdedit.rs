use crate::backend::{run_captured, BootStore};
use crate::model::CommandOutput;
use std::io;

/// `bcdedit` as the boot store.
pub struct Bcdedit {
    program: String,
}

impl Bcdedit {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl BootStore for Bcdedit {
    fn enumerate(&self) -> io::Result<CommandOutput> {
        run_captured(&self.program, &["/enum", "all"])
    }

    fn set_boot_sequence(&self, identifier: &str) -> io::Result<CommandOutput> {
        run_captured(&self.program, &["/bootsequence", identifier])
    }
}
