use crate::backend::Restarter;
use std::io;
use std::process::{Command, Stdio};

/// Spawns a restart command line such as `shutdown /r /t 0`.
pub struct CommandRestarter {
    command: String,
}

impl CommandRestarter {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl Restarter for CommandRestarter {
    fn restart(&self) -> io::Result<()> {
        let parts: Vec<&str> = self.command.split_whitespace().collect();
        let Some((program, args)) = parts.split_first() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty restart command"));
        };

        log::info!("Requesting restart: {}", self.command);
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(())
    }
}
