use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

/// The operator's terminal: line input, text output and wall-clock pauses.
pub trait Console {
    /// One line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    fn write(&mut self, text: &str);
    fn sleep(&mut self, duration: Duration);
}

pub struct Terminal;

impl Console for Terminal {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            log::debug!("stdout write failed: {}", e);
        }
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Asks a yes/no question. Empty input or "y" (any case) is yes, everything
/// else is no, end of input is no.
///
/// Enter alone confirms, which includes the restart prompt.
// TODO: revisit whether the restart prompt should default to "no" once operators weigh in.
pub fn confirm(console: &mut dyn Console, question: &str) -> io::Result<bool> {
    console.write(&format!("{} [Y/n]: ", question));
    let answer = match console.read_line()? {
        Some(line) => is_yes(&line),
        None => false,
    };
    log::debug!("confirm {:?} -> {}", question, answer);
    Ok(answer)
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.eq_ignore_ascii_case("y")
}
