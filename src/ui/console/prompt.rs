use std::io::{BufRead, Write};

use crate::error::WizardAbort;

pub const RULE: &str = "============================================================";

pub trait Prompter {
    /// Shows `question` and returns the trimmed answer. End of input aborts.
    fn ask(&mut self, question: &str) -> Result<String, WizardAbort>;

    fn say(&mut self, line: &str);
}

pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String, WizardAbort> {
        write!(self.output, "{question}").map_err(|_| WizardAbort)?;
        self.output.flush().map_err(|_| WizardAbort)?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Err(WizardAbort),
            Ok(_) => Ok(line.trim().to_string()),
        }
    }

    fn say(&mut self, line: &str) {
        // Console output is best effort; a closed stdout surfaces on the next ask.
        let _ = writeln!(self.output, "{line}");
    }
}
