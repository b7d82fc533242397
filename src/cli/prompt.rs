use std::io::{BufRead, Write};

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    /// The terminal already moved to a new line when the user pressed enter.
    terminal_echo: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            terminal_echo: false,
        }
    }

    pub fn with_terminal_echo(mut self, terminal_echo: bool) -> Self {
        self.terminal_echo = terminal_echo;
        self
    }

    /// Print `label` and read one line without its line ending.
    /// `None` at end of input. Answers are never written back to the output.
    pub fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label} ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if !self.terminal_echo || read == 0 {
            writeln!(self.output)?;
        }
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn say(&mut self, message: impl std::fmt::Display) -> anyhow::Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
