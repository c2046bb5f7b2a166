use crate::utils::error::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented prompt reader. Every `read_*` call re-prompts on bad input
/// and returns `None` once the input is exhausted.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Raw line without its line terminator.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("Input exhausted");
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// First character of the next non-empty line, upper-cased.
    pub fn read_char(&mut self, prompt: &str) -> Result<Option<char>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };

            match line.trim().chars().next() {
                Some(c) => return Ok(Some(c.to_ascii_uppercase())),
                None => self.say("No character entered. Try again.")?,
            }
        }
    }

    pub fn read_choice(&mut self, prompt: &str, allowed: &[char]) -> Result<Option<char>> {
        loop {
            let Some(c) = self.read_char(prompt)? else {
                return Ok(None);
            };

            if allowed.contains(&c) {
                return Ok(Some(c));
            }
            tracing::warn!("Rejected menu option {:?}", c);
            self.say("Invalid option!")?;
        }
    }

    /// A line of at most `max_chars` characters.
    pub fn read_string(&mut self, prompt: &str, max_chars: usize) -> Result<Option<String>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };

            if line.chars().count() <= max_chars {
                return Ok(Some(line));
            }
            self.say(format!(
                "Input too long! At most {} characters allowed.",
                max_chars
            ))?;
        }
    }

    pub fn read_u32(&mut self, prompt: &str) -> Result<Option<u32>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };

            match line.trim().parse::<u32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Invalid value! Enter a non-negative whole number.")?,
            }
        }
    }

    /// `Y`/`N` question.
    pub fn confirm(&mut self, prompt: &str) -> Result<Option<bool>> {
        Ok(self
            .read_choice(prompt, &['Y', 'N'])?
            .map(|answer| answer == 'Y'))
    }
}
