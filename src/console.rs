/// Console Module
///
/// Prompting and reading typed values from a line-oriented input stream.
/// The reader and writer are passed in, so the menu can be driven from a
/// script in tests the same way it is driven from a terminal.

use crate::core::{HotelError, Result};
use crate::statements;
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Printed whenever a typed value fails to parse
pub const INVALID_INPUT: &str = "Your input is invalid!";

/// A prompt-and-read session over an input reader and an output writer
pub struct Console<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            line: String::new(),
        }
    }

    /// The output stream, for printing query results
    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consumes the console and returns its output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` without a newline and flushes, so prompts appear
    /// before the program blocks on input.
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Writes `text` followed by a newline
    pub fn println(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads one line without its line terminator. Other whitespace is kept.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::InputClosed` at end of input.
    pub fn read_line(&mut self) -> Result<String> {
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(HotelError::InputClosed);
        }
        Ok(self.line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prints `prompt` and reads a free-form line of text, as typed
    pub fn prompt_text(&mut self, prompt: &str) -> Result<String> {
        self.print(prompt)?;
        self.read_line()
    }

    /// Prints `prompt` and reads a value of type `T`, re-prompting until the
    /// line parses.
    pub fn prompt_parsed<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        loop {
            let line = self.prompt_text(prompt)?;
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.println(INVALID_INPUT)?,
            }
        }
    }

    /// Prints `prompt` and reads an integer
    pub fn prompt_int(&mut self, prompt: &str) -> Result<i64> {
        self.prompt_parsed(prompt)
    }

    /// Prints `prompt` and reads a finite decimal number
    pub fn prompt_decimal(&mut self, prompt: &str) -> Result<f64> {
        loop {
            let value: f64 = self.prompt_parsed(prompt)?;
            if value.is_finite() {
                return Ok(value);
            }
            self.println(INVALID_INPUT)?;
        }
    }

    /// Prints `prompt` and reads `yes` or `no` in any case.
    pub fn prompt_yes_no(&mut self, prompt: &str) -> Result<bool> {
        let mut answer = self.prompt_text(prompt)?;
        loop {
            let trimmed = answer.trim();
            if trimmed.eq_ignore_ascii_case("yes") {
                return Ok(true);
            }
            if trimmed.eq_ignore_ascii_case("no") {
                return Ok(false);
            }
            self.println("Wrong format.")?;
            answer = self.prompt_text(prompt)?;
        }
    }

    /// Prints `prompt` and reads a calendar date as `MM/DD/YYYY` or
    /// `YYYY-MM-DD`.
    pub fn prompt_date(&mut self, prompt: &str) -> Result<NaiveDate> {
        loop {
            let line = self.prompt_text(prompt)?;
            match statements::parse_date(&line) {
                Some(date) => return Ok(date),
                None => self.println(INVALID_INPUT)?,
            }
        }
    }
}
