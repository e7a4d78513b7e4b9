use std::io::{BufRead, Write};

use anyhow::Result;

use crate::resolver::{GenreLookup, GenreResolver, YearBounds, YearLookup};

pub const GENRE_PROMPT: &str = "Enter a genre (or press Enter to skip): ";
pub const GENRE_NOT_FOUND: &str = "Genre not found. Try again, or press Enter to skip.";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            writeln!(self.output)?;
        }
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }

    pub fn ask_genre(&mut self, resolver: &GenreResolver<'_>) -> Result<Option<String>> {
        loop {
            let answer = self.ask(GENRE_PROMPT)?;
            match resolver.resolve(&answer) {
                GenreLookup::Skip => return Ok(None),
                GenreLookup::Resolved(genre) => return Ok(Some(genre)),
                GenreLookup::Suggestions(suggestions) => writeln!(
                    self.output,
                    "Genre not found. Did you mean: {}?",
                    suggestions.join(", ")
                )?,
                GenreLookup::NotFound => writeln!(self.output, "{GENRE_NOT_FOUND}")?,
            }
        }
    }

    pub fn ask_year(&mut self, bounds: YearBounds) -> Result<Option<i32>> {
        let prompt = format!(
            "Enter a release year {}-{} (or press Enter to skip): ",
            bounds.lower, bounds.upper
        );
        loop {
            let answer = self.ask(&prompt)?;
            match bounds.resolve(&answer) {
                YearLookup::Skip => return Ok(None),
                YearLookup::Valid(year) => return Ok(Some(year)),
                YearLookup::NotANumber => writeln!(
                    self.output,
                    "'{answer}' is not a year. Enter digits only, e.g. {}.",
                    bounds.upper
                )?,
                YearLookup::OutOfRange => writeln!(
                    self.output,
                    "Year must be between {} and {}.",
                    bounds.lower, bounds.upper
                )?,
            }
        }
    }
}
