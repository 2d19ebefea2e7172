//! Interactive menu
//!
//! Reads choices line by line so it works the same against a terminal, a pipe
//! or an in-memory buffer.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use super::app::Settings;
use super::course::{write_course, write_listing};
use super::output::Output;
use crate::domain::Catalog;
use crate::storage::LoadError;

const MENU: &str = "\
Menu:
  1. Load Course Data
  2. Display All Courses
  3. Find Course
  9. Exit
Enter choice: ";

/// Runs the menu on stdin/stdout
pub fn run(output: &Output, settings: &Settings) -> Result<()> {
    output.verbose_ctx(
        "shell",
        &format!("Default catalog: {}", settings.catalog.display()),
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(stdin.lock(), stdout.lock(), settings).run()?;
    Ok(())
}

/// Menu state: the input/output pair and the catalog loaded so far
pub struct Shell<'a, R, W> {
    input: R,
    out: W,
    settings: &'a Settings,
    catalog: Option<Catalog>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(input: R, out: W, settings: &'a Settings) -> Self {
        Self {
            input,
            out,
            settings,
            catalog: None,
        }
    }

    /// The catalog loaded by the last successful "Load Course Data"
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Loops until the user picks 9 or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.out, "{}", MENU)?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.out)?;
                writeln!(self.out, "Good bye.")?;
                break;
            };

            match line.trim().parse::<u32>() {
                Ok(1) => self.timed(Self::load_courses)?,
                Ok(2) => self.timed(Self::display_all)?,
                Ok(3) => self.timed(Self::find_course)?,
                Ok(9) => {
                    writeln!(self.out, "Good bye.")?;
                    break;
                }
                _ => writeln!(self.out, "Invalid choice. Please enter 1, 2, 3, or 9.")?,
            }
        }
        Ok(())
    }

    fn timed(&mut self, action: fn(&mut Self) -> io::Result<()>) -> io::Result<()> {
        let start = Instant::now();
        action(self)?;

        if self.settings.timings {
            let elapsed = start.elapsed();
            writeln!(self.out, "time: {} microseconds", elapsed.as_micros())?;
            writeln!(self.out, "time: {:.6} seconds", elapsed.as_secs_f64())?;
        }
        Ok(())
    }

    fn load_courses(&mut self) -> io::Result<()> {
        self.prompt(&format!(
            "Use default file path ({})? (y/n): ",
            self.settings.catalog.display()
        ))?;
        let answer = self.read_line()?.unwrap_or_default();

        let path = match answer.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => self.settings.catalog.clone(),
            Some('n') => {
                self.prompt("Enter the course data file path: ")?;
                PathBuf::from(self.read_line()?.unwrap_or_default().trim())
            }
            _ => return writeln!(self.out, "Invalid input. Please enter 'y' or 'n'."),
        };

        writeln!(self.out, "Loading CSV file {}", path.display())?;
        match self.settings.loader().load(&path) {
            Ok(catalog) => {
                writeln!(self.out, "{} courses read", catalog.records_read())?;
                self.catalog = Some(catalog);
            }
            Err(LoadError::Open { .. }) => {
                writeln!(self.out, "Error: Unable to open file {}", path.display())?
            }
            Err(err) => writeln!(self.out, "Error: {}", err)?,
        }
        Ok(())
    }

    fn display_all(&mut self) -> io::Result<()> {
        match &self.catalog {
            Some(catalog) => write_listing(&mut self.out, catalog),
            None => self.not_loaded(),
        }
    }

    fn find_course(&mut self) -> io::Result<()> {
        if self.catalog.is_none() {
            return self.not_loaded();
        }

        self.prompt("Enter course number: ")?;
        let id = self.read_line()?.unwrap_or_default();

        match &self.catalog {
            Some(catalog) => write_course(&mut self.out, catalog, catalog.find(id.trim())),
            None => self.not_loaded(),
        }
    }

    fn not_loaded(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Error: No course data loaded. Please load data first."
        )
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Next input line without its terminator, or `None` at end of input.
    /// Bytes that are not UTF-8 are replaced rather than ending the session.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}
