// src/game/console.rs

//! Terminal front end of a [`Session`].

use super::lore::{INTRO, TITLE, universe_description};
use super::render::{portal_diagram, portal_list, routes};
use super::session::{Session, Status, TurnReport, Variant};
use crate::core::QreativeError;
use rand::Rng;
use std::io::{BufRead, Write};

/// Strongest universes listed each turn.
const ROUTES_SHOWN: usize = 3;

/// Blank lines printed to push the previous turn off screen.
const CLEAR_LINES: usize = 50;

/// Parses a 1-based portal number.
pub fn parse_direction(input: &str, max: usize) -> Result<usize, QreativeError> {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(direction) if (1..=max).contains(&direction) => Ok(direction),
        _ => Err(QreativeError::InvalidDirection { input: trimmed.to_string(), max }),
    }
}

/// Reads moves from `input` and writes the game to `output`.
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

    /// Reads one line; end of input is an error since the game cannot go on.
    fn read_line(&mut self) -> Result<String, QreativeError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(QreativeError::Io { message: "Input closed before the game ended".to_string() });
        }
        Ok(line)
    }

    fn clear_screen(&mut self) -> Result<(), QreativeError> {
        write!(self.output, "{}", "\n".repeat(CLEAR_LINES))?;
        Ok(())
    }

    /// Title card and story, one page per line of input.
    pub fn intro(&mut self) -> Result<(), QreativeError> {
        self.clear_screen()?;
        writeln!(self.output, "{}", TITLE)?;
        for page in INTRO {
            writeln!(self.output, "{}", page)?;
            self.output.flush()?;
            self.read_line()?;
        }
        Ok(())
    }

    /// Plays `session` to the end and returns how it ended.
    pub fn play<G: Rng + ?Sized>(&mut self, session: &mut Session, rng: &mut G) -> Result<Status, QreativeError> {
        while !session.status().is_over() {
            let report = session.begin_turn(rng)?;
            self.show_turn(session, &report)?;
            if report.status.is_over() {
                break;
            }
            self.take_move(session, &report)?;
        }
        self.show_ending(session)?;
        Ok(session.status())
    }

    fn show_turn(&mut self, session: &Session, report: &TurnReport) -> Result<(), QreativeError> {
        self.clear_screen()?;
        let moves = report.remaining + 1;
        let position = session.position();
        let table = session.current_table();
        match session.variant() {
            Variant::Classic => {
                writeln!(self.output, "==== You have {} moves until the end of the multiverse! ===\n", moves)?;
                writeln!(self.output, "Score = {}\n", session.score())?;
            }
            Variant::Quantpus => {
                writeln!(self.output, "\n-----------> You have {} moves until the multiverse is destroyed!", moves)?;
                writeln!(self.output, "\n             {}", universe_description(position.as_str()))?;
            }
        }
        write!(self.output, "{}", portal_diagram(table, position, session.variant() == Variant::Classic))?;
        writeln!(
            self.output,
            "\nThe highest strength universes can be reached by the following routes (portals can be used in any order)\n"
        )?;
        for route in routes(table, position, ROUTES_SHOWN) {
            writeln!(self.output, "{}", route.describe(table))?;
        }
        Ok(())
    }

    fn take_move(&mut self, session: &mut Session, report: &TurnReport) -> Result<(), QreativeError> {
        let n = session.num_bits();
        loop {
            if report.malfunctioning.is_some() {
                let spared = match session.last_direction() {
                    Some(last) => format!("not portal {}, the one you just used", last),
                    None => "any of them could be faulty".to_string(),
                };
                writeln!(
                    self.output,
                    "\n\n-----> WARNING: Scans suggest that a nearby portal is malfunctioning ({}).",
                    spared
                )?;
            }
            writeln!(self.output, "\nInput the number for the portal you want to use ({})...", portal_list(n))?;
            self.output.flush()?;
            let line = self.read_line()?;
            writeln!(self.output)?;
            match parse_direction(&line, n).and_then(|direction| session.choose(direction)) {
                Ok(_) => return Ok(()),
                Err(e @ QreativeError::InvalidDirection { .. }) => {
                    writeln!(self.output, "{}", e)?;
                    writeln!(self.output, "That's not a valid direction. Try again")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn show_ending(&mut self, session: &Session) -> Result<(), QreativeError> {
        match session.status() {
            Status::Won => {
                writeln!(self.output, "-----------> You saved the multiverse :)")?;
                if session.variant() == Variant::Classic {
                    writeln!(self.output, "Final score: {}", session.score())?;
                }
            }
            Status::LostHazard => writeln!(self.output, "-----------> You ceased to exist :(")?,
            Status::LostBudget | Status::Playing => writeln!(self.output, "-----------> The multiverse has been destroyed :(")?,
        }
        writeln!(self.output, "\n\n")?;
        self.output.flush()?;
        Ok(())
    }
}
