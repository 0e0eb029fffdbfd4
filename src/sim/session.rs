/// Play session: select a maze, run it, record the time, offer the next one.
///
/// Chaining is a plain loop (select → play → record → continue → select),
/// so any number of mazes can be played back to back without nesting calls.

use std::fmt;
use std::io::{BufRead, Write};

use log::{info, warn};

use crate::domain::maze::Maze;
use crate::error::RunError;
use crate::sim::run::{MazeRun, RunOutcome};
use crate::store::profiles::ProfileStore;
use crate::ui::input::KeyReader;
use crate::ui::menu::Console;

/// Who is playing. Guests never have times recorded.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Identity {
    Guest,
    User(String),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Guest => write!(f, "GUEST"),
            Identity::User(name) => write!(f, "{name}"),
        }
    }
}

pub struct Session<'a> {
    pub mazes: &'a [Maze],
    pub store: &'a ProfileStore,
    pub identity: &'a Identity,
    pub player_glyph: char,
}

impl<'a> Session<'a> {
    /// Run until the player backs out of maze selection.
    /// Returns the number of mazes completed.
    pub fn play<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        keys: &mut dyn KeyReader,
    ) -> Result<usize, RunError> {
        if self.mazes.is_empty() {
            console.say("No mazes available.")?;
            console.pause("Press Enter...")?;
            return Ok(0);
        }

        let mut completed = 0;
        let mut next = console.select_maze(SELECT_TITLE, self.mazes.len())?;

        while let Some(index) = next {
            match MazeRun::new(&self.mazes[index], index) {
                Ok(mut run) => {
                    if let RunOutcome::Completed { elapsed } =
                        run.play(keys, console.out(), self.player_glyph)?
                    {
                        completed += 1;
                        self.finish(console, index, elapsed.as_secs_f64())?;
                    }
                }
                Err(e @ RunError::NoStart(_)) => {
                    warn!("{e}");
                    console.say(&format!("Maze {} cannot be played: {e}", index + 1))?;
                    console.pause("Press Enter to continue...")?;
                }
                Err(e) => return Err(e),
            }
            next = console.select_maze(SELECT_TITLE, self.mazes.len())?;
        }

        Ok(completed)
    }

    fn finish<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        index: usize,
        seconds: f64,
    ) -> Result<(), RunError> {
        console.say(&format!("You finished the maze in {:.2}s!", seconds))?;

        match self.identity {
            Identity::User(name) => {
                if let Err(e) = self.store.save_time(name, index, seconds) {
                    warn!("could not save time for {name}: {e}");
                    console.say(&format!("Could not save your time: {e}"))?;
                }
            }
            Identity::Guest => info!("guest run on maze {} not recorded", index),
        }

        console.pause("Press Enter to continue...")?;
        Ok(())
    }
}

const SELECT_TITLE: &str = "Select a maze (or B to go back to Main Menu):";
