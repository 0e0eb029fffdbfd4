/// One timed run through one maze.
///
/// ## Phases
///   Render → AwaitInput ─(no key)→ AwaitInput
///                       ─(w/a/s/d)→ ApplyMove → CheckGoal ─→ Render
///                       ─(other)→ Render                   └→ Finished
///
/// The clock starts when the run is created and stops on the tick the
/// player steps onto a goal cell. Esc or Ctrl+C abandons the run; the raw
/// read swallows SIGINT, so this is the only way out mid-maze.

use std::io::Write;
use std::time::{Duration, Instant};

use log::debug;

use crate::domain::maze::{Maze, Position};
use crate::domain::movement::{attempt_move, Direction};
use crate::error::RunError;
use crate::ui::input::{KeyReader, CTRL_C, ESC};
use crate::ui::renderer;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RunOutcome {
    Completed { elapsed: Duration },
    Abandoned,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Render,
    AwaitInput,
    ApplyMove(Direction),
    CheckGoal,
    Finished,
}

pub struct MazeRun<'a> {
    maze: &'a Maze,
    pos: Position,
    phase: Phase,
    started: Instant,
    moves: u32,
}

impl<'a> MazeRun<'a> {
    /// Place the player on the first start cell.
    pub fn new(maze: &'a Maze, index: usize) -> Result<Self, RunError> {
        let pos = maze.start().ok_or(RunError::NoStart(index))?;
        Ok(MazeRun {
            maze,
            pos,
            phase: Phase::Render,
            started: Instant::now(),
            moves: 0,
        })
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Accepted steps so far (bumps into walls don't count).
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Drive the phase machine until the goal is reached or the player quits.
    pub fn play<W: Write>(
        &mut self,
        keys: &mut dyn KeyReader,
        out: &mut W,
        player: char,
    ) -> Result<RunOutcome, RunError> {
        loop {
            match self.phase {
                Phase::Render => {
                    renderer::draw_maze(out, self.maze, self.pos, player)?;
                    self.phase = Phase::AwaitInput;
                }
                Phase::AwaitInput => match keys.read_key()? {
                    None => {}
                    Some(ESC) | Some(CTRL_C) => {
                        debug!("run abandoned after {} move(s)", self.moves);
                        return Ok(RunOutcome::Abandoned);
                    }
                    Some(key) => {
                        self.phase = match Direction::from_key(key) {
                            Some(dir) => Phase::ApplyMove(dir),
                            None => Phase::Render,
                        };
                    }
                },
                Phase::ApplyMove(dir) => {
                    let next = attempt_move(self.maze, self.pos, dir);
                    if next != self.pos {
                        self.moves += 1;
                    }
                    self.pos = next;
                    self.phase = Phase::CheckGoal;
                }
                Phase::CheckGoal => {
                    self.phase = if self.on_goal() { Phase::Finished } else { Phase::Render };
                }
                Phase::Finished => {
                    let elapsed = self.started.elapsed();
                    renderer::draw_maze(out, self.maze, self.pos, player)?;
                    debug!("goal reached in {:.3}s, {} move(s)", elapsed.as_secs_f64(), self.moves);
                    return Ok(RunOutcome::Completed { elapsed });
                }
            }
        }
    }

    fn on_goal(&self) -> bool {
        self.maze.tile_at(self.pos).map_or(false, |t| t.is_goal())
    }
}
