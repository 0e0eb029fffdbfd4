/// Presentation layer: full-screen maze redraw and leaderboard tables.
///
/// Every frame clears the screen and repaints all rows. Mazes are small, so
/// no diffing is needed. Each row is placed with an explicit `MoveTo` so the
/// output is correct whether or not the terminal is in raw mode.
/// All commands are batched with `queue!` and flushed once at the end.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::domain::maze::{Maze, Position};
use crate::store::leaderboard::LeaderboardEntry;

/// Clear the whole screen and home the cursor.
pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}

/// Paint the maze with `player` overlaid at `pos`, leaving the cursor on the
/// line below the last row.
pub fn draw_maze<W: Write>(out: &mut W, maze: &Maze, pos: Position, player: char) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (y, _) in maze.rows().iter().enumerate() {
        queue!(out, MoveTo(0, screen_row(y)?), Print(compose_row(maze, y, pos, player)))?;
    }
    queue!(out, MoveTo(0, screen_row(maze.height())?))?;
    out.flush()
}

/// Terminal row for maze line `y`. Mazes taller than the cursor range are refused.
fn screen_row(y: usize) -> io::Result<u16> {
    u16::try_from(y).map_err(|_| io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("maze row {y} is beyond the terminal cursor range"),
    ))
}

/// One row of glyphs with the player marker substituted in.
pub fn compose_row(maze: &Maze, row: usize, pos: Position, player: char) -> String {
    let Some(cells) = maze.rows().get(row) else {
        return String::new();
    };
    cells.iter()
        .enumerate()
        .map(|(col, &c)| if pos == Position::new(row, col) { player } else { c })
        .collect()
}

/// Text block for one maze's leaderboard. `maze` is the 0-based index.
pub fn format_leaderboard(maze: usize, entries: &[LeaderboardEntry]) -> String {
    let mut out = String::with_capacity(64 + entries.len() * 32);
    out.push_str(&format!("Leaderboard for Maze {}\n", maze + 1));
    out.push_str(&format!("{:<4} {:<15} {:<10}\n", "Rank", "User", "Time"));
    if entries.is_empty() {
        out.push_str("(no times recorded yet)\n");
    }
    for (i, e) in entries.iter().enumerate() {
        out.push_str(&format!("{:<4} {:<15} {:<10.2}\n", i + 1, e.username, e.seconds));
    }
    out
}
