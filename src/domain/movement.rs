/// Movement engine: one step on the grid, walls and edges absorb the move.
///
/// Bumping into a wall or the edge of the maze is normal input, not an
/// error. The caller always gets a valid position back.

use super::maze::{Maze, Position};

/// Movement direction, one cell per accepted key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `w a s d`, case-insensitive. Everything else means "no movement".
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Neighbour of `pos` in this direction, `None` if it would go negative.
    fn step(self, pos: Position) -> Option<Position> {
        let Position { row, col } = pos;
        match self {
            Direction::Up => row.checked_sub(1).map(|r| Position::new(r, col)),
            Direction::Down => Some(Position::new(row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| Position::new(row, c)),
            Direction::Right => Some(Position::new(row, col + 1)),
        }
    }
}

/// Compute the next position. Pure; returns `pos` unchanged when blocked.
pub fn attempt_move(maze: &Maze, pos: Position, dir: Direction) -> Position {
    match dir.step(pos) {
        Some(next) if maze.tile_at(next).map_or(false, |t| t.is_passable()) => next,
        _ => pos,
    }
}
