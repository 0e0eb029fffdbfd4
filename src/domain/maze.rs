/// Maze grid: rows of glyphs as authored, queried through `Tile`.
///
/// Rows are kept exactly as loaded. They are NOT padded to a common width,
/// so every bounds check is per row: `(row, col)` is inside the maze iff
/// `row < rows.len()` and `col < rows[row].len()`.

use super::tile::Tile;

/// A (row, column) coordinate into a maze grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    rows: Vec<Vec<char>>,
}

impl Maze {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        Maze {
            rows: rows.iter().map(|r| r.as_ref().chars().collect()).collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of one row (0 for rows past the end).
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.len())
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn glyph_at(&self, pos: Position) -> Option<char> {
        self.rows.get(pos.row)?.get(pos.col).copied()
    }

    /// Tile at `pos`, or `None` when out of bounds.
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.glyph_at(pos).map(Tile::from_glyph)
    }

    /// First start cell in row-major order. Duplicates are not validated.
    pub fn start(&self) -> Option<Position> {
        self.find(Tile::Start)
    }

    /// First goal cell in row-major order.
    pub fn goal(&self) -> Option<Position> {
        self.find(Tile::Goal)
    }

    fn find(&self, wanted: Tile) -> Option<Position> {
        self.rows.iter().enumerate().find_map(|(row, cells)| {
            cells.iter()
                .position(|&c| Tile::from_glyph(c) == wanted)
                .map(|col| Position::new(row, col))
        })
    }

    pub fn count(&self, wanted: Tile) -> usize {
        self.rows.iter()
            .flat_map(|r| r.iter())
            .filter(|&&c| Tile::from_glyph(c) == wanted)
            .count()
    }
}
