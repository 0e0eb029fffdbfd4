/// Tile types and their properties.
/// Glyph mapping lives here so every layer agrees on what a character means.

pub const WALL_GLYPH: char = '#';
pub const START_GLYPH: char = 'S';
pub const GOAL_GLYPH: char = 'E';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Floor, // any non-reserved glyph
    Start,
    Goal,
}

impl Tile {
    pub fn from_glyph(c: char) -> Self {
        match c {
            WALL_GLYPH => Tile::Wall,
            START_GLYPH => Tile::Start,
            GOAL_GLYPH => Tile::Goal,
            _ => Tile::Floor,
        }
    }

    /// Can the player occupy this tile?
    pub fn is_passable(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    pub fn is_goal(self) -> bool {
        matches!(self, Tile::Goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_glyphs_classify() {
        assert_eq!(Tile::from_glyph('#'), Tile::Wall);
        assert_eq!(Tile::from_glyph('S'), Tile::Start);
        assert_eq!(Tile::from_glyph('E'), Tile::Goal);
    }

    #[test]
    fn anything_else_is_floor() {
        for c in ['.', ' ', 'x', '$', 's', 'e'] {
            assert_eq!(Tile::from_glyph(c), Tile::Floor, "glyph {c:?}");
        }
    }

    #[test]
    fn only_walls_block() {
        assert!(!Tile::Wall.is_passable());
        assert!(Tile::Floor.is_passable());
        assert!(Tile::Start.is_passable());
        assert!(Tile::Goal.is_passable());
    }
}
