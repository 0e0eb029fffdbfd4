pub mod maze;
pub mod movement;
pub mod tile;
