/// Maze loader.
///
/// ## File format (`mazes.txt`):
///   ```text
///   #####
///   #S..#
///   #..E#
///   #####
///
///   #######
///   #S...E#
///   #######
///   ```
///
/// Mazes are separated by a blank line. Runs of blank lines and trailing
/// blank lines never produce an empty maze. Rows are kept as authored
/// (no padding).
///
/// ## Tile legend:
///   '#' = Wall        'S' = Start
///   'E' = Goal        anything else = Floor

use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};

use crate::domain::maze::Maze;
use crate::error::MazeError;

/// Load every maze in the file, in order. Index in the result = maze identity.
pub fn load(path: &Path) -> Result<Vec<Maze>, MazeError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MazeError::NotFound(path.to_path_buf()),
        _ => MazeError::Io { path: path.to_path_buf(), source: e },
    })?;

    let mazes = parse_mazes(&content);
    info!("loaded {} maze(s) from {}", mazes.len(), path.display());
    Ok(mazes)
}

/// Split text into mazes on blank lines.
pub fn parse_mazes(content: &str) -> Vec<Maze> {
    let mut mazes = vec![];
    let mut block: Vec<&str> = vec![];

    // `lines()` already strips a trailing '\r'
    for line in content.lines() {
        if line.trim().is_empty() {
            flush(&mut block, &mut mazes);
        } else {
            block.push(line);
        }
    }
    flush(&mut block, &mut mazes);

    mazes
}

fn flush(block: &mut Vec<&str>, mazes: &mut Vec<Maze>) {
    if block.is_empty() {
        return;
    }
    debug!("maze {}: {} row(s)", mazes.len(), block.len());
    mazes.push(Maze::from_rows(block.as_slice()));
    block.clear();
}
