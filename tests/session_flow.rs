//! End-to-end flows through the public API: scripted menu input on one side,
//! scripted keystrokes on the other, a temporary profile file underneath.

use std::collections::{HashSet, VecDeque};
use std::io::{self, Cursor};

use termaze::app::App;
use termaze::domain::maze::{Maze, Position};
use termaze::domain::movement::{attempt_move, Direction};
use termaze::domain::tile::Tile;
use termaze::sim::maze_store;
use termaze::store::leaderboard;
use termaze::store::profiles::ProfileStore;
use termaze::ui::input::{KeyReader, ESC};
use termaze::ui::menu::Console;

const BUNDLED: &str = include_str!("../mazes.txt");

struct Keys(VecDeque<Option<char>>);

impl Keys {
    fn from(s: &str) -> Self {
        Keys(s.chars().map(Some).collect())
    }
}

impl KeyReader for Keys {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        Ok(self.0.pop_front().unwrap_or(Some(ESC)))
    }
}

fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::without_pauses(Cursor::new(script.as_bytes().to_vec()), Vec::new())
}

fn reachable(maze: &Maze, from: Position) -> HashSet<Position> {
    let mut seen = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(p) = queue.pop_front() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let next = attempt_move(maze, p, dir);
            assert!(next.row < maze.height() && next.col < maze.row_len(next.row));
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn bundled_mazes_are_well_formed_and_solvable() {
    let mazes = maze_store::parse_mazes(BUNDLED);
    assert!(!mazes.is_empty());
    for (i, maze) in mazes.iter().enumerate() {
        assert_eq!(maze.count(Tile::Start), 1, "maze {i} start count");
        assert_eq!(maze.count(Tile::Goal), 1, "maze {i} goal count");
        let start = maze.start().unwrap();
        let goal = maze.goal().unwrap();
        assert!(reachable(maze, start).contains(&goal), "maze {i} goal unreachable");
    }
}

#[test]
fn register_play_and_rank() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path().join("profiles.txt"));
    std::fs::write(store.path(), "zed;pw;1;maze0:999\n").unwrap();
    let mazes = maze_store::parse_mazes(BUNDLED);
    let app = App { mazes: &mazes, store: &store, player_glyph: 'P' };

    // register ann, play maze 1, Enter, back, quit
    let mut c = console("r\nann\npw\np\n1\n\nb\nq\n");
    app.run(&mut c, &mut Keys::from("ddss")).unwrap();

    let ranked = leaderboard::rank_store(&store, 0).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].username, "ann");
    assert_eq!(ranked[1].username, "zed");
    assert!(ranked[0].seconds >= 0.0);

    let out = String::from_utf8_lossy(&c.into_output()).into_owned();
    assert!(out.contains("Welcome, ann!"));
    assert!(out.contains("You finished the maze in"));
}

#[test]
fn guest_logout_then_login_sees_leaderboard() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path().join("profiles.txt"));
    std::fs::write(store.path(), "bob;pw;1;maze0:4.5\n").unwrap();
    let mazes = maze_store::parse_mazes(BUNDLED);
    let app = App { mazes: &mazes, store: &store, player_glyph: 'P' };

    // guest plays maze 1, logs out, bob logs in and opens the leaderboard
    let script = "g\np\n1\n\nb\nl\nl\nbob\npw\nr\n1\n\nb\nq\n";
    let mut c = console(script);
    app.run(&mut c, &mut Keys::from("ddss")).unwrap();

    let text = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(text, "bob;pw;1;maze0:4.5\n");
    let out = String::from_utf8_lossy(&c.into_output()).into_owned();
    assert!(out.contains("Welcome, GUEST!"));
    assert!(out.contains("Welcome, bob!"));
    assert!(out.contains("Leaderboard for Maze 1"));
}

#[test]
fn empty_maze_file_reports_no_mazes() {
    let dir = tempfile::tempdir().unwrap();
    let maze_path = dir.path().join("mazes.txt");
    std::fs::write(&maze_path, "").unwrap();
    let mazes = maze_store::load(&maze_path).unwrap();
    assert!(mazes.is_empty());

    let store = ProfileStore::new(dir.path().join("profiles.txt"));
    let app = App { mazes: &mazes, store: &store, player_glyph: 'P' };
    let mut c = console("g\np\n\nq\n");
    app.run(&mut c, &mut Keys::from("")).unwrap();
    let out = String::from_utf8_lossy(&c.into_output()).into_owned();
    assert!(out.contains("No mazes available."));
}
