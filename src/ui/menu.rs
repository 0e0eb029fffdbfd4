/// Line-based console: prompts, menus and the leaderboard screen.
///
/// Generic over the input/output streams so whole menu flows can be driven
/// from a script in tests. End of input is treated as "back"/"quit" at
/// every prompt, so a closed stdin can never spin a menu forever.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use log::warn;

use crate::store::leaderboard;
use crate::store::profiles::ProfileStore;
use crate::ui::renderer;

/// How long a one-line notice stays up before the next screen clears it.
const NOTICE_PAUSE: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MainChoice {
    Play,
    Leaderboard,
    Logout,
    Quit,
}

pub struct Console<R, W> {
    input: R,
    out: W,
    notice_pause: Duration,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Console { input, out, notice_pause: NOTICE_PAUSE }
    }

    /// Console that never sleeps after notices.
    pub fn without_pauses(input: R, out: W) -> Self {
        Console { input, out, notice_pause: Duration::ZERO }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn clear(&mut self) -> io::Result<()> {
        renderer::clear(&mut self.out)
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Print a short message and hold it on screen briefly.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        self.say(text)?;
        if !self.notice_pause.is_zero() {
            std::thread::sleep(self.notice_pause);
        }
        Ok(())
    }

    /// Prompt for one line. `None` at end of input; otherwise trimmed text.
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Wait for Enter. End of input returns straight away.
    pub fn pause(&mut self, label: &str) -> io::Result<()> {
        self.ask(label).map(|_| ())
    }

    /// Numbered maze list. Returns a 0-based index, or `None` for back.
    pub fn select_maze(&mut self, title: &str, count: usize) -> io::Result<Option<usize>> {
        loop {
            self.clear()?;
            self.say(title)?;
            for i in 1..=count {
                self.say(&format!("{i}. Maze {i}"))?;
            }
            self.say("B) Back")?;

            let Some(choice) = self.ask(": ")? else {
                return Ok(None);
            };
            let choice = choice.to_lowercase();
            if choice.starts_with('b') {
                return Ok(None);
            }
            if let Some(idx) = parse_choice(&choice, count) {
                return Ok(Some(idx));
            }
        }
    }

    pub fn main_menu(&mut self, name: &str) -> io::Result<MainChoice> {
        loop {
            self.clear()?;
            self.say(&format!("Welcome, {name}!"))?;
            self.say("P) Play")?;
            self.say("R) Leaderboard")?;
            self.say("L) Logout")?;
            self.say("Q) Quit")?;

            let Some(choice) = self.ask("Choose mode (P/R/L/Q): ")? else {
                return Ok(MainChoice::Quit);
            };
            match choice.to_lowercase().chars().next() {
                Some('p') => return Ok(MainChoice::Play),
                Some('r') => return Ok(MainChoice::Leaderboard),
                Some('l') => return Ok(MainChoice::Logout),
                Some('q') => return Ok(MainChoice::Quit),
                _ => self.notice("Invalid input.")?,
            }
        }
    }

    /// Pick a maze and show its ranking, until the player backs out.
    pub fn leaderboard_screen(&mut self, maze_count: usize, store: &ProfileStore) -> io::Result<()> {
        if maze_count == 0 {
            self.clear()?;
            self.say("No mazes available.")?;
            return self.pause("Press Enter...");
        }
        while let Some(idx) = self.select_maze("Select maze for leaderboard:", maze_count)? {
            self.clear()?;
            match leaderboard::rank_store(store, idx) {
                Ok(entries) => {
                    let table = renderer::format_leaderboard(idx, &entries);
                    write!(self.out, "{table}")?;
                }
                Err(e) => {
                    warn!("leaderboard read failed: {e}");
                    self.say(&format!("Could not read records: {e}"))?;
                }
            }
            self.pause("Press Enter to continue...")?;
        }
        Ok(())
    }
}

/// 1-based menu number → 0-based index, if in range.
fn parse_choice(choice: &str, count: usize) -> Option<usize> {
    let n: usize = choice.parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::without_pauses(Cursor::new(script.as_bytes().to_vec()), vec![])
    }

    fn output(c: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&c.into_output()).into_owned()
    }

    #[test]
    fn parse_choice_bounds() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice("3", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("x", 3), None);
    }

    #[test]
    fn select_maze_reprompts_until_valid() {
        let mut c = console("9\nfoo\n2\n");
        assert_eq!(c.select_maze("Select a maze:", 2).unwrap(), Some(1));
        assert_eq!(output(c).matches("Select a maze:").count(), 3);
    }

    #[test]
    fn select_maze_back_and_eof() {
        assert_eq!(console("B\n").select_maze("t", 2).unwrap(), None);
        assert_eq!(console("").select_maze("t", 2).unwrap(), None);
    }

    #[test]
    fn main_menu_choices() {
        assert_eq!(console("play\n").main_menu("ann").unwrap(), MainChoice::Play);
        assert_eq!(console("?\nr\n").main_menu("ann").unwrap(), MainChoice::Leaderboard);
        assert_eq!(console("L\n").main_menu("ann").unwrap(), MainChoice::Logout);
        assert_eq!(console("").main_menu("ann").unwrap(), MainChoice::Quit);
    }

    #[test]
    fn leaderboard_screen_shows_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.txt");
        std::fs::write(&path, "ann;p;1;maze1:3.5\nbob;p;1;maze1:2.25\n").unwrap();
        let store = ProfileStore::new(path);

        let mut c = console("2\n\nb\n");
        c.leaderboard_screen(2, &store).unwrap();
        let text = output(c);
        assert!(text.contains("Leaderboard for Maze 2"));
        let bob = text.find("bob").unwrap();
        let ann = text.find("ann").unwrap();
        assert!(bob < ann);
    }

    #[test]
    fn leaderboard_screen_without_mazes() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profiles.txt"));
        let mut c = console("\n");
        c.leaderboard_screen(0, &store).unwrap();
        assert!(output(c).contains("No mazes available."));
    }
}
