/// Single-keystroke reader.
///
/// Two input models behind one trait:
///   - `PollingKeyReader`: raw mode for the duration of the call, poll with a
///     short timeout, read one key if there is one. Keeps the render loop
///     responsive when the player pauses.
///   - `DirectKeyReader`: raw mode for the duration of the call, block until
///     one keystroke arrives.
///
/// The variant is chosen once at startup (`reader_for`). Shared game logic
/// only ever sees `dyn KeyReader`.
///
/// Raw mode is held by `RawModeGuard`, which puts the terminal back the way
/// it found it on every exit path, including `?` early returns and unwinds.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};

use crate::config::InputMode;

pub const ESC: char = '\u{1b}';
pub const CTRL_C: char = '\u{3}';
pub const ENTER: char = '\r';

pub trait KeyReader {
    /// One lowercased key, or `None` if nothing was pressed.
    fn read_key(&mut self) -> io::Result<Option<char>>;
}

// ── Raw mode scope ──

/// Enables raw mode on creation; restores the previous mode on drop.
pub struct RawModeGuard {
    was_raw: bool,
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        let was_raw = terminal::is_raw_mode_enabled()?;
        if !was_raw {
            terminal::enable_raw_mode()?;
        }
        Ok(RawModeGuard { was_raw })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.was_raw {
            if let Err(e) = terminal::disable_raw_mode() {
                warn!("could not restore terminal mode: {e}");
            }
        }
    }
}

// ── Model A: poll with timeout ──

pub struct PollingKeyReader {
    timeout: Duration,
}

impl PollingKeyReader {
    pub fn new(timeout: Duration) -> Self {
        PollingKeyReader { timeout }
    }
}

impl KeyReader for PollingKeyReader {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        let _raw = RawModeGuard::acquire()?;
        if !event::poll(self.timeout)? {
            return Ok(None);
        }
        Ok(decode(event::read()?))
    }
}

// ── Model B: direct blocking read ──

pub struct DirectKeyReader;

impl KeyReader for DirectKeyReader {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        let _raw = RawModeGuard::acquire()?;
        // Skip non-key events (resize, focus, key release) until a press arrives.
        loop {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => return Ok(decode_key(k)),
                _ => {}
            }
        }
    }
}

/// Whether `mode` means the direct reader on this host.
/// `Auto` = direct read on Windows, polling elsewhere.
pub fn uses_direct_read(mode: InputMode) -> bool {
    match mode {
        InputMode::Direct => true,
        InputMode::Poll => false,
        InputMode::Auto => cfg!(windows),
    }
}

/// Pick the reader for this host.
pub fn reader_for(mode: InputMode, timeout: Duration) -> Box<dyn KeyReader> {
    let direct = uses_direct_read(mode);
    debug!("key reader: {}", if direct { "direct" } else { "poll" });
    if direct {
        Box::new(DirectKeyReader)
    } else {
        Box::new(PollingKeyReader::new(timeout))
    }
}

// ── Decoding ──

fn decode(ev: Event) -> Option<char> {
    match ev {
        Event::Key(k) if k.kind == KeyEventKind::Press => decode_key(k),
        _ => None,
    }
}

/// Map a key press to the character a raw terminal read would have produced.
pub fn decode_key(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL)
            && c.eq_ignore_ascii_case(&'c') => Some(CTRL_C),
        KeyCode::Char(c) => c.to_lowercase().next(),
        KeyCode::Esc => Some(ESC),
        KeyCode::Enter => Some(ENTER),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn forced_modes_pick_their_reader() {
        assert!(uses_direct_read(InputMode::Direct));
        assert!(!uses_direct_read(InputMode::Poll));
    }

    #[test]
    fn auto_mode_follows_host() {
        assert_eq!(uses_direct_read(InputMode::Auto), cfg!(windows));
    }

    #[test]
    fn letters_are_lowercased() {
        assert_eq!(decode_key(press(KeyCode::Char('W'), KeyModifiers::SHIFT)), Some('w'));
        assert_eq!(decode_key(press(KeyCode::Char('d'), KeyModifiers::NONE)), Some('d'));
    }

    #[test]
    fn control_keys_map_to_raw_bytes() {
        assert_eq!(decode_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(CTRL_C));
        assert_eq!(decode_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(ESC));
        assert_eq!(decode_key(press(KeyCode::Enter, KeyModifiers::NONE)), Some(ENTER));
    }

    #[test]
    fn other_keys_are_nothing() {
        assert_eq!(decode_key(press(KeyCode::Up, KeyModifiers::NONE)), None);
        assert_eq!(decode_key(press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut k = press(KeyCode::Char('w'), KeyModifiers::NONE);
        k.kind = KeyEventKind::Release;
        assert_eq!(decode(Event::Key(k)), None);
        assert_eq!(decode(Event::FocusGained), None);
    }
}
