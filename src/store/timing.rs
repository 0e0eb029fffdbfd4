/// Per-user timing history, encoded in one field of a profile line.
///
/// ## Field format:
///   `maze0:12.345,maze3:8.1`
///
/// Comma-separated `maze<index>:<seconds>` tokens, no trailing comma.
/// Order is preserved: an upsert replaces a token in place or appends a
/// new one at the end, so untouched entries keep their position.

use log::warn;

const TOKEN_PREFIX: &str = "maze";

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TimingEntry {
    pub maze: usize,
    pub seconds: f64,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct TimingLog {
    entries: Vec<TimingEntry>,
}

impl TimingLog {
    pub fn new() -> Self {
        TimingLog::default()
    }

    /// Decode a timing field. Malformed tokens are dropped with a warning.
    /// A maze listed twice keeps its first slot and its last time.
    pub fn parse(field: &str) -> Self {
        let mut log = TimingLog::new();
        for token in field.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let Some(entry) = parse_token(token) else {
                warn!("skipping malformed timing token {:?}", token);
                continue;
            };
            match log.entries.iter_mut().find(|e| e.maze == entry.maze) {
                Some(existing) => existing.seconds = entry.seconds,
                None => log.entries.push(entry),
            }
        }
        log
    }

    pub fn encode(&self) -> String {
        self.entries.iter()
            .map(|e| format!("{}{}:{}", TOKEN_PREFIX, e.maze, e.seconds))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn get(&self, maze: usize) -> Option<f64> {
        self.entries.iter().find(|e| e.maze == maze).map(|e| e.seconds)
    }

    /// Replace the time for `maze`, or append it if there is none.
    /// Never compares against the previous value.
    pub fn upsert(&mut self, maze: usize, seconds: f64) {
        let seconds = round_millis(seconds);
        match self.entries.iter_mut().find(|e| e.maze == maze) {
            Some(entry) => entry.seconds = seconds,
            None => self.entries.push(TimingEntry { maze, seconds }),
        }
    }

    pub fn entries(&self) -> &[TimingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_token(token: &str) -> Option<TimingEntry> {
    let (key, value) = token.split_once(':')?;
    let maze = key.strip_prefix(TOKEN_PREFIX)?.parse().ok()?;
    let seconds: f64 = value.trim().parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(TimingEntry { maze, seconds })
}

/// Stored precision is milliseconds; negative input clamps to zero.
fn round_millis(seconds: f64) -> f64 {
    (seconds.max(0.0) * 1000.0).round() / 1000.0
}
