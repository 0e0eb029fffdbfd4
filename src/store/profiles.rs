/// Flat-file profile store: credentials and timing history for every user.
///
/// ## File format (`profiles.txt`):
///   One user per line: `username;password;flag;timingdata`
///   `timingdata` is a `TimingLog` field (see `timing.rs`).
///
/// Every mutation loads the whole file, edits it in memory and rewrites the
/// whole file. Single writer only: two processes saving at the same time
/// can lose one update (last write wins).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::StoreError;
use crate::store::timing::TimingLog;

const FIELD_SEP: char = ';';
const MIN_FIELDS: usize = 2;
const PLAYED_FLAG: &str = "1";

// ══════════════════════════════════════════════════════════════
// Public types
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub username: String,
    /// Stored and compared verbatim.
    pub password: String,
    pub flag: String,
    pub timings: TimingLog,
}

impl UserRecord {
    pub fn new(username: &str, password: &str) -> Self {
        UserRecord {
            username: username.to_string(),
            password: password.to_string(),
            flag: String::new(),
            timings: TimingLog::new(),
        }
    }
}

/// Repository over the profile file. Passed by reference to whoever needs it.
#[derive(Clone, Debug)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProfileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file means no users yet.
    pub fn load(&self) -> Result<Vec<UserRecord>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_records(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(vec![]),
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the whole file from `records`.
    pub fn write_all(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        std::fs::write(&self.path, serialize(records))?;
        Ok(())
    }

    pub fn find(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.load()?.into_iter().find(|r| r.username == username))
    }

    /// Add a fresh record at the end and rewrite the file.
    /// Fails if the name is taken or a field is unusable.
    pub fn register(&self, username: &str, password: &str) -> Result<(), StoreError> {
        validate_field("username", username)?;
        validate_field("password", password)?;

        let mut records = self.load()?;
        if records.iter().any(|r| r.username == username) {
            return Err(StoreError::UsernameTaken(username.to_string()));
        }

        records.push(UserRecord::new(username, password));
        self.write_all(&records)?;
        info!("registered user {}", username);
        Ok(())
    }

    /// Verbatim credential check. Unknown users simply fail.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        Ok(self.load()?
            .iter()
            .any(|r| r.username == username && r.password == password))
    }

    /// Upsert the time for `(username, maze)` and rewrite the file.
    /// A user without a record gets one with an empty password.
    pub fn save_time(&self, username: &str, maze: usize, seconds: f64) -> Result<(), StoreError> {
        let mut records = self.load()?;

        let idx = match records.iter().position(|r| r.username == username) {
            Some(i) => i,
            None => {
                debug!("no record for {}; creating one", username);
                records.push(UserRecord::new(username, ""));
                records.len() - 1
            }
        };

        let record = &mut records[idx];
        record.timings.upsert(maze, seconds);
        record.flag = PLAYED_FLAG.to_string();

        self.write_all(&records)?;
        info!("saved {:.3}s on maze {} for {}", seconds, maze, username);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// Serialization
// ══════════════════════════════════════════════════════════════

fn encode_record(r: &UserRecord) -> String {
    format!("{}{sep}{}{sep}{}{sep}{}",
        r.username, r.password, r.flag, r.timings.encode(), sep = FIELD_SEP)
}

fn serialize(records: &[UserRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 48);
    for r in records {
        out.push_str(&encode_record(r));
        out.push('\n');
    }
    out
}

// ══════════════════════════════════════════════════════════════
// Parsing
// ══════════════════════════════════════════════════════════════

/// Parse the store. Short lines are skipped; a repeated username keeps the
/// slot of its first line and the content of its last.
fn parse_records(content: &str) -> Vec<UserRecord> {
    let mut records: Vec<UserRecord> = vec![];

    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = match parse_record(line) {
            Some(r) => r,
            None => {
                debug!("skipping malformed profile line {}", n + 1);
                continue;
            }
        };
        match records.iter_mut().find(|r| r.username == record.username) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    records
}

fn parse_record(line: &str) -> Option<UserRecord> {
    let p: Vec<&str> = line.split(FIELD_SEP).collect();
    if p.len() < MIN_FIELDS {
        return None;
    }
    Some(UserRecord {
        username: p[0].to_string(),
        password: p[1].to_string(),
        flag: p.get(2).unwrap_or(&"").to_string(),
        timings: TimingLog::parse(p.get(3).unwrap_or(&"")),
    })
}

fn validate_field(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::InvalidField { field, reason: "must not be empty" });
    }
    if value.contains(|c: char| c == FIELD_SEP || c == '\n' || c == '\r') {
        return Err(StoreError::InvalidField { field, reason: "must not contain ';' or line breaks" });
    }
    Ok(())
}
