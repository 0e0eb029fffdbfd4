/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD), or from an
/// explicit path given on the command line.
/// Falls back to sensible defaults if the file is missing or incomplete.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub mazes_file: PathBuf,
    pub profiles_file: PathBuf,
    pub input: InputConfig,
    pub player_glyph: char,
}

#[derive(Clone, Debug)]
pub struct InputConfig {
    pub mode: InputMode,
    pub poll_timeout: Duration,
}

/// Which key reader to use.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Auto,
    Poll,
    Direct,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    files: TomlFiles,
    #[serde(default)]
    input: TomlInput,
    #[serde(default)]
    display: TomlDisplay,
}

#[derive(Deserialize, Debug)]
struct TomlFiles {
    #[serde(default = "default_mazes")]
    mazes: String,
    #[serde(default = "default_profiles")]
    profiles: String,
}

#[derive(Deserialize, Debug)]
struct TomlInput {
    #[serde(default = "default_mode")]
    mode: InputMode,
    #[serde(default = "default_poll_timeout")]
    poll_timeout_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_player")]
    player: String,
}

// ── Defaults ──

fn default_mazes() -> String { "mazes.txt".into() }
fn default_profiles() -> String { "profiles.txt".into() }
fn default_mode() -> InputMode { InputMode::Auto }
fn default_poll_timeout() -> u64 { 100 }
fn default_player() -> String { "P".into() }

impl Default for TomlFiles {
    fn default() -> Self {
        TomlFiles {
            mazes: default_mazes(),
            profiles: default_profiles(),
        }
    }
}

impl Default for TomlInput {
    fn default() -> Self {
        TomlInput {
            mode: default_mode(),
            poll_timeout_ms: default_poll_timeout(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { player: default_player() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config. With `explicit`, only that file is read; otherwise
    /// `config.toml` is searched in (1) exe directory, (2) CWD.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = match explicit {
            Some(path) => read_toml(path).unwrap_or_default(),
            None => search_dirs.iter()
                .map(|d| d.join("config.toml"))
                .find(|p| p.exists())
                .and_then(|p| read_toml(&p))
                .unwrap_or_default(),
        };
        GameConfig::from_toml(toml_cfg, &search_dirs)
    }

    /// Parse config text directly (missing keys take defaults).
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        Ok(GameConfig::from_toml(toml::from_str(text)?, &[]))
    }

    fn from_toml(cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let player_glyph = cfg.display.player.chars().next().unwrap_or_else(|| {
            warn!("display.player is empty; using 'P'");
            'P'
        });
        let poll_timeout_ms = if cfg.input.poll_timeout_ms == 0 {
            warn!("input.poll_timeout_ms must be positive; using {}", default_poll_timeout());
            default_poll_timeout()
        } else {
            cfg.input.poll_timeout_ms
        };

        GameConfig {
            mazes_file: resolve_existing(&cfg.files.mazes, search_dirs),
            // Profiles are written, so they stay relative to CWD.
            profiles_file: PathBuf::from(&cfg.files.profiles),
            input: InputConfig {
                mode: cfg.input.mode,
                poll_timeout: Duration::from_millis(poll_timeout_ms),
            },
            player_glyph,
        }
    }
}

/// Absolute paths pass through; relative ones resolve against the first
/// candidate dir that contains them, else CWD.
fn resolve_existing(name: &str, search_dirs: &[PathBuf]) -> PathBuf {
    let path = PathBuf::from(name);
    if path.is_absolute() {
        return path;
    }
    search_dirs.iter()
        .map(|d| d.join(name))
        .find(|p| p.is_file())
        .unwrap_or(path)
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn read_toml(path: &Path) -> Option<TomlConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => match toml::from_str::<TomlConfig>(&text) {
            Ok(cfg) => {
                debug!("config loaded from {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                warn!("{} parse error: {e}; using default settings", path.display());
                None
            }
        },
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            None
        }
    }
}
