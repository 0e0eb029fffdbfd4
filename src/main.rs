/// Entry point: CLI parsing, logging, config, then the interactive app.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use termaze::app::App;
use termaze::config::GameConfig;
use termaze::sim::maze_store;
use termaze::store::leaderboard;
use termaze::store::profiles::ProfileStore;
use termaze::ui::input::reader_for;
use termaze::ui::menu::Console;
use termaze::ui::renderer;

#[derive(Parser)]
#[command(name = "termaze")]
#[command(about = "Race through ASCII mazes in the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: config.toml next to the binary or in CWD)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Maze definitions file
    #[arg(long, global = true)]
    mazes: Option<PathBuf>,

    /// User profiles file
    #[arg(long, global = true)]
    profiles: Option<PathBuf>,

    /// Verbose logging to stderr (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one maze's leaderboard and exit
    Leaderboard {
        /// Maze number as shown in the menus (1-based)
        maze: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = GameConfig::load(cli.config.as_deref());
    if let Some(path) = cli.mazes {
        config.mazes_file = path;
    }
    if let Some(path) = cli.profiles {
        config.profiles_file = path;
    }

    let store = ProfileStore::new(config.profiles_file.clone());
    let mazes = maze_store::load(&config.mazes_file)
        .with_context(|| "cannot start without a maze file")?;

    if let Some(Commands::Leaderboard { maze }) = cli.command {
        if maze == 0 || maze > mazes.len() {
            bail!("no maze {maze}; {} maze(s) loaded", mazes.len());
        }
        let entries = leaderboard::rank_store(&store, maze - 1)
            .with_context(|| format!("reading {}", store.path().display()))?;
        print!("{}", renderer::format_leaderboard(maze - 1, &entries));
        return Ok(());
    }

    let mut keys = reader_for(config.input.mode, config.input.poll_timeout);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let app = App {
        mazes: &mazes,
        store: &store,
        player_glyph: config.player_glyph,
    };
    app.run(&mut console, keys.as_mut()).context("game error")?;

    info!("bye");
    println!();
    println!("Thanks for playing termaze!");
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.target(env_logger::Target::Stderr);
    builder.init();
}
