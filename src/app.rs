/// Top-level flow: auth screen → main menu → sessions, until quit.

use std::io::{BufRead, Write};

use log::info;

use crate::domain::maze::Maze;
use crate::error::RunError;
use crate::sim::session::Session;
use crate::store::profiles::ProfileStore;
use crate::ui::auth::auth_screen;
use crate::ui::input::KeyReader;
use crate::ui::menu::{Console, MainChoice};

pub struct App<'a> {
    pub mazes: &'a [Maze],
    pub store: &'a ProfileStore,
    pub player_glyph: char,
}

impl<'a> App<'a> {
    /// Returns when the player quits (or input ends).
    pub fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        keys: &mut dyn KeyReader,
    ) -> Result<(), RunError> {
        while let Some(identity) = auth_screen(console, self.store)? {
            info!("session started for {identity}");
            loop {
                match console.main_menu(&identity.to_string())? {
                    MainChoice::Play => {
                        let session = Session {
                            mazes: self.mazes,
                            store: self.store,
                            identity: &identity,
                            player_glyph: self.player_glyph,
                        };
                        session.play(console, keys)?;
                    }
                    MainChoice::Leaderboard => {
                        console.leaderboard_screen(self.mazes.len(), self.store)?;
                    }
                    MainChoice::Logout => break,
                    MainChoice::Quit => return Ok(()),
                }
            }
        }
        Ok(())
    }
}
