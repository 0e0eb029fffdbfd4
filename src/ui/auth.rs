/// Register / login / guest screen.
///
/// Credentials go straight to `ProfileStore`, which stores and compares
/// them verbatim.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::error::StoreError;
use crate::sim::session::Identity;
use crate::store::profiles::ProfileStore;
use crate::ui::menu::Console;

/// Loop until the player picks an identity. `None` means quit.
pub fn auth_screen<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &ProfileStore,
) -> io::Result<Option<Identity>> {
    loop {
        console.clear()?;
        console.say("REGISTER (R)")?;
        console.say("LOGIN (L)")?;
        console.say("PLAY AS GUEST (G)")?;
        console.say("QUIT (Q)")?;

        let Some(action) = console.ask(": ")? else {
            return Ok(None);
        };
        match action.to_lowercase().chars().next() {
            Some('r') => {
                if let Some(name) = register(console, store)? {
                    return Ok(Some(Identity::User(name)));
                }
            }
            Some('l') => {
                if let Some(name) = login(console, store)? {
                    return Ok(Some(Identity::User(name)));
                }
            }
            Some('g') => return Ok(Some(Identity::Guest)),
            Some('q') => return Ok(None),
            _ => console.notice("Invalid choice.")?,
        }
    }
}

fn login<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &ProfileStore,
) -> io::Result<Option<String>> {
    console.clear()?;
    console.say("LOGIN")?;
    let Some(username) = console.ask("Username: ")? else {
        return Ok(None);
    };
    let Some(password) = console.ask("Password: ")? else {
        return Ok(None);
    };

    let ok = store.authenticate(&username, &password).unwrap_or_else(|e| {
        warn!("profile store unreadable during login: {e}");
        false
    });
    if ok {
        console.notice("Login successful!")?;
        Ok(Some(username))
    } else {
        console.notice("Wrong username or password.")?;
        Ok(None)
    }
}

/// Keep asking until a name is registered; `None` only at end of input.
fn register<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &ProfileStore,
) -> io::Result<Option<String>> {
    loop {
        console.clear()?;
        console.say("REGISTER NEW ACCOUNT")?;
        let Some(username) = console.ask("Choose username: ")? else {
            return Ok(None);
        };
        if username.is_empty() {
            continue;
        }
        match store.find(&username) {
            Ok(Some(_)) => {
                console.notice("Username already taken.")?;
                continue;
            }
            Ok(None) => {}
            Err(e) => warn!("profile store unreadable during register: {e}"),
        }

        let Some(password) = console.ask("Choose password: ")? else {
            return Ok(None);
        };
        if password.is_empty() {
            continue;
        }

        match store.register(&username, &password) {
            Ok(()) => {
                console.notice("Registered successfully!")?;
                return Ok(Some(username));
            }
            Err(StoreError::UsernameTaken(_)) => console.notice("Username already taken.")?,
            Err(e @ StoreError::InvalidField { .. }) => console.notice(&format!("Invalid input: {e}"))?,
            Err(e) => {
                warn!("register failed: {e}");
                console.notice(&format!("Could not save account: {e}"))?;
                return Ok(None);
            }
        }
    }
}
