//! termaze: steer a marker through ASCII mazes against the clock.
//!
//! Layers, leaf-first:
//! - `domain`: maze grid, tiles, movement rules (pure)
//! - `store`: flat-file profiles, timing history, leaderboards
//! - `sim`: maze loading, the per-maze run loop, session chaining
//! - `ui`: key reader, renderer, line-based menus
//! - `app`: the auth → main menu → session flow the binary runs

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod sim;
pub mod store;
pub mod ui;
