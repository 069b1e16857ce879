//! Arcade snake: a grid snake game with combo scoring, time-limited special
//! food, and speed escalation.
//!
//! The `game` module is the pure core; `app` wires it to a ratatui terminal
//! through the `input`, `render`, and `storage` modules.

pub mod app;
pub mod game;
pub mod input;
pub mod render;
pub mod storage;
