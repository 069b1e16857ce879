//! Core game logic for arcade snake
//!
//! Everything in here is I/O-free: no terminal, no clock reads, no files.
//! The session is advanced by explicit calls and handed `Instant`s by the
//! caller, which is what makes the timer behaviour unit-testable.

pub mod config;
pub mod direction;
pub mod food;
pub mod grid;
pub mod score;
pub mod session;
pub mod snake;
pub mod speed;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use food::{Pickup, SpecialFood};
pub use grid::{Grid, Position};
pub use session::{GameSession, Phase, StepOutcome};
pub use snake::Snake;
