//! Snake on a fixed square grid, with a greedy autopilot.
//!
//! The simulation (`snek`, `morsel`, `autopilot`, `clock`, `game`) has no
//! terminal dependencies; `render` and `sound` are the terminal-side sinks.

pub mod autopilot;
pub mod clock;
pub mod game;
pub mod morsel;
pub mod render;
pub mod snek;
pub mod sound;
pub mod store;

pub use game::{Difficulty, Game, GameState, Session, SessionView};
pub use snek::{Direction, GridBounds, Pos};
