//! Terminal snake.
//!
//! [`game`] holds the rules and is usable on its own; [`app`] and [`term`] put
//! it on a crossterm screen.

pub mod app;
pub mod consts;
pub mod game;
pub mod rng;
pub mod snake;
pub mod term;

pub use game::{AppleState, Game, Snapshot, Status};
pub use rng::{AppleSource, RandomApples};
pub use snake::{Cell, Direction, MoveResult, Snake};
