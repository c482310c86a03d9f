//! Core game logic module for Snake
//!
//! Rules, state and timing live here; terminal input and rendering do not.
//! The only I/O is reading a config file and waiting on `tokio::time`.
//! The host loop feeds it commands and ticks, and drains [`GameEvent`]s for
//! rendering and sound.

pub mod action;
pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod events;
pub mod food;
pub mod grid;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use action::Command;
pub use clock::GameClock;
pub use config::GameConfig;
pub use direction::{Direction, DirectionController};
pub use engine::{GameEngine, TickOutcome};
pub use events::GameEvent;
pub use food::{FoodItem, FoodPlacer, FoodVariant};
pub use grid::{Cell, Grid};
pub use speed::SpeedLevel;
pub use state::{GameOverReason, GameStatus, Snake};
