use std::time::Duration;

use super::direction::Direction;
use super::grid::Cell;
use super::state::GameOverReason;

/// Notifications emitted by the engine for rendering and sound collaborators.
///
/// Events queue up inside the engine and are drained by the host loop.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    DirectionChanged(Direction),
    FoodEaten {
        cell: Cell,
        /// Pixel coordinates of the cell centre
        pixel: (f32, f32),
        score: u32,
    },
    SpeedChanged {
        level: u8,
        interval: Duration,
    },
    GameOver {
        reason: GameOverReason,
        final_score: u32,
        new_high_score: bool,
    },
}
