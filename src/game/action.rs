use super::direction::Direction;

/// Discrete command delivered to the engine by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request a change of direction
    Turn(Direction),
    /// Start a new run (resets first when the previous run is over)
    Start,
    /// Pause a running game or resume a paused one
    TogglePause,
    /// Start when idle or over, otherwise toggle pause
    StartOrPause,
    /// Return to the idle state with a fresh session
    Reset,
    /// Select a speed level manually
    SetSpeed(u8),
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Turn(direction)
    }
}
