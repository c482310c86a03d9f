/// Direction the snake is moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// At rest, before the first move of a session
    #[default]
    None,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn is_none(&self) -> bool {
        *self == Direction::None
    }
}

/// Holds the current direction and filters illegal changes.
///
/// A change is accepted only when it switches the axis of motion, or when it
/// is the first direction taken from rest. Rejected requests are no-ops; they
/// are frequent under key repeat and are not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionController {
    current: Direction,
}

impl DirectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    /// Apply a direction request, returning whether it was accepted.
    ///
    /// The latest accepted request between two ticks wins.
    pub fn request(&mut self, requested: Direction) -> bool {
        if requested.is_none() {
            return false;
        }

        if self.current.is_opposite(requested) {
            return false;
        }

        // Same axis as the current motion (also covers repeating the current direction)
        if (self.current.is_horizontal() && requested.is_horizontal())
            || (self.current.is_vertical() && requested.is_vertical())
        {
            return false;
        }

        self.current = requested;
        true
    }

    /// Set the direction unconditionally (used when a session starts from rest)
    pub fn force(&mut self, direction: Direction) {
        self.current = direction;
    }

    pub fn reset(&mut self) {
        self.current = Direction::None;
    }
}
