/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
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

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Heading of the snake, split into the direction applied this tick and the
/// direction requested for the next one.
///
/// Input events only ever write `pending`; the tick consumes it exactly once
/// via `commit`. Validating requests against `current` (not `pending`) is
/// what prevents a 180-degree reversal within a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionState {
    current: Direction,
    pending: Direction,
}

impl DirectionState {
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            pending: initial,
        }
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    /// Request a turn. Ignored if it would reverse the committed direction.
    /// The last accepted request before the next tick wins.
    pub fn request(&mut self, requested: Direction) {
        if !self.current.is_opposite(requested) {
            self.pending = requested;
        }
    }

    /// Apply the pending direction for this tick and return it.
    pub fn commit(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }
}
