/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Command sent from the input layer into the game controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Point the snake in a new direction (reversing is allowed)
    Turn(Direction),
    /// Leave PAUSE and start playing
    Start,
    /// Reset the game and immediately start a new round
    Replay,
    /// Pause a running game
    Pause,
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Turn(direction)
    }
}
