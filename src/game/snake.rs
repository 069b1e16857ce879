use super::direction::Direction;
use super::grid::Position;

/// The snake: ordered body segments with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// Create a snake of length 1 at the given position
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// The cell the head would move into, without mutating
    pub fn peek_next_head(&self, direction: Direction) -> Position {
        self.head().moved_in_direction(direction)
    }

    /// Check if a position lies on any current segment
    pub fn collides_with(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance the snake to `new_head`, growing by one segment if `grow`.
    ///
    /// The sole mutator. The caller validates `new_head` beforehand;
    /// collision with the body is the game-over trigger, not something
    /// this method prevents.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_starts_with_single_segment() {
        let snake = Snake::new(Position::new(5, 5));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let snake = Snake::new(Position::new(5, 5));
        let next = snake.peek_next_head(Direction::Right);
        assert_eq!(next, Position::new(6, 5));
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_advance_without_growth() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.advance(Position::new(6, 5), false);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.collides_with(Position::new(5, 5)));
    }

    #[test]
    fn test_advance_with_growth() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.advance(Position::new(6, 5), true);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(snake.collides_with(Position::new(5, 5)));
    }

    #[test]
    fn test_collision_detection() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.advance(Position::new(6, 5), true);
        snake.advance(Position::new(7, 5), true);

        assert!(snake.collides_with(Position::new(5, 5)));
        assert!(snake.collides_with(Position::new(7, 5)));
        assert!(!snake.collides_with(Position::new(10, 10)));
    }

    #[test]
    fn test_no_duplicate_segments_after_validated_advance() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.advance(Position::new(6, 5), true);
        snake.advance(Position::new(6, 6), true);

        let next = snake.peek_next_head(Direction::Left);
        assert!(!snake.collides_with(next));
        snake.advance(next, false);

        let mut seen = std::collections::HashSet::new();
        for &segment in snake.segments() {
            assert!(seen.insert(segment));
        }
    }
}
