use std::time::Instant;

use rand::Rng;

use super::grid::{Grid, Position};
use super::snake::Snake;

/// What the snake's new head landed on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickup {
    None,
    Regular,
    Special,
}

/// A time-limited special food instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialFood {
    pub position: Position,
    pub expires_at: Instant,
}

/// Owns regular and special food placement and expiry.
///
/// Regular food is always present; special food is optional, at most one
/// live instance, and carries its own expiry deadline. Respawning special
/// food overwrites the previous instance wholesale, so a stale expiry can
/// never fire for a superseded spawn.
#[derive(Debug, Clone)]
pub struct FoodManager {
    regular: Position,
    special: Option<SpecialFood>,
}

impl FoodManager {
    /// Place the initial regular food, avoiding the snake
    pub fn new<R: Rng + ?Sized>(grid: &Grid, rng: &mut R, snake: &Snake) -> Self {
        Self {
            regular: sample_off_snake(grid, rng, snake),
            special: None,
        }
    }

    pub fn regular(&self) -> Position {
        self.regular
    }

    pub fn special(&self) -> Option<SpecialFood> {
        self.special
    }

    /// Resample the regular food onto a cell not occupied by the snake or
    /// by a live special food
    pub fn place_regular<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R, snake: &Snake) {
        let special_pos = self.special.map(|s| s.position);
        self.regular = loop {
            let candidate = sample_off_snake(grid, rng, snake);
            if Some(candidate) != special_pos {
                break candidate;
            }
        };
    }

    #[cfg(test)]
    pub(crate) fn with_regular_at(pos: Position) -> Self {
        Self {
            regular: pos,
            special: None,
        }
    }

    /// Spawn a special food off the snake and off the regular food,
    /// replacing any live instance and resetting its expiry.
    pub fn spawn_special<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        rng: &mut R,
        snake: &Snake,
        now: Instant,
        dwell: std::time::Duration,
    ) {
        let position = loop {
            let candidate = grid.random_position(rng);
            if !snake.collides_with(candidate) && candidate != self.regular {
                break candidate;
            }
        };

        self.special = Some(SpecialFood {
            position,
            expires_at: now + dwell,
        });
    }

    /// The deadline of the live special food, if any
    pub fn special_deadline(&self) -> Option<Instant> {
        self.special.map(|s| s.expires_at)
    }

    /// Clear the special food if its dwell time has elapsed.
    /// Returns true if something expired.
    pub fn expire_special(&mut self, now: Instant) -> bool {
        match self.special {
            Some(special) if now >= special.expires_at => {
                self.special = None;
                true
            }
            _ => false,
        }
    }

    /// Remove the special food (eaten or game reset)
    pub fn clear_special(&mut self) {
        self.special = None;
    }

    /// Check what the new head position lands on. Regular and special food
    /// never coincide, so at most one kind can match.
    pub fn check_pickup(&self, head: Position) -> Pickup {
        if head == self.regular {
            Pickup::Regular
        } else if self.special.map(|s| s.position) == Some(head) {
            Pickup::Special
        } else {
            Pickup::None
        }
    }
}

/// Rejection-sample a position not occupied by the snake. Expected O(1)
/// while the occupancy fraction stays small.
fn sample_off_snake<R: Rng + ?Sized>(grid: &Grid, rng: &mut R, snake: &Snake) -> Position {
    loop {
        let candidate = grid.random_position(rng);
        if !snake.collides_with(candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn long_snake() -> Snake {
        // Fill most of the top rows so rejection sampling actually rejects
        let mut snake = Snake::new(Position::new(0, 0));
        for x in 1..10 {
            snake.advance(Position::new(x, 0), true);
        }
        for x in (0..10).rev() {
            snake.advance(Position::new(x, 1), true);
        }
        snake
    }

    #[test]
    fn test_regular_food_never_on_snake() {
        let grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(7);
        let snake = long_snake();

        for seed in 0..50 {
            let mut rng2 = StdRng::seed_from_u64(seed);
            let food = FoodManager::new(&grid, &mut rng2, &snake);
            assert!(!snake.collides_with(food.regular()));
        }

        let mut food = FoodManager::new(&grid, &mut rng, &snake);
        for _ in 0..50 {
            food.place_regular(&grid, &mut rng, &snake);
            assert!(!snake.collides_with(food.regular()));
        }
    }

    #[test]
    fn test_special_food_avoids_snake_and_regular() {
        let grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(3);
        let snake = long_snake();
        let mut food = FoodManager::new(&grid, &mut rng, &snake);
        let now = Instant::now();

        for _ in 0..50 {
            food.spawn_special(&grid, &mut rng, &snake, now, Duration::from_secs(5));
            let special = food.special().unwrap();
            assert!(!snake.collides_with(special.position));
            assert_ne!(special.position, food.regular());
        }
    }

    #[test]
    fn test_special_food_expiry() {
        let grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::new(Position::new(5, 5));
        let mut food = FoodManager::new(&grid, &mut rng, &snake);

        let now = Instant::now();
        food.spawn_special(&grid, &mut rng, &snake, now, Duration::from_secs(5));

        assert!(!food.expire_special(now + Duration::from_secs(4)));
        assert!(food.special().is_some());

        assert!(food.expire_special(now + Duration::from_secs(5)));
        assert!(food.special().is_none());
        assert!(!food.expire_special(now + Duration::from_secs(6)));
    }

    #[test]
    fn test_respawn_replaces_expiry() {
        let grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(13);
        let snake = Snake::new(Position::new(5, 5));
        let mut food = FoodManager::new(&grid, &mut rng, &snake);

        let now = Instant::now();
        food.spawn_special(&grid, &mut rng, &snake, now, Duration::from_secs(5));
        let later = now + Duration::from_secs(4);
        food.spawn_special(&grid, &mut rng, &snake, later, Duration::from_secs(5));

        // The first instance's deadline no longer applies
        assert!(!food.expire_special(now + Duration::from_secs(5)));
        assert!(food.expire_special(later + Duration::from_secs(5)));
    }

    #[test]
    fn test_check_pickup() {
        let grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(17);
        let snake = Snake::new(Position::new(5, 5));
        let mut food = FoodManager::new(&grid, &mut rng, &snake);

        assert_eq!(food.check_pickup(food.regular()), Pickup::Regular);

        food.spawn_special(&grid, &mut rng, &snake, Instant::now(), Duration::from_secs(5));
        let special_pos = food.special().unwrap().position;
        assert_eq!(food.check_pickup(special_pos), Pickup::Special);

        let mut empty = None;
        for y in 0..10 {
            for x in 0..10 {
                let pos = Position::new(x, y);
                if pos != food.regular() && pos != special_pos && !snake.collides_with(pos) {
                    empty = Some(pos);
                }
            }
        }
        assert_eq!(food.check_pickup(empty.unwrap()), Pickup::None);
    }
}
