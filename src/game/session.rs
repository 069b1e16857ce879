use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::GameConfig;
use super::direction::{Direction, DirectionState};
use super::food::{FoodManager, Pickup, SpecialFood};
use super::grid::{Grid, Position};
use super::score::Scoring;
use super::snake::Snake;
use super::speed::SpeedController;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Pre-start, no ticking
    Idle,
    /// Ticking and elapsed-time timer active
    Running,
    /// Frozen, awaiting restart
    GameOver,
}

/// What one tick did, for the caller to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub pickup: Pickup,
    pub points_awarded: u32,
    /// The tick ended the game (wall or self collision)
    pub ended: bool,
    /// The tick interval changed and the loop must re-arm
    pub interval_changed: bool,
    /// Set when the final score beat the stored high score
    pub new_high_score: Option<u32>,
}

impl StepOutcome {
    fn noop() -> Self {
        Self {
            pickup: Pickup::None,
            points_awarded: 0,
            ended: false,
            interval_changed: false,
            new_high_score: None,
        }
    }
}

/// One game of snake: every piece of mutable game state in one place,
/// advanced by explicit `start`/`step`/`on_second` calls.
///
/// The session does no I/O and never reads the clock itself; callers pass
/// `now` in, which keeps every timer deterministic under test. Deadlines
/// (special-food expiry, boost revert) live on the owning state and are
/// surfaced through `next_wakeup`, so a superseded deadline simply ceases
/// to exist rather than needing cancellation.
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
    phase: Phase,
    snake: Snake,
    heading: DirectionState,
    food: FoodManager,
    scoring: Scoring,
    speed: SpeedController,
    elapsed_secs: u64,
    high_score: u32,
}

impl GameSession {
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        Self::with_rng(config, high_score, StdRng::from_entropy())
    }

    /// Construct with a caller-supplied RNG, for deterministic tests
    pub fn with_rng(config: GameConfig, high_score: u32, mut rng: StdRng) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let snake = Snake::new(grid.center());
        let food = FoodManager::new(&grid, &mut rng, &snake);
        let scoring = Scoring::new(&config);
        let speed = SpeedController::new(&config);

        Self {
            config,
            grid,
            rng,
            phase: Phase::Idle,
            snake,
            heading: DirectionState::new(Direction::Right),
            food,
            scoring,
            speed,
            elapsed_secs: 0,
            high_score,
        }
    }

    /// Begin (or restart) a game: Idle | GameOver -> Running.
    /// Re-initializes the snake, food, scoring, speed, and elapsed time.
    pub fn start(&mut self) {
        if self.phase == Phase::Running {
            return;
        }

        self.snake = Snake::new(self.grid.center());
        self.heading = DirectionState::new(Direction::Right);
        self.scoring = Scoring::new(&self.config);
        self.speed = SpeedController::new(&self.config);
        self.food = FoodManager::new(&self.grid, &mut self.rng, &self.snake);
        self.elapsed_secs = 0;
        self.phase = Phase::Running;
    }

    /// Advance the game by one tick
    pub fn step(&mut self, now: Instant) -> StepOutcome {
        if self.phase != Phase::Running {
            return StepOutcome::noop();
        }

        let direction = self.heading.commit();
        let next_head = self.snake.peek_next_head(direction);

        if !self.grid.in_bounds(next_head) || self.snake.collides_with(next_head) {
            return self.end_game();
        }

        let pickup = self.food.check_pickup(next_head);
        let mut interval_changed = false;

        let points_awarded = match pickup {
            Pickup::None => {
                self.scoring.on_no_food_tick();
                self.snake.advance(next_head, false);
                0
            }
            Pickup::Regular => {
                let points = self.scoring.on_food_eaten(Pickup::Regular);
                self.snake.advance(next_head, true);
                self.food.place_regular(&self.grid, &mut self.rng, &self.snake);
                points
            }
            Pickup::Special => {
                let points = self.scoring.on_food_eaten(Pickup::Special);
                self.snake.advance(next_head, true);
                self.food.clear_special();
                let before = self.speed.interval();
                self.speed.on_special_pickup(now);
                interval_changed = self.speed.interval() != before;
                points
            }
        };

        StepOutcome {
            pickup,
            points_awarded,
            ended: false,
            interval_changed,
            new_high_score: None,
        }
    }

    fn end_game(&mut self) -> StepOutcome {
        self.phase = Phase::GameOver;

        let new_high_score = if self.scoring.score() > self.high_score {
            self.high_score = self.scoring.score();
            Some(self.high_score)
        } else {
            None
        };

        StepOutcome {
            pickup: Pickup::None,
            points_awarded: 0,
            ended: true,
            interval_changed: false,
            new_high_score,
        }
    }

    /// One second of elapsed game time: drives special-food spawning and
    /// permanent speed escalation. Returns true if the tick interval changed.
    pub fn on_second(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.elapsed_secs += 1;

        if self.elapsed_secs % self.config.special_spawn_period_secs == 0 {
            self.food.spawn_special(
                &self.grid,
                &mut self.rng,
                &self.snake,
                now,
                self.config.special_dwell,
            );
        }

        if self.elapsed_secs % self.config.escalation_period_secs == 0 {
            let before = self.speed.interval();
            self.speed.on_elapsed_period();
            return self.speed.interval() != before;
        }

        false
    }

    /// Direction requests are accepted only while running; a request that
    /// reverses the committed direction is dropped inside DirectionState.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.phase == Phase::Running {
            self.heading.request(direction);
        }
    }

    /// Earliest pending deadline (special-food expiry or boost revert)
    pub fn next_wakeup(&self) -> Option<Instant> {
        if self.phase != Phase::Running {
            return None;
        }

        match (self.food.special_deadline(), self.speed.boost_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    /// Fire any deadline that has passed. Returns true if the tick interval
    /// changed (boost reverted).
    pub fn handle_due_timers(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.food.expire_special(now);
        self.speed.revert_boost_if_due(now)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tick_interval(&self) -> Duration {
        self.speed.interval()
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn multiplier(&self) -> u32 {
        self.scoring.multiplier()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn regular_food(&self) -> Position {
        self.food.regular()
    }

    pub fn special_food(&self) -> Option<SpecialFood> {
        self.food.special()
    }

    /// Elapsed game time as mm:ss for the HUD
    pub fn format_elapsed(&self) -> String {
        let minutes = self.elapsed_secs / 60;
        let seconds = self.elapsed_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    #[cfg(test)]
    pub(crate) fn place_regular_food_at(&mut self, pos: Position) {
        self.food = FoodManager::with_regular_at(pos);
    }
}
