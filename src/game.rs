use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{
    GameConfig, GridSize, MIN_TICK_INTERVAL_MS, SPEED_STEP_PER_POINT_MS, START_HEAD, START_LENGTH,
    START_TICK_INTERVAL_MS,
};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    NotStarted,
    Running,
    GameOver,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Result of one simulation step, used by the presentation layer to decide
/// what to redraw and whether the game just ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed.
    Idle,
    Moved,
    Ate { score: u32 },
    GameOver { score: u32, reason: GameOverReason },
}

/// The complete Snake simulation for one window.
///
/// Holds no rendering state: callers read the snake, food and counters after
/// each tick and draw them however they like.
#[derive(Debug, Clone)]
pub struct GameSimulation {
    pub snake: Snake,
    pub food: Food,
    score: u32,
    speed_ms: u64,
    status: GameStatus,
    game_over_reason: Option<GameOverReason>,
    grid: GridSize,
    wall_death: bool,
    rng: StdRng,
}

impl GameSimulation {
    /// Creates a simulation seeded from system entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic simulation for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let snake = starting_snake(config.grid);
        let food = Food::spawn(&mut rng, config.grid, &snake)
            .unwrap_or_else(|| Food::new(Position::new(0, 0)));

        Self {
            snake,
            food,
            score: 0,
            speed_ms: START_TICK_INTERVAL_MS,
            status: GameStatus::NotStarted,
            game_over_reason: None,
            grid: config.grid,
            wall_death: config.wall_death,
            rng,
        }
    }

    /// Resets every per-game value and starts running on `grid`.
    pub fn start_new_game(&mut self, grid: GridSize) {
        self.grid = grid;
        self.snake = starting_snake(grid);
        self.score = 0;
        self.speed_ms = START_TICK_INTERVAL_MS;
        self.game_over_reason = None;

        match Food::spawn(&mut self.rng, grid, &self.snake) {
            Some(food) => {
                self.food = food;
                self.status = GameStatus::Running;
            }
            None => {
                let _ = self.end_game(GameOverReason::BoardFilled);
            }
        }
    }

    /// Requests a turn. Reversals and input outside a running game are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.snake.buffer_direction(direction);
        }
    }

    /// Advances the simulation by one cell.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        let head = self.snake.move_forward(self.grid, !self.wall_death);

        if head == self.food.position {
            return self.eat_food();
        }

        if self.wall_death && !head.is_within_bounds(self.grid) {
            return self.end_game(GameOverReason::WallCollision);
        }

        if self.snake.head_overlaps_body() {
            return self.end_game(GameOverReason::SelfCollision);
        }

        TickOutcome::Moved
    }

    fn eat_food(&mut self) -> TickOutcome {
        self.snake.grow();
        self.score += 1;
        self.speed_ms = next_speed_ms(self.speed_ms, self.score);

        match Food::spawn(&mut self.rng, self.grid, &self.snake) {
            Some(food) => {
                self.food = food;
                TickOutcome::Ate { score: self.score }
            }
            None => self.end_game(GameOverReason::BoardFilled),
        }
    }

    fn end_game(&mut self, reason: GameOverReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        TickOutcome::GameOver {
            score: self.score,
            reason,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current tick interval in milliseconds.
    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn wall_death(&self) -> bool {
        self.wall_death
    }
}

/// Interval after eating, where `score` already includes the food just eaten.
#[must_use]
pub fn next_speed_ms(current_ms: u64, score: u32) -> u64 {
    current_ms
        .saturating_sub(u64::from(score) * SPEED_STEP_PER_POINT_MS)
        .max(MIN_TICK_INTERVAL_MS)
}

// Shortened and shifted as needed so every segment lies on small grids.
fn starting_snake(grid: GridSize) -> Snake {
    let width = i32::from(grid.width.max(1));
    let height = i32::from(grid.height.max(1));
    let length = START_LENGTH.min(usize::from(grid.width.max(1)));
    let min_head_x = i32::try_from(length).unwrap_or(width) - 1;

    let head = Position::new(
        START_HEAD.0.clamp(min_head_x, width - 1),
        START_HEAD.1.min(height - 1),
    );
    Snake::new(head, Direction::Right, length)
}
