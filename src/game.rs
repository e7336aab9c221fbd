use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameConfig, GridSize, START_CELL};
use crate::food::Food;
use crate::grid::{GridWorld, MoveResolution, WallMode};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Freshly reset, waiting for the player to start.
    Ready,
    Running,
    Paused,
    GameOver,
    /// The snake covers every cell; there is nowhere left for food.
    Won,
}

/// What ended the last game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Result of one [`GameState::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Continued,
    AteFood,
    Collided,
    BoardFull,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub score: u32,
    pub level: u32,
    /// Milliseconds per tick; smaller is faster.
    pub speed_ms: u64,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    wall_mode: WallMode,
    boost: bool,
    config: GameConfig,
    world: GridWorld,
    rng: StdRng,
}

impl GameState {
    /// Creates a `Ready` state with an entropy-seeded food sequence.
    #[must_use]
    pub fn new(config: GameConfig, wall_mode: WallMode, speed_ms: u64) -> Self {
        Self::with_rng(config, wall_mode, speed_ms, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(
        config: GameConfig,
        wall_mode: WallMode,
        speed_ms: u64,
        seed: u64,
    ) -> Self {
        Self::with_rng(config, wall_mode, speed_ms, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, wall_mode: WallMode, speed_ms: u64, rng: StdRng) -> Self {
        let world = GridWorld::new(config.grid);
        let snake = Snake::new(start_position(world.dimensions()), Direction::Right);

        let mut state = Self {
            snake,
            food: None,
            score: 0,
            level: 1,
            speed_ms,
            tick_count: 0,
            status: GameStatus::Ready,
            death_reason: None,
            wall_mode,
            boost: false,
            config,
            world,
            rng,
        };
        state.reset(wall_mode, speed_ms);
        state
    }

    /// Returns to `Ready` with a one-cell snake heading right.
    ///
    /// A grid with no room for food beside the snake is already `Won`.
    pub fn reset(&mut self, wall_mode: WallMode, speed_ms: u64) {
        self.snake = Snake::new(start_position(self.world.dimensions()), Direction::Right);
        self.score = 0;
        self.level = 1;
        self.speed_ms = speed_ms;
        self.tick_count = 0;
        self.status = GameStatus::Ready;
        self.death_reason = None;
        self.wall_mode = wall_mode;
        self.boost = false;
        self.food = Food::spawn(&mut self.rng, self.world, &self.snake, self.wall_mode);
        if self.food.is_none() {
            self.status = GameStatus::Won;
        }
    }

    /// Leaves the start screen.
    pub fn start(&mut self) {
        if self.status == GameStatus::Ready {
            self.status = GameStatus::Running;
        }
    }

    /// Requests a heading for the next tick; reversals are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.is_over() {
            return;
        }
        self.snake.buffer_direction(direction);
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            other => other,
        };
        if self.status == GameStatus::Paused {
            self.boost = false;
        }
    }

    /// Switches boundary rules from the next tick on.
    ///
    /// The current snake is not re-checked; the next tick applies the new
    /// rules as usual.
    pub fn set_wall_mode(&mut self, wall_mode: WallMode) {
        self.wall_mode = wall_mode;
    }

    /// Holds or releases the boost. Ignored unless the game is running.
    pub fn set_boost(&mut self, active: bool) {
        if active && self.status != GameStatus::Running {
            return;
        }
        self.boost = active;
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Continued;
        }

        self.tick_count += 1;
        self.snake.commit_direction();

        let head = match self
            .world
            .classify_move(self.snake.next_head_position(), self.wall_mode)
        {
            MoveResolution::Inside(head) => head,
            MoveResolution::OutOfBounds => return self.end_game(DeathReason::WallCollision),
        };

        if GridWorld::is_self_collision(head, self.snake.body_without_head()) {
            return self.end_game(DeathReason::SelfCollision);
        }

        self.snake.push_head(head);

        if self.food.map(|food| food.position) != Some(head) {
            let _ = self.snake.pop_tail();
            return TickOutcome::Continued;
        }

        self.award_food();

        self.food = Food::spawn(&mut self.rng, self.world, &self.snake, self.wall_mode);
        if self.food.is_none() {
            self.status = GameStatus::Won;
            self.boost = false;
            info!(
                "board full after {} ticks: score {} level {}",
                self.tick_count, self.score, self.level
            );
            return TickOutcome::BoardFull;
        }

        TickOutcome::AteFood
    }

    /// Tick interval the driver should wait before the next tick.
    #[must_use]
    pub fn current_speed(&self) -> u64 {
        if !self.boost {
            return self.speed_ms;
        }

        self.speed_ms
            .checked_div(self.config.boost_divisor)
            .unwrap_or(self.speed_ms)
            .max(1)
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.world.dimensions()
    }

    #[must_use]
    pub fn wall_mode(&self) -> WallMode {
        self.wall_mode
    }

    #[must_use]
    pub fn is_boosting(&self) -> bool {
        self.boost
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True once a collision or a full board ended the game.
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::Won)
    }

    #[must_use]
    pub fn is_start_screen(&self) -> bool {
        self.status == GameStatus::Ready
    }

    fn award_food(&mut self) {
        let previous = self.score;
        self.score += self.config.points_per_food;

        let threshold = self.config.points_per_level;
        let levels_gained = if threshold == 0 {
            0
        } else {
            self.score / threshold - previous / threshold
        };

        for _ in 0..levels_gained {
            self.level += 1;
            self.speed_ms = self
                .speed_ms
                .saturating_sub(self.config.speed_step_ms)
                .max(self.config.min_speed_ms);
            debug!("level {} reached, tick interval {} ms", self.level, self.speed_ms);
        }
    }

    fn end_game(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        self.boost = false;
        info!(
            "game over ({reason:?}) after {} ticks: score {} level {}",
            self.tick_count, self.score, self.level
        );
        TickOutcome::Collided
    }
}

fn start_position(bounds: GridSize) -> Position {
    Position {
        x: START_CELL.0.min(i32::from(bounds.width) - 1),
        y: START_CELL.1.min(i32::from(bounds.height) - 1),
    }
}
