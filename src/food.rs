use rand::Rng;

use crate::grid::{GridWorld, WallMode};
use crate::snake::{Position, Snake};

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food on a cell the snake does not cover.
    ///
    /// Returns `None` when the snake fills the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        world: GridWorld,
        snake: &Snake,
        wall_mode: WallMode,
    ) -> Option<Self> {
        world
            .place_food(rng, |cell| snake.occupies(cell), wall_mode)
            .map(Self::new)
    }
}
