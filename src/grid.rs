use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }
}

/// Boundary behavior of the play field.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallMode {
    /// Solid border; leaving the grid ends the game.
    #[default]
    Bounded,
    /// Toroidal field; leaving one edge enters the opposite one.
    Open,
}

impl WallMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Bounded => Self::Open,
            Self::Open => Self::Bounded,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bounded => "Walls",
            Self::Open => "Open",
        }
    }
}

/// Where a candidate head ends up after the boundary rules are applied.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveResolution {
    Inside(Position),
    OutOfBounds,
}

/// Geometry and collision rules for one session's grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridWorld {
    size: GridSize,
}

impl GridWorld {
    /// Zero-sized axes are widened to one cell.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size: GridSize {
                width: size.width.max(1),
                height: size.height.max(1),
            },
        }
    }

    #[must_use]
    pub fn dimensions(self) -> GridSize {
        self.size
    }

    /// Applies the boundary rules of `wall_mode` to a freshly moved head.
    #[must_use]
    pub fn classify_move(self, head: Position, wall_mode: WallMode) -> MoveResolution {
        match wall_mode {
            WallMode::Bounded if head.is_within_bounds(self.size) => MoveResolution::Inside(head),
            WallMode::Bounded => MoveResolution::OutOfBounds,
            WallMode::Open => MoveResolution::Inside(head.wrapped(self.size)),
        }
    }

    /// Returns true if `head` lands on any of the given body segments.
    ///
    /// Callers pass the body without the current head.
    #[must_use]
    pub fn is_self_collision<'a, I>(head: Position, body: I) -> bool
    where
        I: IntoIterator<Item = &'a Position>,
    {
        body.into_iter().any(|segment| *segment == head)
    }

    /// Picks a uniformly random free cell, or `None` when every cell is taken.
    ///
    /// Walls sit outside the grid, so both wall modes share the same
    /// playable area.
    #[must_use]
    pub fn place_food<R, F>(
        self,
        rng: &mut R,
        is_occupied: F,
        _wall_mode: WallMode,
    ) -> Option<Position>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let mut candidates = Vec::with_capacity(self.size.total_cells());

        for y in 0..i32::from(self.size.height) {
            for x in 0..i32::from(self.size.width) {
                let position = Position { x, y };
                if !is_occupied(position) {
                    candidates.push(position);
                }
            }
        }

        if candidates.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..candidates.len());
        Some(candidates[index])
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{GridWorld, MoveResolution, Position, WallMode};

    fn world(width: u16, height: u16) -> GridWorld {
        GridWorld::new(GridSize { width, height })
    }

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert_eq!(Position::new(-1, 3).wrapped(bounds), Position::new(9, 3));
        assert_eq!(Position::new(4, 8).wrapped(bounds), Position::new(4, 0));
        assert_eq!(Position::new(-11, -9).wrapped(bounds), Position::new(9, 7));
    }

    #[test]
    fn open_mode_wraps_every_edge() {
        let world = world(20, 20);

        let cases = [
            (Position::new(0, 5), Direction::Left, Position::new(19, 5)),
            (Position::new(19, 5), Direction::Right, Position::new(0, 5)),
            (Position::new(7, 0), Direction::Up, Position::new(7, 19)),
            (Position::new(7, 19), Direction::Down, Position::new(7, 0)),
        ];

        for (head, direction, expected) in cases {
            assert_eq!(
                world.classify_move(head.step(direction), WallMode::Open),
                MoveResolution::Inside(expected),
            );
        }
    }

    #[test]
    fn bounded_mode_rejects_cells_past_the_border() {
        let world = world(20, 20);

        for outside in [
            Position::new(-1, 4),
            Position::new(20, 4),
            Position::new(4, -1),
            Position::new(4, 20),
        ] {
            assert_eq!(
                world.classify_move(outside, WallMode::Bounded),
                MoveResolution::OutOfBounds
            );
        }

        assert_eq!(
            world.classify_move(Position::new(19, 0), WallMode::Bounded),
            MoveResolution::Inside(Position::new(19, 0))
        );
    }

    #[test]
    fn self_collision_checks_only_given_segments() {
        let body = [Position::new(1, 1), Position::new(2, 1)];

        assert!(GridWorld::is_self_collision(Position::new(2, 1), &body));
        assert!(!GridWorld::is_self_collision(Position::new(3, 1), &body));

        let no_body: [Position; 0] = [];
        assert!(!GridWorld::is_self_collision(Position::new(3, 1), &no_body));
    }

    #[test]
    fn food_is_never_placed_on_an_occupied_cell() {
        let world = world(8, 6);
        let mut rng = StdRng::seed_from_u64(7);
        let taken = [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)];

        for _ in 0..100 {
            let food = world
                .place_food(&mut rng, |cell| taken.contains(&cell), WallMode::Bounded)
                .expect("board has free cells");
            assert!(!taken.contains(&food));
            assert!(food.is_within_bounds(world.dimensions()));
        }
    }

    #[test]
    fn food_placement_finds_the_last_free_cell() {
        let world = world(3, 1);
        let mut rng = StdRng::seed_from_u64(1);

        let food = world.place_food(&mut rng, |cell| cell.x != 2, WallMode::Open);

        assert_eq!(food, Some(Position::new(2, 0)));
    }

    #[test]
    fn full_board_yields_no_food_instead_of_spinning() {
        let world = world(4, 4);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(world.place_food(&mut rng, |_| true, WallMode::Bounded), None);
    }

    #[test]
    fn zero_sized_axes_become_one_cell() {
        let grid = world(0, 5);

        assert_eq!(grid.dimensions(), GridSize { width: 1, height: 5 });
        assert_eq!(
            grid.classify_move(Position::new(-1, 2), WallMode::Open),
            MoveResolution::Inside(Position::new(0, 2))
        );
    }
}
