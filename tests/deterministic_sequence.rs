use neon_snake::config::GameConfig;
use neon_snake::food::Food;
use neon_snake::game::{DeathReason, GameState, GameStatus, TickOutcome};
use neon_snake::grid::WallMode;
use neon_snake::input::Direction;
use neon_snake::snake::{Position, Snake};

fn started(wall_mode: WallMode, seed: u64) -> GameState {
    let mut state = GameState::new_with_seed(GameConfig::default(), wall_mode, 100, seed);
    state.start();
    state
}

#[test]
fn two_ticks_right_reach_food_on_bounded_grid() {
    let mut state = started(WallMode::Bounded, 42);
    state.snake = Snake::new(Position::new(3, 3), Direction::Right);
    state.food = Some(Food::new(Position::new(5, 3)));

    assert_eq!(state.tick(), TickOutcome::Continued);
    assert_eq!(state.tick(), TickOutcome::AteFood);

    assert_eq!(state.snake.head(), Position::new(5, 3));
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 2);
    let food = state.food.expect("food respawns after eating");
    assert!(!state.snake.occupies(food.position));
}

#[test]
fn open_grid_wraps_left_edge() {
    let mut state = started(WallMode::Open, 7);
    state.snake = Snake::new(Position::new(0, 5), Direction::Left);
    state.food = Some(Food::new(Position::new(10, 10)));

    assert_eq!(state.tick(), TickOutcome::Continued);
    assert_eq!(state.snake.head(), Position::new(19, 5));
}

#[test]
fn stepwise_food_collection_turn_and_wall_collision() {
    let mut state = started(WallMode::Bounded, 3);
    state.snake = Snake::new(Position::new(1, 1), Direction::Right);
    state.food = Some(Food::new(Position::new(2, 1)));

    assert_eq!(state.tick(), TickOutcome::AteFood);
    assert_eq!(state.snake.len(), 2);

    // Reversal is ignored; the turn up is taken.
    state.set_direction(Direction::Left);
    state.set_direction(Direction::Up);
    state.food = Some(Food::new(Position::new(15, 15)));

    assert_eq!(state.tick(), TickOutcome::Continued);
    assert_eq!(state.snake.head(), Position::new(2, 0));
    assert_eq!(state.status, GameStatus::Running);

    assert_eq!(state.tick(), TickOutcome::Collided);
    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.death_reason, Some(DeathReason::WallCollision));

    state.reset(WallMode::Bounded, 150);
    assert_eq!(state.status, GameStatus::Ready);
    assert_eq!(state.speed_ms, 150);
}

#[test]
fn queued_reversal_never_applies_across_many_inputs() {
    let mut state = started(WallMode::Open, 11);
    let pattern = [
        Direction::Left,
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    for (step, direction) in pattern.iter().cycle().take(300).enumerate() {
        if state.is_over() {
            break;
        }
        let previous = state.snake.direction();

        state.set_direction(*direction);
        if step % 2 == 0 {
            state.set_direction(previous.opposite());
        }
        state.tick();

        assert_ne!(state.snake.direction(), previous.opposite());
    }
}

#[test]
fn full_board_ends_with_a_win() {
    let config = GameConfig::with_grid(2, 2);
    let mut state = GameState::new_with_seed(config, WallMode::Bounded, 100, 1);
    state.start();
    state.snake = Snake::from_segments(
        vec![Position::new(0, 1), Position::new(0, 0), Position::new(1, 0)],
        Direction::Down,
    )
    .expect("test snake has segments");
    state.set_direction(Direction::Right);
    state.food = Some(Food::new(Position::new(1, 1)));

    assert_eq!(state.tick(), TickOutcome::BoardFull);
    assert_eq!(state.status, GameStatus::Won);
    assert!(state.food.is_none());
    assert_eq!(state.snake.len(), 4);
}
