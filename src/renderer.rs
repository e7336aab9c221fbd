use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_BRICK, BORDER_OPEN, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
    GridSize, Theme,
};
use crate::game::{GameState, GameStatus};
use crate::grid::WallMode;
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{
    render_game_over_menu, render_pause_menu, render_start_menu, render_victory_menu,
};

/// Terminal columns per grid cell; keeps cells roughly square.
const CELL_COLUMNS: u16 = 2;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo<'_>) {
    let theme = hud_info.theme;
    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let play_area = board_rect(board_area, state.bounds());
    let block = Block::bordered().border_set(match state.wall_mode() {
        WallMode::Bounded => BORDER_BRICK,
        WallMode::Open => BORDER_OPEN,
    });
    let block = match state.wall_mode() {
        WallMode::Bounded => {
            block.border_style(Style::new().fg(theme.wall_fg).bg(theme.wall_bg))
        }
        WallMode::Open => block.border_style(Style::new().fg(theme.open_border_fg)),
    };

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);
    render_hud(frame, hud_area, state, hud_info);

    match state.status {
        GameStatus::Ready => render_start_menu(frame, play_area, state, hud_info),
        GameStatus::Paused => render_pause_menu(frame, play_area, theme),
        GameStatus::GameOver => render_game_over_menu(frame, play_area, state, hud_info),
        GameStatus::Won => render_victory_menu(frame, play_area, state, hud_info),
        GameStatus::Running => {}
    }
}

/// Centers a bordered board of `bounds` cells inside `area`, clipped to fit.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some(food) = state.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, state.bounds(), food.position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let last_index = state.snake.len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    for (index, segment) in state.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(state.snake.direction()),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else if index == last_index {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    use crate::config::{Difficulty, GameConfig, GridSize, THEME_NEON};
    use crate::food::Food;
    use crate::game::GameState;
    use crate::grid::WallMode;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};
    use crate::ui::hud::HudInfo;

    use super::{logical_to_terminal, render};

    fn draw(state: &GameState) -> Buffer {
        let mut terminal =
            Terminal::new(TestBackend::new(60, 28)).expect("test backend never fails");
        let info = HudInfo {
            high_score: 120,
            reference_high_score: 120,
            difficulty: Difficulty::Normal,
            theme: &THEME_NEON,
        };
        terminal
            .draw(|frame| render(frame, state, &info))
            .expect("drawing to the test backend succeeds");
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn cells_map_to_two_terminal_columns() {
        let inner = Rect::new(10, 5, 40, 20);
        let bounds = GridSize {
            width: 20,
            height: 20,
        };

        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(3, 4)),
            Some((16, 9))
        );
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(20, 0)), None);
    }

    #[test]
    fn running_frame_shows_snake_food_and_hud() {
        let config = GameConfig::default();
        let mut state = GameState::new_with_seed(config, WallMode::Bounded, 100, 1);
        state.start();
        state.snake = Snake::from_segments(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
        )
        .expect("test snake has segments");
        state.food = Some(Food::new(Position::new(10, 10)));

        let screen = text(&draw(&state));

        assert!(screen.contains("▶"));
        assert!(screen.contains("●"));
        assert!(screen.contains("120"));
    }

    #[test]
    fn start_screen_lists_difficulties() {
        let state = GameState::new_with_seed(GameConfig::default(), WallMode::Open, 100, 2);

        let screen = text(&draw(&state));

        assert!(screen.contains("SNAKE"));
        assert!(screen.contains("Normal"));
    }
}
