use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{Difficulty, Theme};
use crate::game::{DeathReason, GameState};
use crate::grid::WallMode;
use crate::ui::hud::HudInfo;

const POPUP_WIDTH: u16 = 34;

/// Draws the start screen: high score, speed preset and wall mode.
pub fn render_start_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) {
    let theme = info.theme;
    let lines = vec![
        title_line("NEON SNAKE", theme),
        Line::from(""),
        Line::from(format!("High score: {}", info.high_score)),
        Line::from(""),
        difficulty_line(info.difficulty, theme),
        Line::from(format!("Walls: {}", wall_label(state))),
        Line::from(""),
        Line::from("[Enter] Start  [Q] Quit"),
        footer_line("[1/2/3] speed  [T] walls", theme),
    ];

    render_popup(frame, area, " start ", lines);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        title_line("PAUSED", theme),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " pause ", lines);
}

/// Draws the game-over screen with the final score and level.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) {
    let cause = match state.death_reason {
        Some(DeathReason::WallCollision) => "Cause: hit the wall",
        Some(DeathReason::SelfCollision) => "Cause: bit yourself",
        None => "",
    };
    let lines = final_lines("GAME OVER", cause, state, info);

    render_popup(frame, area, " game over ", lines);
}

/// Draws the screen shown when the snake fills the whole board.
pub fn render_victory_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) {
    let lines = final_lines("BOARD CLEARED", "No room left for food", state, info);

    render_popup(frame, area, " victory ", lines);
}

fn final_lines(
    title: &'static str,
    cause: &'static str,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Vec<Line<'static>> {
    let is_new_high = state.score > info.reference_high_score;

    vec![
        title_line(title, info.theme),
        Line::from(""),
        Line::from(format!("Score: {}   Level: {}", state.score, state.level)),
        Line::from(format!("High score: {}", info.high_score.max(state.score))),
        Line::from(cause),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter] Play again"),
        Line::from("[M] Main menu  [Q] Quit"),
    ]
}

fn title_line(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.menu_title)
            .add_modifier(Modifier::BOLD),
    ))
}

fn footer_line(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(theme.menu_footer)))
}

fn difficulty_line(selected: Difficulty, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw("Speed: ")];
    for (index, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if difficulty == selected {
            Style::default()
                .fg(theme.hud_accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.hud_muted)
        };
        spans.push(Span::styled(difficulty.label(), style));
    }
    Line::from(spans)
}

fn wall_label(state: &GameState) -> &'static str {
    match state.wall_mode() {
        WallMode::Bounded => "on",
        WallMode::Open => "off (wrap around)",
    }
}

fn render_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &'static str,
    lines: Vec<Line<'static>>,
) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered_popup(area, POPUP_WIDTH, height);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [mid] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::centered_popup;

    #[test]
    fn popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 40, 20);

        assert_eq!(centered_popup(area, 20, 10), Rect::new(10, 5, 20, 10));
        assert_eq!(centered_popup(area, 60, 30), area);
    }
}
