use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{Difficulty, Theme};
use crate::game::GameState;

const SEPARATOR: &str = " │ ";

/// Supplemental values displayed by the HUD and menus.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    /// High score as it stood when the current game started.
    pub reference_high_score: u32,
    /// Preset applied by the next start; shown on the start screen.
    pub difficulty: Difficulty,
    pub theme: &'a Theme,
}

/// Values shown in the status row, in display order.
struct Field {
    label: &'static str,
    compact_label: &'static str,
    value: String,
}

/// Renders the single status row under the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo<'_>) {
    let high_score = info.high_score.max(state.score);
    let fields = [
        Field {
            label: "Score",
            compact_label: "S",
            value: state.score.to_string(),
        },
        Field {
            label: "Hi",
            compact_label: "H",
            value: high_score.to_string(),
        },
        Field {
            label: "Level",
            compact_label: "L",
            value: state.level.to_string(),
        },
        Field {
            label: "Speed",
            compact_label: "V",
            value: format!("{}ms", state.current_speed()),
        },
        Field {
            label: "Mode",
            compact_label: "M",
            value: state.wall_mode().label().to_owned(),
        },
    ];

    let compact = line_width(&fields, false) > usize::from(area.width);
    let beats_previous_best = state.score > info.reference_high_score;
    let mut line = info_line(&fields, compact, info.theme, beats_previous_best);

    if state.is_boosting() {
        line.spans.push(Span::raw(SEPARATOR));
        line.spans.push(Span::styled(
            "BOOST",
            Style::default()
                .fg(info.theme.hud_accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().fg(info.theme.hud_muted)),
        area,
    );
}

fn info_line(
    fields: &[Field],
    compact: bool,
    theme: &Theme,
    score_is_best: bool,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(fields.len() * 3);

    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(SEPARATOR));
        }
        let label = if compact {
            field.compact_label
        } else {
            field.label
        };
        let color = if index == 0 && score_is_best {
            theme.hud_accent
        } else {
            theme.hud_value
        };
        spans.push(Span::raw(format!("{label}: ")));
        spans.push(Span::styled(field.value.clone(), Style::default().fg(color)));
    }

    Line::from(spans)
}

fn line_width(fields: &[Field], compact: bool) -> usize {
    let separators = SEPARATOR.width() * fields.len().saturating_sub(1);
    fields
        .iter()
        .map(|field| {
            let label = if compact {
                field.compact_label
            } else {
                field.label
            };
            label.width() + ": ".width() + field.value.width()
        })
        .sum::<usize>()
        + separators
}

#[cfg(test)]
mod tests {
    use super::{Field, line_width};

    fn field(label: &'static str, value: &str) -> Field {
        Field {
            label,
            compact_label: "X",
            value: value.to_owned(),
        }
    }

    #[test]
    fn width_counts_labels_values_and_separators() {
        let fields = [field("Score", "10"), field("Hi", "200")];

        // "Score: 10 │ Hi: 200"
        assert_eq!(line_width(&fields, false), 19);
        // "X: 10 │ X: 200"
        assert_eq!(line_width(&fields, true), 14);
    }
}
