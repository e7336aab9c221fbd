use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Cell the snake starts from after every reset.
pub const START_CELL: (i32, i32) = (3, 3);

/// Score granted per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Score interval at which the level increases.
pub const POINTS_PER_LEVEL: u32 = 50;

/// Tick interval reduction applied on each level up, in milliseconds.
pub const SPEED_STEP_MS: u64 = 10;

/// Fastest tick interval reachable through leveling, in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Boosted interval is the base interval divided by this factor.
pub const BOOST_DIVISOR: u64 = 2;

/// Redraw cadence of the frame loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Without key-release reporting, a held boost key counts as released after
/// this long without a repeat. Covers the usual initial key-repeat delay.
pub const BOOST_RELEASE_TIMEOUT: Duration = Duration::from_millis(600);

/// Starting speed presets offered on the start screen.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Difficulty {
    /// All presets in menu order.
    pub const ALL: [Self; 3] = [Self::Slow, Self::Normal, Self::Fast];

    /// Initial tick interval in milliseconds.
    #[must_use]
    pub fn initial_speed_ms(self) -> u64 {
        match self {
            Self::Slow => 150,
            Self::Normal => 100,
            Self::Fast => 50,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        }
    }
}

/// Rules that vary between game variants, collected in one place.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub points_per_food: u32,
    pub points_per_level: u32,
    pub speed_step_ms: u64,
    pub min_speed_ms: u64,
    pub boost_divisor: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            points_per_food: POINTS_PER_FOOD,
            points_per_level: POINTS_PER_LEVEL,
            speed_step_ms: SPEED_STEP_MS,
            min_speed_ms: MIN_TICK_INTERVAL_MS,
            boost_divisor: BOOST_DIVISOR,
        }
    }
}

impl GameConfig {
    /// Default rules on a custom grid.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            grid: GridSize { width, height },
            ..Self::default()
        }
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub wall_fg: Color,
    pub wall_bg: Color,
    pub open_border_fg: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub hud_accent: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Neon green snake, red brick walls.
pub const THEME_NEON: Theme = Theme {
    snake_head: Color::Rgb(51, 255, 51),
    snake_body: Color::Rgb(0, 170, 0),
    snake_tail: Color::Rgb(0, 90, 0),
    food: Color::Rgb(231, 76, 60),
    wall_fg: Color::Rgb(204, 0, 0),
    wall_bg: Color::Rgb(139, 0, 0),
    open_border_fg: Color::DarkGray,
    hud_value: Color::White,
    hud_muted: Color::DarkGray,
    hud_accent: Color::Rgb(0, 255, 135),
    menu_title: Color::Rgb(0, 255, 135),
    menu_footer: Color::DarkGray,
};

/// Brick wall drawn when the border is solid.
pub const BORDER_BRICK: border::Set = border::Set {
    top_left: "█",
    top_right: "█",
    bottom_left: "█",
    bottom_right: "█",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▀",
    horizontal_bottom: "▄",
};

/// Dotted border marking a wrap-around edge.
pub const BORDER_OPEN: border::Set = border::Set {
    top_left: "·",
    top_right: "·",
    bottom_left: "·",
    bottom_right: "·",
    vertical_left: "┊",
    vertical_right: "┊",
    horizontal_top: "┈",
    horizontal_bottom: "┈",
};

pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_SNAKE_BODY: &str = "■";
pub const GLYPH_SNAKE_TAIL: &str = "▪";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
