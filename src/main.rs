use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{LevelFilter, error, info, warn};
use neon_snake::config::{Difficulty, FRAME_INTERVAL, GameConfig, THEME_NEON};
use neon_snake::driver::{BoostHold, TickScheduler};
use neon_snake::game::{GameState, TickOutcome};
use neon_snake::grid::WallMode;
use neon_snake::input::{GameInput, InputHandler};
use neon_snake::renderer;
use neon_snake::score::{HighScoreStore, app_data_dir};
use neon_snake::settings::{Settings, settings_path};
use neon_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use neon_snake::ui::hud::HudInfo;
use simplelog::{Config, WriteLogger};

const LOG_FILE_NAME: &str = "neon-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Starting speed preset; overrides the remembered choice.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Start with wrap-around edges instead of walls.
    #[arg(long = "open-walls")]
    open_walls: bool,

    /// Seed for a reproducible food sequence.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file location (defaults to the game's data directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log debug details such as level ups.
    #[arg(short, long)]
    verbose: bool,
}

/// Everything the frame loop owns besides the terminal.
struct App {
    state: GameState,
    settings: Settings,
    high_scores: HighScoreStore,
    reference_high_score: u32,
    scheduler: TickScheduler,
    boost: BoostHold,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let settings = initial_settings(&cli);
    let high_scores = HighScoreStore::open_default();
    info!(
        "starting: difficulty {:?}, walls {:?}, high score {}",
        settings.difficulty,
        settings.wall_mode,
        high_scores.best()
    );

    install_panic_hook();
    let mut session = TerminalSession::enter()?;

    let speed_ms = settings.difficulty.initial_speed_ms();
    let config = GameConfig::default();
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, settings.wall_mode, speed_ms, seed),
        None => GameState::new(config, settings.wall_mode, speed_ms),
    };
    let mut app = App {
        state,
        settings,
        reference_high_score: high_scores.best(),
        high_scores,
        scheduler: TickScheduler::new(),
        boost: BoostHold::new(session.reports_key_release()),
    };

    let result = run(&mut session, &mut app);
    drop(session);

    if let Err(error) = &result {
        error!("terminal failure: {error}");
    }
    info!("exiting with high score {}", app.high_scores.best());
    result
}

fn run(session: &mut TerminalSession, app: &mut App) -> io::Result<()> {
    let mut input = InputHandler::new();

    loop {
        let now = Instant::now();
        app.state.set_boost(app.boost.is_held(now));
        if let Some(outcome) = app.scheduler.drive(&mut app.state, now) {
            handle_outcome(app, outcome);
        }

        let hud_info = HudInfo {
            high_score: app.high_scores.best(),
            reference_high_score: app.reference_high_score,
            difficulty: app.settings.difficulty,
            theme: &THEME_NEON,
        };
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &app.state, &hud_info))?;

        let timeout = app.scheduler.poll_timeout(Instant::now(), FRAME_INTERVAL);
        if let Some(game_input) = input.poll_input(timeout)? {
            if game_input == GameInput::Quit {
                return Ok(());
            }
            handle_input(app, game_input, Instant::now());
        }
    }
}

fn handle_input(app: &mut App, input: GameInput, now: Instant) {
    match input {
        GameInput::Direction(direction) => app.state.set_direction(direction),
        GameInput::Pause => app.state.toggle_pause(),
        GameInput::BoostOn => app.boost.press(now),
        GameInput::BoostOff => app.boost.release(),
        GameInput::ToggleWalls => {
            app.settings.wall_mode = app.state.wall_mode().toggled();
            app.state.set_wall_mode(app.settings.wall_mode);
            info!("wall mode switched to {:?}", app.settings.wall_mode);
        }
        GameInput::SelectDifficulty(difficulty) if app.state.is_start_screen() => {
            app.settings.difficulty = difficulty;
            reset_game(app);
        }
        GameInput::Confirm if app.state.is_start_screen() => start_game(app),
        GameInput::Confirm if app.state.is_over() => {
            reset_game(app);
            start_game(app);
        }
        GameInput::MainMenu if app.state.is_over() => reset_game(app),
        GameInput::SelectDifficulty(_)
        | GameInput::Confirm
        | GameInput::MainMenu
        | GameInput::Quit => {}
    }
}

fn handle_outcome(app: &mut App, outcome: TickOutcome) {
    match outcome {
        TickOutcome::Continued => {}
        TickOutcome::AteFood | TickOutcome::Collided | TickOutcome::BoardFull => {
            record_high_score(app);
        }
    }
}

fn start_game(app: &mut App) {
    if let Err(error) = app.settings.save_to_path(&settings_path()) {
        warn!("failed to remember settings: {error}");
    }

    app.reference_high_score = app.high_scores.best();
    app.boost.release();
    app.state.start();
    info!(
        "game started: difficulty {:?}, walls {:?}",
        app.settings.difficulty,
        app.state.wall_mode()
    );
}

fn reset_game(app: &mut App) {
    app.state.reset(
        app.settings.wall_mode,
        app.settings.difficulty.initial_speed_ms(),
    );
    app.scheduler.cancel();
}

fn record_high_score(app: &mut App) {
    let score = app.state.score;
    match app.high_scores.record(score) {
        Ok(true) => info!("new high score {score}"),
        Ok(false) => {}
        Err(error) => error!("failed to save high score: {error}"),
    }
}

fn initial_settings(cli: &Cli) -> Settings {
    let mut settings = match Settings::load_from_path(&settings_path()) {
        Ok(settings) => settings,
        Err(error) => {
            warn!("using default settings: {error}");
            Settings::default()
        }
    };

    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    if cli.open_walls {
        settings.wall_mode = WallMode::Open;
    }

    settings
}

/// Logs go to a file; the terminal belongs to the game screen.
fn init_logging(cli: &Cli) {
    let path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| app_data_dir().join(LOG_FILE_NAME));
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match File::create(&path) {
        Ok(file) => {
            if let Err(error) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Logging disabled: {error}");
            }
        }
        Err(error) => eprintln!("Logging disabled, cannot create {}: {error}", path.display()),
    }
}
