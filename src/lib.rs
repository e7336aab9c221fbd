pub mod config;
pub mod driver;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
