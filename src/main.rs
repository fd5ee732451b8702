use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::app::{App, AppControl};
use grid_snake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, FRAME_INTERVAL_MS, GameConfig, GridSize, MIN_GRID_SIDE,
};
use grid_snake::game::GameSimulation;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::score::{HighscoreStore, scores_path};
use grid_snake::terminal_runtime::TerminalSession;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

const LOG_FILE_NAME: &str = "snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// End the game when the snake crosses the border instead of wrapping.
    #[arg(long = "wall-death")]
    wall_death: bool,

    /// Grid width in cells.
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_WIDTH,
        value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID_SIDE)..=200)
    )]
    width: u16,

    /// Grid height in cells.
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_HEIGHT,
        value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID_SIDE)..=200)
    )]
    height: u16,

    /// Highscore file location.
    #[arg(long = "scores-file")]
    scores_file: Option<PathBuf>,

    /// Log file location.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let scores_file = cli.scores_file.clone().unwrap_or_else(scores_path);
    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| scores_file.with_file_name(LOG_FILE_NAME));
    init_logging(&log_file);

    let config = GameConfig {
        grid: GridSize {
            width: cli.width,
            height: cli.height,
        },
        wall_death: cli.wall_death,
    };
    info!("starting with {config:?}, highscores at {}", scores_file.display());

    let highscores = HighscoreStore::load(scores_file);
    let app = App::new(config, GameSimulation::new(config), highscores);

    run(app)
}

fn run(mut app: App) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        session.draw(&app)?;

        if let Some(game_input) = input.poll_input(frame_interval, app.input_mode())? {
            if app.handle_input(game_input) == AppControl::Quit {
                break;
            }
            if game_input == GameInput::Start {
                last_tick = Instant::now();
            }
        }

        if app.tick_due(last_tick.elapsed()) {
            app.tick();
            last_tick = Instant::now();
        }
    }

    info!("quitting");
    Ok(())
}

fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
        }
        Err(error) => eprintln!("logging disabled, cannot create {}: {error}", path.display()),
    }
}
