use std::time::Duration;

use log::{error, info};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::{GameConfig, MAX_PLAYER_NAME_WIDTH};
use crate::game::{GameSimulation, TickOutcome};
use crate::input::{GameInput, InputMode};
use crate::score::{HighscoreEntry, HighscoreStore};

const ANONYMOUS_PLAYER: &str = "Anonymous";

/// Which overlay (if any) is shown on top of the board.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Screen {
    Welcome,
    Playing,
    /// The last game qualified for the list; the player is typing a name.
    NameEntry { name: String },
    GameOver,
    Highscores,
}

/// Whether the main loop should keep going.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Quit,
}

/// Presentation adapter between the terminal loop and the simulation.
///
/// Routes input by screen, ticks the simulation, and hands finished scores
/// to the highscore store.
#[derive(Debug)]
pub struct App {
    pub game: GameSimulation,
    pub highscores: HighscoreStore,
    screen: Screen,
    config: GameConfig,
}

impl App {
    #[must_use]
    pub fn new(config: GameConfig, game: GameSimulation, highscores: HighscoreStore) -> Self {
        Self {
            game,
            highscores,
            screen: Screen::Welcome,
            config,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// How raw keys should be read for the current screen.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match self.screen {
            Screen::NameEntry { .. } => InputMode::Text,
            _ => InputMode::Steering,
        }
    }

    /// Returns true once `elapsed` covers the simulation's current interval.
    #[must_use]
    pub fn tick_due(&self, elapsed: Duration) -> bool {
        self.game.is_running() && elapsed >= self.game.tick_interval()
    }

    pub fn handle_input(&mut self, input: GameInput) -> AppControl {
        if input == GameInput::Quit {
            return AppControl::Quit;
        }

        if let Screen::NameEntry { name } = &mut self.screen {
            match input {
                GameInput::Char(c) => push_name_char(name, c),
                GameInput::Backspace => {
                    name.pop();
                }
                GameInput::Confirm => {
                    let name = std::mem::take(name);
                    self.submit_highscore(name);
                }
                GameInput::Cancel => self.screen = Screen::GameOver,
                _ => {}
            }
            return AppControl::Continue;
        }

        match input {
            GameInput::Start => self.start_game(),
            GameInput::ShowHighscores
                if matches!(self.screen, Screen::Welcome | Screen::GameOver) =>
            {
                self.screen = Screen::Highscores;
            }
            GameInput::Direction(direction) => self.game.set_direction(direction),
            _ => {}
        }

        AppControl::Continue
    }

    /// Advances the game by one step and reacts to the outcome.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.game.tick();

        if let TickOutcome::GameOver { score, reason } = outcome {
            info!("game over: score {score}, {reason:?}");
            self.screen = if self.highscores.is_qualifying(score) {
                Screen::NameEntry {
                    name: String::new(),
                }
            } else {
                Screen::GameOver
            };
        }

        outcome
    }

    fn start_game(&mut self) {
        info!(
            "starting new game on {}x{} grid (wall death: {})",
            self.config.grid.width, self.config.grid.height, self.config.wall_death
        );
        self.game.start_new_game(self.config.grid);
        self.screen = Screen::Playing;
    }

    fn submit_highscore(&mut self, name: String) {
        let name = name.trim();
        let player_name = if name.is_empty() {
            ANONYMOUS_PLAYER.to_owned()
        } else {
            name.to_owned()
        };

        let score = self.game.score();
        let rank = self.highscores.insert(HighscoreEntry::new(player_name, score));
        info!("recorded highscore {score} at rank {rank:?}");

        if let Err(error) = self.highscores.save() {
            error!("failed to save highscores: {error}");
        }

        self.screen = Screen::Highscores;
    }
}

// Zero-width characters would let the name grow without bound.
fn push_name_char(name: &mut String, c: char) {
    if c.width().unwrap_or(0) == 0 {
        return;
    }

    let mut candidate = name.clone();
    candidate.push(c);
    if candidate.width() <= MAX_PLAYER_NAME_WIDTH {
        *name = candidate;
    }
}
