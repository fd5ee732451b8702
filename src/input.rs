use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit offset of one step in this direction (y grows downwards).
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// High-level input events consumed by the app.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Start,
    ShowHighscores,
    Confirm,
    Cancel,
    Char(char),
    Backspace,
    Quit,
}

/// How raw keys should be interpreted.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputMode {
    /// Keys steer the snake and drive menus.
    Steering,
    /// Keys type a player name.
    Text,
}

/// Translates a terminal key event into a game input.
#[must_use]
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::Steering => map_steering_key(key.code),
        InputMode::Text => map_text_key(key.code),
    }
}

fn map_steering_key(code: KeyCode) -> Option<GameInput> {
    let input = match code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ') => GameInput::Start,
        KeyCode::Char('h' | 'H') => GameInput::ShowHighscores,
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };
    Some(input)
}

fn map_text_key(code: KeyCode) -> Option<GameInput> {
    match code {
        KeyCode::Enter => Some(GameInput::Confirm),
        KeyCode::Esc => Some(GameInput::Cancel),
        KeyCode::Backspace => Some(GameInput::Backspace),
        KeyCode::Char(c) if !c.is_control() => Some(GameInput::Char(c)),
        _ => None,
    }
}

/// Polls the terminal for key presses.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one key press and maps it for `mode`.
    pub fn poll_input(&mut self, timeout: Duration, mode: InputMode) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key, mode)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Direction, GameInput, InputMode, direction_change_is_valid, map_key};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reverse_changes_are_invalid() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Left, Direction::Right));
        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Right, Direction::Right));
    }

    #[test]
    fn steering_keys_map_to_directions_and_menu_actions() {
        assert_eq!(
            map_key(press(KeyCode::Left), InputMode::Steering),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('w')), InputMode::Steering),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), InputMode::Steering),
            Some(GameInput::Start)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('q')), InputMode::Steering),
            Some(GameInput::Quit)
        );
    }

    #[test]
    fn text_mode_types_letters_instead_of_steering() {
        assert_eq!(
            map_key(press(KeyCode::Char('w')), InputMode::Text),
            Some(GameInput::Char('w'))
        );
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), InputMode::Text),
            Some(GameInput::Char(' '))
        );
        assert_eq!(
            map_key(press(KeyCode::Esc), InputMode::Text),
            Some(GameInput::Cancel)
        );
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key, InputMode::Steering), Some(GameInput::Quit));
        assert_eq!(map_key(key, InputMode::Text), Some(GameInput::Quit));
    }

    #[test]
    fn key_releases_are_ignored() {
        let key = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(key, InputMode::Steering), None);
    }
}
