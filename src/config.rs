use ratatui::style::Color;

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

/// Runtime options chosen at startup.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Crossing the border ends the game instead of wrapping around.
    pub wall_death: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            wall_death: false,
        }
    }
}

/// Colors used for every element on screen.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    /// Checkerboard colors for empty cells.
    pub cell_even: Color,
    pub cell_odd: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Yellow,
    food: Color::Red,
    cell_even: Color::Black,
    cell_odd: Color::Rgb(28, 28, 28),
    border_fg: Color::White,
    hud_text: Color::White,
    menu_title: Color::Yellow,
    menu_footer: Color::DarkGray,
};

/// Size of one grid cell in pixels of the reference window.
pub const CELL_SIZE_PX: i32 = 20;

/// Terminal columns used to draw one grid cell.
pub const CELL_WIDTH_COLUMNS: u16 = 2;

pub const DEFAULT_GRID_WIDTH: u16 = 20;
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Smallest grid accepted from the command line.
pub const MIN_GRID_SIDE: u16 = 8;

/// Segments in a freshly started snake.
pub const START_LENGTH: usize = 3;

/// Head cell of a freshly started snake; the body trails to the left.
pub const START_HEAD: (i32, i32) = (5, 5);

/// Tick interval at the start of a game in milliseconds.
pub const START_TICK_INTERVAL_MS: u64 = 400;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 100;

/// Interval reduction per point of current score when food is eaten.
pub const SPEED_STEP_PER_POINT_MS: u64 = 2;

/// Entries kept in the highscore list.
pub const MAX_HIGHSCORE_ENTRIES: usize = 5;

/// Display columns allowed for a player name.
pub const MAX_PLAYER_NAME_WIDTH: usize = 16;

/// Frame pacing of the main loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

#[cfg(test)]
mod tests {
    use super::GridSize;

    #[test]
    fn total_cells_does_not_overflow_u16() {
        let grid = GridSize {
            width: 300,
            height: 300,
        };
        assert_eq!(grid.total_cells(), 90_000);
    }
}
