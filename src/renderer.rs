use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::app::{App, Screen};
use crate::config::{CELL_WIDTH_COLUMNS, GridSize, THEME};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{
    render_game_over_menu, render_highscore_table, render_name_entry, render_welcome_menu,
};

const GLYPH_EMPTY: &str = "  ";
const GLYPH_SNAKE: &str = "██";
const GLYPH_FOOD: &str = "()";

/// Renders the full frame from immutable app state.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let grid = app.game.grid();
    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let board = board_rect(board_area, grid);
    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(THEME.border_fg));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_checkerboard(frame, inner, grid);
    render_food(frame, inner, grid, app.game.food.position);
    render_snake(frame, inner, app);
    render_hud(frame, hud_area, &app.game);

    match app.screen() {
        Screen::Welcome => render_welcome_menu(frame, board),
        Screen::Playing => {}
        Screen::NameEntry { name } => render_name_entry(frame, board, app.game.score(), name),
        Screen::GameOver => render_game_over_menu(
            frame,
            board,
            app.game.score(),
            app.game.game_over_reason(),
        ),
        Screen::Highscores => render_highscore_table(frame, board, app.highscores.entries()),
    }
}

/// Centers the bordered board inside `area`, clipping when the terminal is small.
fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid
        .width
        .saturating_mul(CELL_WIDTH_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = grid.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_checkerboard(frame: &mut Frame<'_>, inner: Rect, grid: GridSize) {
    let buffer = frame.buffer_mut();
    for y in 0..i32::from(grid.height) {
        for x in 0..i32::from(grid.width) {
            let Some((col, row)) = logical_to_terminal(inner, grid, Position::new(x, y)) else {
                continue;
            };
            let bg = if (x + y) % 2 == 0 {
                THEME.cell_even
            } else {
                THEME.cell_odd
            };
            buffer.set_string(col, row, GLYPH_EMPTY, Style::new().bg(bg));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, food: Position) {
    let Some((x, y)) = logical_to_terminal(inner, grid, food) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(THEME.food).add_modifier(Modifier::BOLD),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, app: &App) {
    let grid = app.game.grid();
    let head = app.game.snake.head();

    let buffer = frame.buffer_mut();
    for segment in app.game.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        let color = if *segment == head {
            THEME.snake_head
        } else {
            THEME.snake_body
        };
        buffer.set_string(x, y, GLYPH_SNAKE, Style::new().fg(color));
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::config::GridSize;
    use crate::snake::Position;

    use super::{board_rect, logical_to_terminal};

    const GRID: GridSize = GridSize {
        width: 20,
        height: 20,
    };

    #[test]
    fn cells_are_two_columns_wide() {
        let inner = Rect::new(1, 1, 40, 20);

        assert_eq!(
            logical_to_terminal(inner, GRID, Position::new(0, 0)),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, GRID, Position::new(19, 19)),
            Some((39, 20))
        );
    }

    #[test]
    fn off_grid_and_clipped_cells_are_skipped() {
        let small = Rect::new(0, 0, 10, 5);

        assert_eq!(logical_to_terminal(small, GRID, Position::new(-1, 0)), None);
        assert_eq!(logical_to_terminal(small, GRID, Position::new(5, 0)), None);
        assert_eq!(logical_to_terminal(small, GRID, Position::new(4, 4)), Some((8, 4)));
    }

    #[test]
    fn board_is_centered_and_clipped() {
        assert_eq!(
            board_rect(Rect::new(0, 0, 80, 30), GRID),
            Rect::new(19, 4, 42, 22)
        );
        assert_eq!(
            board_rect(Rect::new(0, 0, 30, 10), GRID),
            Rect::new(0, 0, 30, 10)
        );
    }
}
