use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::THEME;
use crate::game::GameSimulation;

/// Draws the one-line score/speed bar under the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, game: &GameSimulation) {
    frame.render_widget(
        Paragraph::new(hud_line(game.score(), game.speed_ms(), game.wall_death()))
            .alignment(Alignment::Center),
        area,
    );
}

fn hud_line(score: u32, speed_ms: u64, wall_death: bool) -> Line<'static> {
    let value = Style::new().fg(THEME.hud_text).add_modifier(Modifier::BOLD);
    let label = Style::new().fg(THEME.menu_footer);

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(score.to_string(), value),
        Span::styled("   Speed: ", label),
        Span::styled(speed_ms.to_string(), value),
        Span::styled("   Walls: ", label),
        Span::styled(if wall_death { "deadly" } else { "wrap" }, value),
    ])
}

#[cfg(test)]
mod tests {
    use super::hud_line;

    #[test]
    fn hud_shows_score_speed_and_wall_mode() {
        let text = hud_line(7, 344, true).to_string();

        assert!(text.contains("Score: 7"));
        assert!(text.contains("Speed: 344"));
        assert!(text.contains("deadly"));
    }
}
