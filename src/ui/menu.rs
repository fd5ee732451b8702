use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::THEME;
use crate::game::GameOverReason;
use crate::score::HighscoreEntry;

/// Draws the welcome screen as a centered popup.
pub fn render_welcome_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::new()
                    .fg(THEME.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from("Eat the food, don't bite yourself."),
        Line::from(""),
        Line::from("[Space] Start"),
        Line::from("[H] Highscores"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" welcome ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD to steer"))
            .alignment(Alignment::Center)
            .style(Style::new().fg(THEME.menu_footer)),
        footer_row,
    );
}

/// Draws the end-of-game summary for a score that did not make the list.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    reason: Option<GameOverReason>,
) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(Style::new().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!("Final score: {score}")),
        Line::from(reason.map_or("", reason_text)),
        Line::from(""),
        Line::from("[Space] Play again"),
        Line::from("[H] Highscores  [Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the new-highscore prompt with the name typed so far.
pub fn render_name_entry(frame: &mut Frame<'_>, area: Rect, score: u32, name: &str) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("NEW HIGHSCORE!").style(
            Style::new()
                .fg(THEME.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from("Enter your name:"),
        Line::from(format!("{name}_")),
        Line::from(""),
        Line::from("[Enter] Save  [Esc] Skip"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" highscore ")),
        popup,
    );
}

/// Draws the ranked highscore list.
pub fn render_highscore_table(frame: &mut Frame<'_>, area: Rect, entries: &[HighscoreEntry]) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("HIGHSCORES").style(
            Style::new()
                .fg(THEME.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];

    if entries.is_empty() {
        lines.push(Line::from("No scores yet"));
    }
    lines.extend(entries.iter().enumerate().map(|(rank, entry)| {
        Line::from(format!(
            "{}. {:<16} {:>5}",
            rank + 1,
            entry.player_name,
            entry.score
        ))
    }));

    lines.push(Line::from(""));
    lines.push(Line::from("[Space] Play  [Q] Quit").style(Style::new().fg(THEME.menu_footer)));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" highscores ")),
        popup,
    );
}

fn reason_text(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::WallCollision => "You hit the wall",
        GameOverReason::SelfCollision => "You bit yourself",
        GameOverReason::BoardFilled => "The board is full!",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::score::HighscoreEntry;

    use super::render_highscore_table;

    #[test]
    fn highscore_table_lists_ranked_entries() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("test terminal");
        let entries = vec![HighscoreEntry::new("Ada", 12), HighscoreEntry::new("Linus", 7)];

        terminal
            .draw(|frame| render_highscore_table(frame, frame.area(), &entries))
            .expect("draw should succeed");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("1. Ada"));
        assert!(text.contains("2. Linus"));
    }
}
