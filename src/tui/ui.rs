//! Stateless UI rendering for the board, scores and status.

use super::app::App;
use noughts_core::{winning_line, Board, Player, Position, ScoreTally, Square};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HELP: &str = "1-9/arrows+Enter: move  r: new round  s: reset scores  m: toggle opponent  q: quit";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Scores
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from("Noughts - Tic Tac Toe"),
        Line::from(Span::styled(app.mode_line(), Style::default().fg(Color::Gray))),
    ])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);
    draw_scores(frame, chunks[2], app.session().scores());

    let status = Paragraph::new(app.status_line())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board = app.session().game().board();
    let highlight = winning_line(board).map(|line| line.cells());
    let board_area = center_rect(area, 29, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(9),
                Constraint::Length(1),
                Constraint::Length(9),
                Constraint::Length(1),
                Constraint::Length(9),
            ])
            .split(rows[row * 2]);

        for column in 0..3 {
            if let Some(pos) = Position::from_row_column(row, column) {
                let winning = highlight.is_some_and(|cells| cells.contains(&pos.index()));
                draw_cell(frame, cols[column * 2], board, pos, pos == app.cursor(), winning);
            }
            if column < 2 {
                draw_separator_vertical(frame, cols[column * 2 + 1]);
            }
        }

        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, pos: Position, cursor: bool, winning: bool) {
    let square = board.get(pos.index()).unwrap_or(Square::Empty);
    let label = (pos.index() + 1).to_string();

    let (symbol, mut style) = match square {
        Square::Empty => (label, Style::default().fg(Color::DarkGray)),
        Square::Occupied(Player::X) => ("X".to_string(), Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Square::Occupied(Player::O) => ("O".to_string(), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    };

    if winning {
        style = style.bg(Color::Green).fg(Color::Black);
    }
    if cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(format!(" {} ", symbol), style))])
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_scores(frame: &mut Frame, area: Rect, scores: &ScoreTally) {
    let line = Line::from(vec![
        Span::styled(format!("X: {}", scores.x_wins()), Style::default().fg(Color::Blue)),
        Span::raw("   "),
        Span::styled(format!("O: {}", scores.o_wins()), Style::default().fg(Color::Red)),
        Span::raw("   "),
        Span::raw(format!("Draws: {}", scores.draws())),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().title("Score").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize]).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{OpponentMode, SessionSettings};
    use crossterm::event::KeyCode;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_title_scores_and_status() {
        let app = App::new(SessionSettings::default());
        let screen = rendered(&app);
        assert!(screen.contains("Noughts - Tic Tac Toe"));
        assert!(screen.contains("Draws: 0"));
        assert!(screen.contains("X (human) to move."));
    }

    #[test]
    fn test_renders_marks() {
        let mut app = App::new(SessionSettings {
            opponent: OpponentMode::Human,
            ..SessionSettings::default()
        });
        app.handle_key(KeyCode::Char('1'));
        app.handle_key(KeyCode::Char('9'));
        let screen = rendered(&app);
        assert!(screen.contains(" X "));
        assert!(screen.contains(" O "));
    }
}
