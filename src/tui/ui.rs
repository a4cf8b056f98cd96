//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use strictly_solo::{GameState, GameStatus, Player, Position, Square};

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;
const HELP: &str = "←↑↓→ move  Enter select  1-9 cell  r reset  q quit";

/// Renders the start screen or the game, depending on the state.
pub fn draw(frame: &mut Frame, state: &GameState, cursor: Position) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Current player
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    if *state.status() == GameStatus::NotStarted {
        draw_start_screen(frame, chunks[2]);
        draw_help(frame, chunks[4], "s / Enter start  q quit");
        return;
    }

    let turn = Paragraph::new(format!("Current player: {}", state.current_player().label()))
        .alignment(Alignment::Center);
    frame.render_widget(turn, chunks[1]);

    draw_board(frame, chunks[2], state, cursor);

    let (status, color) = match state.status().banner() {
        Some(banner) => (banner, Color::Green),
        None if state.awaiting_human() => ("Your move", Color::Yellow),
        None => ("Computer is thinking...", Color::Yellow),
    };
    let status_text = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[3]);

    draw_help(frame, chunks[4], HELP);
}

fn draw_start_screen(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("You play X against the computer."),
        Line::from(""),
        Line::from("Press s or Enter to start"),
    ];
    let start = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    frame.render_widget(start, center_rect(area, 40, 3));
}

fn draw_help(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn draw_board(frame: &mut Frame, area: Rect, state: &GameState, cursor: Position) {
    let board_area = center_rect(area, CELL_WIDTH * 3 + 2, CELL_HEIGHT * 3 + 2);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], state, cursor, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, state: &GameState, cursor: Position, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(CELL_WIDTH),
            Constraint::Length(1),
            Constraint::Length(CELL_WIDTH),
            Constraint::Length(1),
            Constraint::Length(CELL_WIDTH),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::from_row_col(row, col) {
            draw_cell(frame, cols[col * 2], state, cursor, pos);
        }
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, state: &GameState, cursor: Position, pos: Position) {
    let (symbol, base_style) = match state.board().get(pos) {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let on_winning_line = state.winning_line().is_some_and(|line| line.contains(pos));
    let style = if on_winning_line {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if pos == cursor && state.awaiting_human() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(symbol), Line::from("")])
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
