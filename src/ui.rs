//! Terminal UI rendering with ratatui
//!
//! Draws a `Snapshot`; never touches the live game.

use crate::game::Snapshot;
use crate::settings::Settings;
use crate::tetromino::ShapeKind;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Width of the side panel: preview and stats
const PANEL_WIDTH: u16 = 16;

/// Render the game screen
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();

    // Each cell is two characters wide, plus borders
    let board_width = snapshot.width as u16 * 2 + 2;
    let board_height = snapshot.height as u16 + 2;
    let game_area = center_rect(area, board_width + PANEL_WIDTH, board_height);

    // Create main layout: board | preview + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(PANEL_WIDTH),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Preview
            Constraint::Min(6),    // Stats
        ])
        .split(main_layout[1]);

    render_preview(frame, right_layout[0], snapshot, settings);
    render_stats(frame, right_layout[1], snapshot);

    // Overlays
    let quit_key = settings
        .keys
        .quit
        .first()
        .map(String::as_str)
        .unwrap_or("q");
    if snapshot.game_over {
        render_overlay(
            frame,
            area,
            "GAME OVER",
            &format!("Press {} to quit", quit_key),
        );
    } else if snapshot.paused {
        let pause_key = settings
            .keys
            .pause
            .first()
            .map(String::as_str)
            .unwrap_or("p");
        render_overlay(frame, area, "PAUSED", &format!("Press {} to resume", pause_key));
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Build the styled text for the board with the active piece overlaid
fn board_lines(
    snapshot: &Snapshot,
    block_char: &'static str,
    empty_char: &'static str,
) -> Vec<Line<'static>> {
    let active = snapshot.active.as_ref();

    snapshot
        .grid
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    let active_color = active.and_then(|piece| {
                        piece
                            .cells
                            .contains(&(x as i32, y as i32))
                            .then_some(piece.color)
                    });
                    match active_color {
                        Some(color) => Span::styled(block_char, Style::default().fg(color)),
                        None if cell.is_filled() => {
                            Span::styled(block_char, Style::default().fg(Color::Gray))
                        }
                        None => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(board_lines(snapshot, block_char, empty_char)), inner);
}

/// Render the preview box
fn render_preview(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let (block_char, _) = settings.visual.block_chars();
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(kind) = snapshot.preview.as_deref().and_then(|name| {
        ShapeKind::all().into_iter().find(|kind| kind.name() == name)
    }) else {
        return;
    };

    let shape = kind.shape();
    let lines: Vec<Line> = shape.states()[0]
        .rows()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&filled| {
                    if filled {
                        Span::styled(block_char, Style::default().fg(kind.color()))
                    } else {
                        Span::raw("  ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.level),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.lines_cleared),
            Style::default().fg(Color::Green),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
