//! UI rendering for the live session screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::timer::{PhaseKind, RunState, TickSource};
use crate::tui::app::SessionApp;

/// Render the application UI.
pub fn render<T: TickSource>(frame: &mut Frame<'_>, app: &SessionApp<T>) {
    // Create layout: header, countdown, gauges, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Countdown
            Constraint::Length(3), // Phase gauge
            Constraint::Length(3), // Session gauge
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_countdown(frame, app, chunks[1]);
    render_gauge(
        frame,
        "Phase",
        app.timer.phase_progress(),
        phase_color(app.timer.current_phase()),
        chunks[2],
    );
    render_gauge(frame, "Session", app.timer.progress(), Color::Green, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

fn phase_color(phase: PhaseKind) -> Color {
    match phase {
        PhaseKind::Countdown | PhaseKind::Cold => Color::Cyan,
        PhaseKind::Hot => Color::Red,
        PhaseKind::Inhale => Color::Green,
        PhaseKind::HoldIn | PhaseKind::HoldOut => Color::Yellow,
        PhaseKind::Exhale => Color::Blue,
    }
}

/// Render the header.
fn render_header<T: TickSource>(frame: &mut Frame<'_>, app: &SessionApp<T>, area: Rect) {
    let state = match app.timer.run_state() {
        RunState::Idle => "stopped",
        RunState::Running => "running",
        RunState::Paused => "paused",
        RunState::Completed => "complete",
    };
    let title = format!(" {} [{state}] ", app.title);

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the remaining time and current phase.
fn render_countdown<T: TickSource>(frame: &mut Frame<'_>, app: &SessionApp<T>, area: Rect) {
    let color = phase_color(app.timer.current_phase());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.remaining_label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(app.phase_label(), Style::default().fg(color))),
    ];
    if let Some(position) = app.position_label() {
        lines.push(Line::from(Span::styled(
            position,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        );

    frame.render_widget(body, area);
}

fn render_gauge(frame: &mut Frame<'_>, title: &str, ratio: f64, color: Color, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

/// Render the status bar.
fn render_status_bar<T: TickSource>(frame: &mut Frame<'_>, app: &SessionApp<T>, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space/p:pause | s:stop | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
