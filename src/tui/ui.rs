//! UI rendering for the TUI.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::api::Stage;
use crate::core::{StatusKind, classify, display_text, short_id};

use super::app::TuiApp;

/// Main render function - lays out header, content and footer, then the
/// overlay and notice modals on top.
pub fn render<C>(frame: &mut Frame, app: &TuiApp<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer/help
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if app.dashboard.detail().is_open() {
        render_log_overlay(frame, app);
    }

    if app.dashboard.notice().is_some() {
        render_notice(frame, app);
    }
}

fn render_header<C>(frame: &mut Frame, app: &TuiApp<C>, area: Rect) {
    let mut spans = vec![Span::styled(
        " TRAINCTL  Pipeline Control",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    if app.dashboard.is_busy() {
        spans.push(Span::styled(
            "  submitting...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_content<C>(frame: &mut Frame, app: &TuiApp<C>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32), // Actions panel
            Constraint::Min(0),     // Jobs list
        ])
        .split(area);

    render_actions(frame, app, chunks[0]);
    render_jobs(frame, app, chunks[1]);
}

fn render_actions<C>(frame: &mut Frame, app: &TuiApp<C>, area: Rect) {
    let busy = app.dashboard.is_busy();

    let items: Vec<ListItem> = Stage::all()
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            let style = if busy {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(format!("  [{}] ", i + 1), Style::default().fg(Color::Cyan)),
                Span::styled(stage.label().to_string(), style),
            ]);
            ListItem::new(line)
        })
        .collect();

    let block = Block::default()
        .title("Actions")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(List::new(items).block(block), area);
}

fn render_jobs<C>(frame: &mut Frame, app: &TuiApp<C>, area: Rect) {
    let block = Block::default()
        .title("Recent Jobs")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.dashboard.jobs().is_empty() {
        let text = Paragraph::new("  No jobs found")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .dashboard
        .jobs()
        .display_jobs()
        .enumerate()
        .map(|(i, job)| {
            let is_selected = i == app.selected;
            let style = if is_selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let kind = classify(&job.status);
            let status_icon = match kind {
                StatusKind::Completed => Span::styled("✓", Style::default().fg(Color::Green)),
                StatusKind::Failed => Span::styled("✗", Style::default().fg(Color::Red)),
                StatusKind::Running => Span::styled("•", Style::default().fg(Color::Yellow)),
                StatusKind::Other => Span::styled("•", Style::default().fg(Color::DarkGray)),
            };

            let line = Line::from(vec![
                Span::raw(if is_selected { "> " } else { "  " }),
                status_icon,
                Span::raw(format!(
                    "  {:<20}  {:<12}  ",
                    truncate(&job.name, 20),
                    short_id(&job.id)
                )),
                Span::styled(
                    format!("{:<10}", display_text(&job.status)),
                    Style::default().fg(status_color(kind)),
                ),
                Span::styled(
                    format!("  {}", format_start_time(job.start_time)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);

            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_log_overlay<C>(frame: &mut Frame, app: &TuiApp<C>) {
    let job = match app.dashboard.detail().job() {
        Some(j) => j,
        None => return,
    };

    let area = centered_rect(frame.area(), 90, 80);
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Job summary
            Constraint::Min(0),    // Logs
        ])
        .split(area);

    let kind = classify(&job.status);
    let summary = vec![
        Line::from(vec![
            Span::styled("  Status:  ", Style::default().fg(Color::Cyan)),
            Span::styled(
                display_text(&job.status),
                Style::default().fg(status_color(kind)),
            ),
            Span::styled("   Started: ", Style::default().fg(Color::Cyan)),
            Span::raw(format_start_time(job.start_time)),
            Span::styled("   Exit: ", Style::default().fg(Color::Cyan)),
            Span::raw(
                job.return_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Command: ", Style::default().fg(Color::Cyan)),
            Span::raw(job.command.clone()),
        ]),
        Line::from(vec![
            Span::styled("  Log:     ", Style::default().fg(Color::Cyan)),
            Span::raw(job.log_file.clone()),
        ]),
    ];

    let header_block = Block::default()
        .title(format!("Job: {} ({})", job.name, job.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(summary).block(header_block), chunks[0]);

    let logs = job.recent_logs.as_deref().unwrap_or("No logs available.");
    let log_block = Block::default()
        .title("Recent Logs")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(logs.to_string())
        .style(Style::default().fg(Color::Green))
        .wrap(Wrap { trim: false })
        .scroll((app.log_scroll, 0))
        .block(log_block);
    frame.render_widget(paragraph, chunks[1]);
}

fn render_notice<C>(frame: &mut Frame, app: &TuiApp<C>) {
    let notice = match app.dashboard.notice() {
        Some(n) => n,
        None => return,
    };

    let area = centered_rect(frame.area(), 60, 20);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", notice),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  [Enter] Dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_footer<C>(frame: &mut Frame, app: &TuiApp<C>, area: Rect) {
    let help_text = if app.dashboard.notice().is_some() {
        "[Enter] Dismiss"
    } else if app.dashboard.detail().is_open() {
        "[↑↓] Scroll  [r] Refresh Logs  [Esc/x] Close  [q] Quit"
    } else {
        "[1-5] Start stage  [↑↓] Navigate  [Enter] View Logs  [r] Refresh  [q] Quit"
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(Line::from(format!("  {}", help_text))).block(block);
    frame.render_widget(paragraph, area);
}

fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Running => Color::Yellow,
        StatusKind::Completed => Color::Green,
        StatusKind::Failed => Color::Red,
        StatusKind::Other => Color::DarkGray,
    }
}

fn format_start_time(epoch_secs: f64) -> String {
    match DateTime::<Utc>::from_timestamp(epoch_secs as i64, 0) {
        Some(ts) => ts.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let prefix: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", prefix)
    } else {
        text.to_string()
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
