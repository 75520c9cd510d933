//! Common UI components.
//!
//! This module contains the header bar, status bar, and help overlay.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::table::TableApi;

/// Render the header bar with probe totals.
///
/// Displays: status indicator, probe count, alerted count, source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if app.last_updated.is_none() {
        let line = Line::from(vec![
            Span::styled(
                " ACTIVE MONITORING ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let rows = app.table.rows();
    let alerted = rows.iter().filter(|r| r.alerted).count();

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.alert_style(alerted > 0)),
        Span::styled(
            "ACTIVE MONITORING ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            format!("{}", rows.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" probes │ "),
        if alerted > 0 {
            Span::styled(format!("{}", alerted), app.theme.alert_style(true))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(format!(" {} │ ", app.labels.get("alerted").to_lowercase())),
        Span::raw(app.source_description().to_string()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// A visible notice takes precedence, then load errors, then the controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let now = Instant::now();
    if let Some(msg) = app.notice.visible(now) {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.ok));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | r:retry q:quit", err)
    } else if let Some(updated) = app.last_updated {
        let controls = if app.search_active {
            "Type to search | Enter:apply Esc:cancel"
        } else if app.dialog.is_some() {
            "Tab:next field ←/→:change Enter:submit Esc:close"
        } else {
            "a:add e:edit d:delete m/f:filter /:search ?:help q:quit"
        };
        format!(
            " Updated {:.1}s ago | {}",
            now.saturating_duration_since(updated).as_secs_f64(),
            controls
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let style = if app.load_error.is_some() {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Table"),
        Line::from("  ↑/↓ j/k     Navigate probes"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  /           Search"),
        Line::from("  c           Clear search"),
        Line::from("  m           Measurement filter"),
        Line::from("  f           Alert status filter"),
        Line::from(""),
        section(" Probes"),
        Line::from("  a / +       Add probe"),
        Line::from("  e / Enter   Edit selected"),
        Line::from("  d / Del     Delete selected"),
        Line::from(""),
        section(" Dialog"),
        Line::from("  Tab         Next field"),
        Line::from("  ←/→         Change selection"),
        Line::from("  Enter       Submit"),
        Line::from("  Esc         Close"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Reload now"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let help_area = super::centered(area, 42, 30);
    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}
