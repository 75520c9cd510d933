//! Modal dialog rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::dialog::{Dialog, DialogKind, DialogPhase, Field};
use crate::form::operator_symbol;

const LABEL_WIDTH: usize = 14;

/// Render the open dialog on top of everything else.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = &app.dialog else {
        return;
    };

    let mut lines = match dialog.kind() {
        DialogKind::Delete => delete_lines(dialog),
        DialogKind::Add | DialogKind::Edit => form_lines(dialog, app),
    };

    lines.push(Line::from(""));
    match &dialog.phase {
        DialogPhase::Rejected(message) => lines.push(Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.alert).add_modifier(Modifier::BOLD),
        ))),
        DialogPhase::Submitting => lines.push(Line::from(Span::styled(
            " Submitting...",
            Style::default().fg(app.theme.warning),
        ))),
        DialogPhase::Open => lines.push(Line::from(Span::styled(
            " Enter:confirm  Esc:cancel",
            Style::default().add_modifier(Modifier::DIM),
        ))),
    }

    let title = format!(" {} ", app.labels.get(dialog.kind().label_key()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let dialog_area = super::centered(area, 60, lines.len() as u16 + 2);
    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        dialog_area,
    );
}

fn delete_lines(dialog: &Dialog) -> Vec<Line<'static>> {
    let url = dialog
        .target()
        .map(|row| row.url.clone())
        .unwrap_or_default();
    vec![
        Line::from(""),
        Line::from(" Delete this probe?"),
        Line::from(Span::styled(
            format!(" {}", url),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ]
}

fn form_lines(dialog: &Dialog, app: &App) -> Vec<Line<'static>> {
    let form = &dialog.form;
    let measurement = app
        .registry
        .label(&form.measurement)
        .unwrap_or(&form.measurement)
        .to_string();
    let host = if form.host_locked {
        format!("{} (fixed)", form.host)
    } else {
        form.host.clone()
    };
    let threshold = format!(
        "{} {} {}",
        operator_symbol(&form.operator),
        form.threshold,
        form.unit
    );
    let granularity = form.granularity_title().unwrap_or("-").to_string();

    vec![
        Line::from(""),
        field_line(dialog, app, Field::Measurement, "Measurement", format!("◀ {} ▶", measurement)),
        field_line(dialog, app, Field::Host, "Host", host),
        field_line(dialog, app, Field::Threshold, "Threshold", threshold),
        field_line(dialog, app, Field::Granularity, "Frequency", format!("◀ {} ▶", granularity)),
    ]
}

fn field_line(
    dialog: &Dialog,
    app: &App,
    field: Field,
    label: &str,
    value: String,
) -> Line<'static> {
    let focused = dialog.focus == field && !dialog.is_submitting();
    let value_style = if focused {
        app.theme.focused
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!(" {:<width$}", label, width = LABEL_WIDTH)),
        Span::styled(value, value_style),
    ])
}
