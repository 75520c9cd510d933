//! Probe table rendering.
//!
//! One row per visible probe. The hours column is a 24-cell strip colored
//! from the heatmap layout, with the current hour reversed.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{ProbeRow, HOURS_PER_DAY};
use crate::heatmap::{self, HeatCell};
use crate::table::{Column, TableApi};
use crate::ui::Theme;

const HEAT_CHAR: &str = "▇";

/// Render the probe table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_rows();
    let current_hour = heatmap::current_hour();

    let columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|c| c.is_visible() && *c != Column::Chart)
        .collect();

    let header = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(c.title()))
            .collect::<Vec<_>>(),
    )
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = visible
        .iter()
        .map(|row| {
            let cells = columns.iter().map(|column| match column {
                Column::Hours => Cell::from(heat_line(
                    &heatmap::render(&row.hours, current_hour),
                    &app.theme,
                )),
                Column::Url => Cell::from(row.url.clone()).style(app.theme.alert_style(row.alerted)),
                other => Cell::from(display_text(*other, row)),
            });
            Row::new(cells.collect::<Vec<_>>())
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|c| match c {
            Column::Url => Constraint::Fill(3),
            Column::Hours => Constraint::Length(HOURS_PER_DAY as u16),
            Column::LastMeasurementTime => Constraint::Length(19),
            _ => Constraint::Fill(1),
        })
        .collect();

    let selected = app.selected_index.min(visible.len().saturating_sub(1));

    let search_info = if app.search_active {
        format!(" /{}_", app.search_text)
    } else if !app.search_text.is_empty() {
        format!(" /{}/ [c:clear]", app.search_text)
    } else {
        String::new()
    };
    let position_info = if !visible.is_empty() {
        format!(" [{}/{}]", selected + 1, visible.len())
    } else {
        String::new()
    };
    let title = format!(
        " Probes ({}/{}){}{} ",
        visible.len(),
        app.table.rows().len(),
        search_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !visible.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// Cell text for columns shown as plain values.
fn display_text(column: Column, row: &ProbeRow) -> String {
    let text = column.filter_text(row);
    if text.is_empty() {
        "-".to_string()
    } else {
        text
    }
}

/// One colored block per heatmap cell.
pub fn heat_line(cells: &[HeatCell], theme: &Theme) -> Line<'static> {
    Line::from(
        cells
            .iter()
            .map(|cell| {
                let mut style = Style::default().fg(theme.hour_color(cell.status));
                if cell.is_current_hour() {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Span::styled(HEAT_CHAR, style)
            })
            .collect::<Vec<_>>(),
    )
}
