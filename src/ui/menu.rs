//! Filter bar and dropdown rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, MenuKind};
use crate::filter::FilterMenu;

const FILTER_ICON: &str = "⏷";

fn menu_span(menu: &FilterMenu, hotkey: char, app: &App) -> Span<'static> {
    let icon = if menu.is_filtering() { FILTER_ICON } else { " " };
    let style = if menu.is_filtering() {
        app.theme.filter_active
    } else {
        app.theme.filter_inactive
    };
    Span::styled(format!(" {}:{} {} ", hotkey, menu.display_title(), icon), style)
}

/// Render the one-line filter bar above the table.
pub fn render_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some(menu) = &app.measurement_menu {
        spans.push(menu_span(menu, 'm', app));
        spans.push(Span::raw("│"));
    }
    if let Some(menu) = &app.alert_menu {
        spans.push(menu_span(menu, 'f', app));
    }
    frame.render_widget(Line::from(spans), area);
}

/// Render the open dropdown, if any, below the filter bar.
pub fn render_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(popup) = app.menu_popup else {
        return;
    };
    let Some(menu) = app.menu(popup.kind) else {
        return;
    };

    let items = menu.items();
    let width = items
        .iter()
        .map(|item| item.label.chars().count() as u16 + 6)
        .max()
        .unwrap_or(10)
        .max(menu.display_title().chars().count() as u16 + 4)
        .min(area.width);
    let height = (items.len() as u16 + 2).min(area.height.saturating_sub(1));
    let x = match popup.kind {
        MenuKind::Measurement => area.x,
        MenuKind::Alert => area.x + area.width / 3,
    };
    let popup_area = Rect::new(x, area.y + 1, width, height);

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let marker = if item.active { "✓ " } else { "  " };
            let style = if item.active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, item.label),
                style,
            )))
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(format!(" {} ", menu.display_title()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.highlight)),
        )
        .highlight_style(app.theme.selected);

    let mut state = ListState::default();
    state.select(Some(popup.cursor));

    frame.render_widget(Clear, popup_area);
    frame.render_stateful_widget(list, popup_area, &mut state);
}
