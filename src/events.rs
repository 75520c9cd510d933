use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, MenuKind};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // A modal dialog captures all input
    if app.dialog.is_some() {
        handle_dialog_input(app, key);
        return;
    }

    if app.menu_popup.is_some() {
        handle_menu_input(app, key);
        return;
    }

    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Dialogs
        KeyCode::Char('a') | KeyCode::Char('+') => app.open_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit(),
        KeyCode::Char('d') | KeyCode::Delete => app.open_delete(),

        // Filter menus
        KeyCode::Char('m') => app.open_menu(MenuKind::Measurement),
        KeyCode::Char('f') => app.open_menu(MenuKind::Alert),

        // Search
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('c') => {
            if !app.search_text.is_empty() {
                app.clear_search();
            }
        }

        KeyCode::Char('r') => app.request_reload(),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

fn handle_dialog_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => return app.close_dialog(),
        KeyCode::Enter => return app.submit_dialog(),
        _ => {}
    }

    let App {
        dialog, registry, ..
    } = app;
    let Some(dialog) = dialog.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => dialog.focus_next(),
        KeyCode::BackTab | KeyCode::Up => dialog.focus_prev(),
        KeyCode::Left => dialog.cycle(-1, registry),
        KeyCode::Right => dialog.cycle(1, registry),
        KeyCode::Backspace => dialog.backspace(),
        KeyCode::Char(c) => dialog.input(c),
        _ => {}
    }
}

fn handle_menu_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.menu_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.menu_move(1),
        KeyCode::Home => app.menu_move(isize::MIN / 2),
        KeyCode::End => app.menu_move(isize::MAX / 2),
        KeyCode::Enter | KeyCode::Char(' ') => app.menu_confirm(),
        _ => {}
    }
}

/// Handle key input while search is active
fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm search
        KeyCode::Enter => app.search_active = false,

        // Keep text but exit input mode
        KeyCode::Esc => app.cancel_search(),

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear_search(),

        KeyCode::Backspace => {
            app.search_pop();
            if app.search_text.is_empty() {
                app.search_active = false;
            }
        }

        KeyCode::Char(c) => app.search_push(c),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    if app.dialog.is_some() || app.menu_popup.is_some() {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;
            // Content area starts after the header, filter bar and table header
            if clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                if item_row < app.visible_rows().len() {
                    app.selected_index = item_row;
                }
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::OfflineSubmitter;
    use crate::data::{ProbeRow, ProbeSnapshot};
    use crate::dialog::{DialogKind, Field};
    use crate::i18n::Labels;
    use crate::registry::MeasurementRegistry;
    use crate::source::FileSource;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let mut app = App::new(
            Box::new(FileSource::new("/nonexistent/probes.json")),
            Box::new(OfflineSubmitter::new()),
            MeasurementRegistry::builtin(),
            Labels::default(),
        );
        app.apply_snapshot(ProbeSnapshot::new(
            1,
            vec![ProbeRow::new("icmp", "a"), ProbeRow::new("http", "b")],
        ));
        app
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_dialog_captures_keys() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.dialog.as_ref().unwrap().kind(), DialogKind::Add);

        // 'q' goes to the dialog instead of quitting
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.dialog.as_ref().unwrap().focus, Field::Host);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.dialog.as_ref().unwrap().form.host, "q");

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_menu_navigation_applies_filter() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('m')));
        assert!(app.menu_popup.is_some());

        // All, HTTP (1), ICMP (1)
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.menu_popup.is_none());
        assert_eq!(app.visible_rows().len(), 1);
        assert_eq!(app.visible_rows()[0].host, "b");

        handle_key_event(&mut app, key(KeyCode::Char('m')));
        handle_key_event(&mut app, key(KeyCode::Home));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.visible_rows().len(), 2);
    }

    #[test]
    fn test_search_input() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        for c in "icmp".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.visible_rows().len(), 1);

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(!app.search_active);
        handle_key_event(&mut app, key(KeyCode::Char('c')));
        assert_eq!(app.visible_rows().len(), 2);
    }
}
