//! Application state and interaction logic.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::backend::{Submitter, Ticket};
use crate::data::{ProbeRow, ProbeSnapshot};
use crate::dialog::{Dialog, Outcome};
use crate::filter::{alert_labels, alert_menu, measurement_labels, measurement_menu, FilterMenu};
use crate::i18n::Labels;
use crate::notice::Notice;
use crate::registry::MeasurementRegistry;
use crate::source::ProbeSource;
use crate::table::{ProbeTable, TableApi};
use crate::ui::Theme;

/// Which filter menu a popup belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Measurement,
    Alert,
}

/// An open filter dropdown and its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuPopup {
    pub kind: MenuKind,
    pub cursor: usize,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Backend
    source: Box<dyn ProbeSource>,
    submitter: Box<dyn Submitter>,
    pub load_error: Option<String>,
    pub last_updated: Option<Instant>,

    // Probe table and its filters
    pub registry: MeasurementRegistry,
    pub labels: Labels,
    pub table: ProbeTable,
    pub measurement_menu: Option<FilterMenu>,
    pub alert_menu: Option<FilterMenu>,
    pub menu_popup: Option<MenuPopup>,

    // Dialogs
    pub dialog: Option<Dialog>,
    next_ticket: Ticket,
    pub default_unit: String,

    // Navigation and search
    pub selected_index: usize,
    pub search_text: String,
    pub search_active: bool,

    // UI
    pub theme: Theme,
    pub notice: Notice,
}

impl App {
    pub fn new(
        source: Box<dyn ProbeSource>,
        submitter: Box<dyn Submitter>,
        registry: MeasurementRegistry,
        labels: Labels,
    ) -> Self {
        let default_unit = labels.get("msec").to_string();
        Self {
            running: true,
            show_help: false,
            source,
            submitter,
            load_error: None,
            last_updated: None,
            registry,
            labels,
            table: ProbeTable::new(),
            measurement_menu: None,
            alert_menu: None,
            menu_popup: None,
            dialog: None,
            next_ticket: 0,
            default_unit,
            selected_index: 0,
            search_text: String::new(),
            search_active: false,
            theme: Theme::dark(),
            notice: Notice::default(),
        }
    }

    /// Returns a description of the current probe source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Ask the source for a fresh probe list.
    pub fn request_reload(&mut self) {
        self.source.request_reload();
    }

    /// Poll the source for a finished reload.
    ///
    /// Returns Ok(true) if a new snapshot was applied.
    pub fn reload_data(&mut self) -> Result<bool> {
        if let Some(snapshot) = self.source.poll() {
            self.apply_snapshot(snapshot);
            return Ok(true);
        }
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }
        Ok(false)
    }

    /// Replace the table contents and refresh the menu counts.
    pub fn apply_snapshot(&mut self, snapshot: ProbeSnapshot) {
        let mut rows = snapshot.rows;
        for row in &mut rows {
            row.ensure_url();
        }
        debug!(sequence = snapshot.sequence, rows = rows.len(), "applying snapshot");

        match self.measurement_menu.as_mut() {
            Some(menu) => {
                let labels = measurement_labels(menu, &rows, &self.registry);
                menu.relabel(&labels);
            }
            None => {
                self.measurement_menu = Some(measurement_menu(&rows, &self.registry, &self.labels));
            }
        }
        match self.alert_menu.as_mut() {
            Some(menu) => {
                menu.relabel(&alert_labels(&rows, &self.labels));
            }
            None => self.alert_menu = Some(alert_menu(&rows, &self.labels)),
        }

        self.table.replace_rows(rows);
        self.load_error = None;
        self.last_updated = Some(snapshot.received_at);
        self.clamp_selection();
    }

    /// Per-frame housekeeping: reloads, submissions and the notice timer.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        self.reload_data()?;
        self.poll_submissions(now);
        self.notice.expire(now);
        Ok(())
    }

    /// Route finished submissions to the dialog that sent them.
    pub fn poll_submissions(&mut self, now: Instant) {
        while let Some((ticket, result)) = self.submitter.poll() {
            let Some(dialog) = self.dialog.as_mut().filter(|d| d.ticket() == ticket) else {
                debug!(ticket, "dropping result for a closed dialog");
                continue;
            };
            match dialog.complete(result) {
                Outcome::Done { notice } => {
                    info!(ticket, kind = ?dialog.kind(), "probe change applied");
                    self.dialog = None;
                    self.source.request_reload();
                    self.notice.show(notice, now);
                }
                Outcome::Rejected => {
                    warn!(ticket, error = ?dialog.error(), "probe change refused");
                }
            }
        }
    }

    fn take_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }

    pub fn open_add(&mut self) {
        let ticket = self.take_ticket();
        self.dialog = Some(Dialog::open_add(
            ticket,
            &self.registry,
            self.table.rows(),
            &self.default_unit,
        ));
    }

    /// Open the edit dialog on the selected row.
    pub fn open_edit(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };
        let ticket = self.take_ticket();
        self.dialog = Some(Dialog::open_edit(
            ticket,
            &self.registry,
            self.table.rows(),
            &row,
            &self.default_unit,
        ));
    }

    /// Open the delete confirmation on the selected row.
    pub fn open_delete(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };
        let ticket = self.take_ticket();
        self.dialog = Some(Dialog::open_delete(ticket, &row));
    }

    /// Validate the open dialog and hand its request to the submitter.
    pub fn submit_dialog(&mut self) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        if let Some(request) = dialog.begin_submit() {
            self.submitter.submit(dialog.ticket(), request);
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    // Filter menus

    pub fn menu(&self, kind: MenuKind) -> Option<&FilterMenu> {
        match kind {
            MenuKind::Measurement => self.measurement_menu.as_ref(),
            MenuKind::Alert => self.alert_menu.as_ref(),
        }
    }

    pub fn open_menu(&mut self, kind: MenuKind) {
        let Some(menu) = self.menu(kind) else {
            return;
        };
        let cursor = menu
            .items()
            .iter()
            .position(|item| item.active)
            .unwrap_or(0);
        self.menu_popup = Some(MenuPopup { kind, cursor });
    }

    pub fn close_menu(&mut self) {
        self.menu_popup = None;
    }

    pub fn menu_move(&mut self, step: isize) {
        let Some(popup) = self.menu_popup else {
            return;
        };
        let len = self.menu(popup.kind).map_or(0, |m| m.items().len());
        if len == 0 {
            return;
        }
        let cursor = (popup.cursor as isize + step).clamp(0, len as isize - 1) as usize;
        self.menu_popup = Some(MenuPopup { cursor, ..popup });
    }

    /// Apply the entry under the cursor and close the popup.
    pub fn menu_confirm(&mut self) {
        let Some(popup) = self.menu_popup.take() else {
            return;
        };
        let menu = match popup.kind {
            MenuKind::Measurement => self.measurement_menu.as_mut(),
            MenuKind::Alert => self.alert_menu.as_mut(),
        };
        let Some(menu) = menu else {
            return;
        };
        let Some(key) = menu.items().get(popup.cursor).map(|item| item.key.to_string()) else {
            return;
        };
        if let Err(e) = menu.select(&key, &mut self.table) {
            warn!(key, error = %e, "filter selection failed");
        }
        self.clamp_selection();
    }

    // Search

    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    pub fn cancel_search(&mut self) {
        self.search_active = false;
    }

    /// Replace the global search text and apply it.
    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.table.search(&self.search_text);
        self.clamp_selection();
    }

    pub fn search_push(&mut self, c: char) {
        self.search_text.push(c);
        self.table.search(&self.search_text);
        self.clamp_selection();
    }

    pub fn search_pop(&mut self) {
        self.search_text.pop();
        self.table.search(&self.search_text);
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.set_search("");
    }

    // Selection

    pub fn visible_rows(&self) -> Vec<&ProbeRow> {
        self.table.visible_rows()
    }

    pub fn selected_row(&self) -> Option<&ProbeRow> {
        self.table.visible_rows().get(self.selected_index).copied()
    }

    pub fn select_next_n(&mut self, n: usize) {
        let max = self.table.visible_rows().len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.table.visible_rows().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.table.visible_rows().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
