//! Add, edit and delete dialogs.
//!
//! A [`Dialog`] owns everything it needs: a copy of the row it was opened on
//! and its form. Reloads never touch an open dialog. Every dialog carries a
//! ticket; a submission result is only applied to the dialog holding the
//! matching ticket.

use tracing::debug;

use crate::backend::{BackendError, MutationResponse, ProbeRequest, Ticket};
use crate::data::{format_number, ProbeRow};
use crate::form::{available_options, ProbeForm, ProbeIdentity, ValidationError};
use crate::registry::MeasurementRegistry;

/// Threshold an add form starts with.
pub const ADD_THRESHOLD: &str = "100";
/// Fallbacks used by the edit form when the row lacks a value.
pub const EDIT_THRESHOLD: &str = "500";
pub const EDIT_MEASUREMENT: &str = "icmp";
pub const EDIT_GRANULARITY: &str = "min";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Add,
    Edit,
    Delete,
}

impl DialogKind {
    /// Label key of the dialog title.
    pub fn label_key(self) -> &'static str {
        match self {
            DialogKind::Add => "add",
            DialogKind::Edit => "edit",
            DialogKind::Delete => "delete",
        }
    }

    fn done_message(self) -> &'static str {
        match self {
            DialogKind::Add => "Probe added",
            DialogKind::Edit => "Probe updated",
            DialogKind::Delete => "Probe deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPhase {
    Open,
    Submitting,
    /// Validation failed or the backend refused; the message is shown inline.
    Rejected(String),
}

/// Focusable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Measurement,
    Host,
    Threshold,
    Granularity,
}

impl Field {
    pub const ORDER: [Field; 4] = [
        Field::Measurement,
        Field::Host,
        Field::Threshold,
        Field::Granularity,
    ];
}

/// What the app should do after a submission finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Close the dialog, reload and show `notice`.
    Done { notice: String },
    /// The dialog stays open with an error.
    Rejected,
}

#[derive(Debug, Clone)]
pub struct Dialog {
    ticket: Ticket,
    kind: DialogKind,
    pub phase: DialogPhase,
    pub form: ProbeForm,
    target: Option<ProbeRow>,
    pub focus: Field,
    default_unit: String,
}

impl Dialog {
    /// Open an add dialog offering only unclaimed measurements.
    pub fn open_add(
        ticket: Ticket,
        registry: &MeasurementRegistry,
        rows: &[ProbeRow],
        default_unit: &str,
    ) -> Self {
        let options = available_options(rows, registry, None);
        let mut form = ProbeForm {
            measurement: options.first().cloned().unwrap_or_default(),
            measurement_options: options,
            host: String::new(),
            threshold: ADD_THRESHOLD.to_string(),
            ..ProbeForm::default()
        };
        form.refresh(registry, None, true, default_unit);
        debug!(ticket, measurement = %form.measurement, "add dialog opened");

        Self::new(ticket, DialogKind::Add, form, None, default_unit)
    }

    /// Open an edit dialog prefilled from `row`.
    pub fn open_edit(
        ticket: Ticket,
        registry: &MeasurementRegistry,
        rows: &[ProbeRow],
        row: &ProbeRow,
        default_unit: &str,
    ) -> Self {
        let measurement = non_empty(&row.measurement).unwrap_or(EDIT_MEASUREMENT);
        let granularity = row.granularity.as_deref().unwrap_or(EDIT_GRANULARITY);
        let mut form = ProbeForm {
            measurement_options: available_options(rows, registry, Some(measurement)),
            measurement: measurement.to_string(),
            host: row.host.clone(),
            threshold: row
                .threshold
                .map(format_number)
                .unwrap_or_else(|| EDIT_THRESHOLD.to_string()),
            original: Some(ProbeIdentity {
                host: row.host.clone(),
                measurement: row.measurement.clone(),
                granularity: row.granularity.clone(),
            }),
            ..ProbeForm::default()
        };
        form.refresh(registry, Some(granularity), false, default_unit);
        debug!(ticket, url = %row.url, "edit dialog opened");

        Self::new(ticket, DialogKind::Edit, form, Some(row.clone()), default_unit)
    }

    /// Open a delete confirmation for `row`.
    pub fn open_delete(ticket: Ticket, row: &ProbeRow) -> Self {
        let form = ProbeForm {
            measurement: row.measurement.clone(),
            host: row.host.clone(),
            ..ProbeForm::default()
        };
        Self::new(ticket, DialogKind::Delete, form, Some(row.clone()), "")
    }

    fn new(
        ticket: Ticket,
        kind: DialogKind,
        form: ProbeForm,
        target: Option<ProbeRow>,
        default_unit: &str,
    ) -> Self {
        let focus = if form.host_locked {
            Field::Threshold
        } else {
            Field::Measurement
        };
        Self {
            ticket,
            kind,
            phase: DialogPhase::Open,
            form,
            target,
            focus,
            default_unit: default_unit.to_string(),
        }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    /// Row snapshot taken when the dialog opened.
    pub fn target(&self) -> Option<&ProbeRow> {
        self.target.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == DialogPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            DialogPhase::Rejected(message) => Some(message),
            _ => None,
        }
    }

    /// Build the request for the current form contents.
    pub fn payload(&self) -> Result<ProbeRequest, ValidationError> {
        if self.kind == DialogKind::Delete {
            let (am_host, measurement) = match &self.target {
                Some(row) => (row.host.clone(), row.measurement.clone()),
                None => (self.form.host.clone(), self.form.measurement.clone()),
            };
            return Ok(ProbeRequest::Delete {
                am_host,
                measurement,
            });
        }

        let fields = self.form.validate()?;
        Ok(match (self.kind, &self.form.original) {
            (DialogKind::Edit, Some(original)) => ProbeRequest::Edit {
                am_host: fields.host,
                threshold: fields.threshold,
                measurement: fields.measurement,
                granularity: fields.granularity,
                old_am_host: original.host.clone(),
                old_measurement: original.measurement.clone(),
                old_granularity: original.granularity.clone(),
            },
            _ => ProbeRequest::Add {
                am_host: fields.host,
                threshold: fields.threshold,
                measurement: fields.measurement,
                granularity: fields.granularity,
            },
        })
    }

    /// Validate and move to the submitting phase.
    ///
    /// Returns the request to send, or `None` when validation failed or a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<ProbeRequest> {
        if self.is_submitting() {
            return None;
        }
        match self.payload() {
            Ok(request) => {
                self.phase = DialogPhase::Submitting;
                Some(request)
            }
            Err(e) => {
                self.phase = DialogPhase::Rejected(e.to_string());
                None
            }
        }
    }

    /// Apply the backend's answer to this dialog's submission.
    pub fn complete(&mut self, result: Result<MutationResponse, BackendError>) -> Outcome {
        match result {
            Ok(response) if response.success => Outcome::Done {
                notice: response
                    .message
                    .unwrap_or_else(|| self.kind.done_message().to_string()),
            },
            Ok(response) => {
                self.phase = DialogPhase::Rejected(
                    response
                        .message
                        .unwrap_or_else(|| "Request rejected".to_string()),
                );
                Outcome::Rejected
            }
            Err(e) => {
                self.phase = DialogPhase::Rejected(e.to_string());
                Outcome::Rejected
            }
        }
    }

    /// Fields the user can move focus to.
    pub fn fields(&self) -> Vec<Field> {
        if self.kind == DialogKind::Delete {
            return Vec::new();
        }
        Field::ORDER
            .into_iter()
            .filter(|f| *f != Field::Host || !self.form.host_locked)
            .collect()
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let fields = self.fields();
        if fields.is_empty() {
            return;
        }
        let len = fields.len() as isize;
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = fields[(current + step).rem_euclid(len) as usize];
    }

    /// Left/right on a selector field.
    pub fn cycle(&mut self, step: isize, registry: &MeasurementRegistry) {
        if self.is_submitting() {
            return;
        }
        match self.focus {
            Field::Measurement => {
                self.form
                    .cycle_measurement(step, registry, &self.default_unit);
            }
            Field::Granularity => self.form.cycle_granularity(step),
            Field::Host | Field::Threshold => return,
        }
        self.reopen();
    }

    /// Type a character into the focused text field.
    pub fn input(&mut self, c: char) {
        if self.is_submitting() {
            return;
        }
        match self.focus {
            Field::Host if !self.form.host_locked => self.form.host.push(c),
            Field::Threshold if c.is_ascii_digit() || c == '.' => self.form.threshold.push(c),
            _ => return,
        }
        self.reopen();
    }

    pub fn backspace(&mut self) {
        if self.is_submitting() {
            return;
        }
        match self.focus {
            Field::Host if !self.form.host_locked => {
                self.form.host.pop();
            }
            Field::Threshold => {
                self.form.threshold.pop();
            }
            _ => return,
        }
        self.reopen();
    }

    fn reopen(&mut self) {
        if matches!(self.phase, DialogPhase::Rejected(_)) {
            self.phase = DialogPhase::Open;
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
