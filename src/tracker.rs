//! Wires the sheet, the add-student form and the chart together through [`SheetEvent`]s.

use tracing::{debug, info, warn};

use crate::chart::{Canvas, ChartLayout, SvgCanvas, render};
use crate::evaluator::Evaluation;
use crate::events::{Dispatcher, EventKind, SheetEvent};
use crate::form::StudentForm;
use crate::models::FlagKind;
use crate::report::SessionReport;
use crate::sheet::Sheet;
use crate::validation::Field;

/// Everything the event handlers operate on.
pub struct TrackerState<C> {
    pub sheet: Sheet,
    pub form: StudentForm,
    pub canvas: C,
    pub layout: ChartLayout,
    pub course_tag: String,
    pub report_visible: bool,
    pub last_report: Option<SessionReport>,
}

impl<C: Canvas> TrackerState<C> {
    /// Aggregates the current rows and draws them. Returns the report that was drawn.
    pub fn draw_session_chart(&mut self) -> &SessionReport {
        let report = self.sheet.compute_session_report();
        self.canvas.draw(&render(&report, &self.layout));
        debug!(max = report.max_value(), "drew session chart");
        self.last_report.insert(report)
    }
}

/// The attendance page: a sheet plus the handlers that keep its display current.
pub struct Tracker<C = SvgCanvas> {
    dispatcher: Dispatcher<TrackerState<C>>,
    state: TrackerState<C>,
}

impl<C: Canvas + 'static> Tracker<C> {
    /// Creates a tracker with the row-changed, report-requested and row-added handlers
    /// registered.
    pub fn new(sheet: Sheet, layout: ChartLayout, course_tag: &str, canvas: C) -> Self {
        let mut dispatcher = Dispatcher::new();
        dispatcher.on(EventKind::RowChanged, on_row_changed::<C>);
        dispatcher.on(EventKind::ReportRequested, on_report_requested::<C>);
        dispatcher.on(EventKind::RowAdded, on_row_added::<C>);

        Self {
            dispatcher,
            state: TrackerState {
                sheet,
                form: StudentForm::new(),
                canvas,
                layout,
                course_tag: course_tag.to_string(),
                report_visible: false,
                last_report: None,
            },
        }
    }

    /// Registers an additional handler. Handlers run in registration order, after the default
    /// ones.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut TrackerState<C>, &SheetEvent) + 'static,
    {
        self.dispatcher.on(kind, handler);
    }

    pub fn emit(&mut self, event: SheetEvent) {
        self.dispatcher.dispatch(&mut self.state, &event);
    }

    pub fn state(&self) -> &TrackerState<C> {
        &self.state
    }

    pub fn sheet(&self) -> &Sheet {
        &self.state.sheet
    }

    pub fn form(&self) -> &StudentForm {
        &self.state.form
    }

    pub fn canvas(&self) -> &C {
        &self.state.canvas
    }

    pub fn report_visible(&self) -> bool {
        self.state.report_visible
    }

    /// Flips one of a row's flags, as a checkbox click would, and returns the row's new
    /// display. Missing rows or sessions are ignored.
    pub fn toggle(&mut self, index: usize, kind: FlagKind, session: usize) -> Option<Evaluation> {
        if !self.state.sheet.flip_flag(index, kind, session) {
            return None;
        }

        self.emit(SheetEvent::RowChanged(index));
        self.state.sheet.get(index).map(|row| row.display)
    }

    /// Computes and draws the session report, and makes the report visible.
    pub fn request_report(&mut self) -> Option<&SessionReport> {
        self.emit(SheetEvent::ReportRequested);
        self.state.last_report.as_ref()
    }

    pub fn form_input(&mut self, field: Field, value: &str) -> bool {
        self.state.form.input(field, value)
    }

    pub fn form_blur(&mut self, field: Field) -> bool {
        self.state.form.blur(field)
    }

    /// Submits the add-student form. On success the new row's index is returned.
    pub fn submit_form(&mut self) -> Result<usize, Vec<Field>> {
        let student = match self.state.form.submit(&self.state.course_tag) {
            Ok(student) => student,
            Err(invalid) => {
                warn!(?invalid, "rejected add-student submission");
                return Err(invalid);
            }
        };

        info!(id = %student.id, "student added locally");
        let index = self.state.sheet.push(student);
        self.emit(SheetEvent::RowAdded(index));
        Ok(index)
    }
}

fn on_row_changed<C: Canvas>(state: &mut TrackerState<C>, event: &SheetEvent) {
    if let SheetEvent::RowChanged(index) = *event {
        state.sheet.evaluate_row(index);
    }
}

fn on_report_requested<C: Canvas>(state: &mut TrackerState<C>, _: &SheetEvent) {
    state.draw_session_chart();
    state.report_visible = true;
}

/// The new row was evaluated when it was appended; only a visible chart needs refreshing.
fn on_row_added<C: Canvas>(state: &mut TrackerState<C>, _: &SheetEvent) {
    if state.report_visible {
        state.draw_session_chart();
    }
}
