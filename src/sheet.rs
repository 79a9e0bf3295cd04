//! The attendance table and the values displayed for each of its rows.

use tracing::debug;

use crate::evaluator::{Evaluation, evaluate};
use crate::models::{FlagKind, StudentRow};
use crate::report::{SessionReport, aggregate};

/// A row together with what the sheet currently displays for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub student: StudentRow,
    pub display: Evaluation,
}

/// The ordered collection of students on the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    rows: Vec<SheetRow>,
}

impl Sheet {
    /// Builds a sheet, evaluating every row once.
    pub fn new(students: Vec<StudentRow>) -> Self {
        let rows = students
            .into_iter()
            .map(|student| SheetRow {
                display: evaluate(&student),
                student,
            })
            .collect();

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&SheetRow> {
        self.rows.get(index)
    }

    pub fn students(&self) -> impl Iterator<Item = &StudentRow> {
        self.rows.iter().map(|row| &row.student)
    }

    /// Recomputes and stores the displayed values of a single row.
    ///
    /// Returns `None` without touching anything if there is no row at `index`.
    pub fn evaluate_row(&mut self, index: usize) -> Option<Evaluation> {
        let Some(row) = self.rows.get_mut(index) else {
            debug!(index, "no row to evaluate");
            return None;
        };

        row.display = evaluate(&row.student);
        debug!(
            index,
            absences = row.display.absences,
            participations = row.display.participations,
            tier = %row.display.tier,
            "evaluated row"
        );
        Some(row.display)
    }

    pub fn evaluate_all(&mut self) {
        for index in 0..self.rows.len() {
            self.evaluate_row(index);
        }
    }

    /// Flips one flag without re-evaluating. Returns `false` if the row or session is missing.
    ///
    /// The caller must follow up with [`Sheet::evaluate_row`]; the tracker does so from its
    /// row-changed handler.
    pub(crate) fn flip_flag(&mut self, index: usize, kind: FlagKind, session: usize) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            debug!(index, "no row to change");
            return false;
        };

        let flags = row.student.flags_mut(kind);
        match flags.get(session) {
            Some(current) => flags.set(session, !current),
            None => {
                debug!(index, session, "no such session");
                false
            }
        }
    }

    /// Sets one flag and re-evaluates that row only.
    ///
    /// Returns `None` without touching anything if the row or session is missing.
    pub fn set_flag(
        &mut self,
        index: usize,
        kind: FlagKind,
        session: usize,
        value: bool,
    ) -> Option<Evaluation> {
        let row = self.rows.get_mut(index)?;
        if !row.student.flags_mut(kind).set(session, value) {
            debug!(index, session, "no such session");
            return None;
        }
        self.evaluate_row(index)
    }

    /// Appends a student, evaluates it, and returns its index.
    pub fn push(&mut self, student: StudentRow) -> usize {
        self.rows.push(SheetRow {
            display: evaluate(&student),
            student,
        });
        self.rows.len() - 1
    }

    pub fn compute_session_report(&self) -> SessionReport {
        aggregate(self.students())
    }
}
