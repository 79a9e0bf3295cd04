use crate::models::{AttendanceRecord, SESSION_COUNT};

/// Per-session totals across every student on the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub total: [usize; SESSION_COUNT],
    pub present: [usize; SESSION_COUNT],
    pub participated: [usize; SESSION_COUNT],
}

/// One session's slice of a [`SessionReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTotals {
    /// 1-indexed session number.
    pub session: usize,
    pub total: usize,
    pub present: usize,
    pub participated: usize,
}

impl SessionReport {
    /// The largest value in any series for any session.
    pub fn max_value(&self) -> usize {
        self.total
            .iter()
            .chain(&self.present)
            .chain(&self.participated)
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn sessions(&self) -> impl Iterator<Item = SessionTotals> + '_ {
        (0..SESSION_COUNT).map(|k| SessionTotals {
            session: k + 1,
            total: self.total[k],
            present: self.present[k],
            participated: self.participated[k],
        })
    }
}

/// Aggregates the current state of every row. Every student counts as enrolled in every
/// session.
pub fn aggregate<'a, R, I>(rows: I) -> SessionReport
where
    R: AttendanceRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut report = SessionReport::default();

    for row in rows {
        for k in 0..SESSION_COUNT {
            report.total[k] += 1;
            if row.attended().get(k) == Some(true) {
                report.present[k] += 1;
            }
            if row.participated().get(k) == Some(true) {
                report.participated[k] += 1;
            }
        }
    }

    report
}
