//! Derives a student's attendance standing from their flags.

use crate::models::{AttendanceRecord, SESSION_COUNT, Tier};

pub const EXCLUDED: &str = "Excluded – too many absences – You need to participate more";
pub const WARNING_GOOD_PARTICIPATION: &str = "Warning – attendance low – Good participation";
pub const WARNING_LOW_PARTICIPATION: &str =
    "Warning – attendance low – You need to participate more";
pub const GOOD_EXCELLENT_PARTICIPATION: &str = "Good attendance – Excellent participation";
pub const GOOD_KEEP_PARTICIPATING: &str = "Good attendance – Keep participating";

/// What gets displayed for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub absences: usize,
    pub participations: usize,
    pub tier: Tier,
    pub message: &'static str,
}

/// Evaluates one row. This never fails: every row has exactly [`SESSION_COUNT`] flags of each
/// kind.
pub fn evaluate<R: AttendanceRecord + ?Sized>(row: &R) -> Evaluation {
    let absences = SESSION_COUNT - row.attended().count();
    let participations = row.participated().count();

    Evaluation {
        absences,
        participations,
        tier: Tier::from_absences(absences),
        message: message(absences, participations),
    }
}

/// Picks the status message.
///
/// The participation thresholds differ between the warning band (3) and the good band (4),
/// and participation is not considered at all once a student is excluded.
pub fn message(absences: usize, participations: usize) -> &'static str {
    if absences >= 5 {
        EXCLUDED
    } else if absences >= 3 {
        if participations >= 3 {
            WARNING_GOOD_PARTICIPATION
        } else {
            WARNING_LOW_PARTICIPATION
        }
    } else if participations >= 4 {
        GOOD_EXCELLENT_PARTICIPATION
    } else {
        GOOD_KEEP_PARTICIPATING
    }
}
