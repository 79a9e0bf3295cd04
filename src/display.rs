use tabled::{Table, Tabled, settings::Style};

use crate::models::SessionFlags;
use crate::report::SessionReport;
use crate::sheet::Sheet;

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Last name")]
    last_name: String,
    #[tabled(rename = "First name")]
    first_name: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Sessions")]
    attended: String,
    #[tabled(rename = "Participation")]
    participated: String,
    #[tabled(rename = "Abs")]
    absences: usize,
    #[tabled(rename = "Part")]
    participations: usize,
    #[tabled(rename = "Class")]
    class: &'static str,
    #[tabled(rename = "Message")]
    message: &'static str,
}

#[derive(Tabled)]
struct DisplaySession {
    #[tabled(rename = "Session")]
    session: String,
    #[tabled(rename = "Total")]
    total: usize,
    #[tabled(rename = "Present")]
    present: usize,
    #[tabled(rename = "Participated")]
    participated: usize,
}

/// One mark per session: `●` when set, `·` otherwise.
pub fn marks(flags: &SessionFlags) -> String {
    flags.iter().map(|flag| if flag { '●' } else { '·' }).collect()
}

/// Renders every row with its displayed values. Rows are numbered from 1.
pub fn sheet_table(sheet: &Sheet) -> String {
    let rows: Vec<DisplayRow> = sheet
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| DisplayRow {
            index: i + 1,
            id: row.student.id.clone(),
            last_name: row.student.last_name.clone(),
            first_name: row.student.first_name.clone(),
            course: row.student.course.clone(),
            attended: marks(&row.student.attended),
            participated: marks(&row.student.participated),
            absences: row.display.absences,
            participations: row.display.participations,
            class: row.display.tier.class(),
            message: row.display.message,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

pub fn report_table(report: &SessionReport) -> String {
    let sessions: Vec<DisplaySession> = report
        .sessions()
        .map(|totals| DisplaySession {
            session: format!("S{}", totals.session),
            total: totals.total,
            present: totals.present,
            participated: totals.participated,
        })
        .collect();

    let mut table = Table::new(sessions);
    table.with(Style::modern());
    table.to_string()
}
