use attendance_sheet::chart::{ChartLayout, SvgCanvas};
use attendance_sheet::evaluator::{EXCLUDED, WARNING_LOW_PARTICIPATION};
use attendance_sheet::models::{FlagKind, SESSION_COUNT, SessionFlags, StudentRow, Tier};
use attendance_sheet::roster::read_roster;
use attendance_sheet::sheet::Sheet;
use attendance_sheet::tracker::Tracker;
use attendance_sheet::validation::Field;

const ROSTER: &str = "\
id,last_name,first_name,course,session_1,session_2,session_3,session_4,session_5,session_6,participation_1,participation_2,participation_3,participation_4,participation_5,participation_6
1001,Benali,Yasmine,AWP,1,1,1,1,1,1,1,1,1,1,0,0
1002,Durand,Lucas,AWP,1,1,0,1,0,1,1,0,0,1,0,0
1003,Haddad,Inès,AWP,1,0,0,0,1,0,0,0,1,0,0,0
";

fn tracker() -> Tracker {
    let students = read_roster(ROSTER.as_bytes(), "AWP").unwrap();
    Tracker::new(
        Sheet::new(students),
        ChartLayout::default(),
        "AWP",
        SvgCanvas::new(),
    )
}

fn fill_form(tracker: &mut Tracker) {
    assert!(tracker.form_input(Field::StudentId, "1004"));
    assert!(tracker.form_input(Field::LastName, "O'Neill"));
    assert!(tracker.form_input(Field::FirstName, "Sean"));
    assert!(tracker.form_input(Field::Email, "sean.oneill@example.com"));
}

#[test]
fn load_evaluates_every_row() {
    let tracker = tracker();
    let tiers: Vec<Tier> = tracker
        .sheet()
        .rows()
        .iter()
        .map(|row| row.display.tier)
        .collect();
    assert_eq!(tiers, vec![Tier::Low, Tier::Low, Tier::Mid]);
    assert_eq!(tracker.sheet().rows()[2].display.message, WARNING_LOW_PARTICIPATION);
}

#[test]
fn toggling_updates_only_the_changed_row() {
    let mut tracker = tracker();
    let others: Vec<_> = tracker.sheet().rows()[1..]
        .iter()
        .map(|row| row.display)
        .collect();

    for session in 0..5 {
        tracker.toggle(0, FlagKind::Attended, session);
    }

    let first = tracker.sheet().rows()[0].display;
    assert_eq!(first.absences, 5);
    assert_eq!(first.tier, Tier::High);
    assert_eq!(first.message, EXCLUDED);

    let after: Vec<_> = tracker.sheet().rows()[1..]
        .iter()
        .map(|row| row.display)
        .collect();
    assert_eq!(after, others);
}

#[test]
fn report_request_draws_and_reveals_the_chart() {
    let mut tracker = tracker();
    assert!(tracker.canvas().is_blank());
    assert!(!tracker.report_visible());

    let report = tracker.request_report().cloned().unwrap();
    assert_eq!(report.total, [3; SESSION_COUNT]);
    assert_eq!(report.present, [3, 2, 1, 2, 2, 2]);
    assert_eq!(report.participated, [2, 1, 2, 2, 0, 0]);

    assert!(tracker.report_visible());
    let svg = tracker.canvas().to_svg();
    assert_eq!(svg.matches("<rect").count(), SESSION_COUNT * 3);
    assert!(svg.contains(">S6</text>"));
}

#[test]
fn adding_a_row_redraws_a_visible_chart() {
    let mut tracker = tracker();
    tracker.request_report();
    let before = tracker.canvas().to_svg();

    fill_form(&mut tracker);
    let index = tracker.submit_form().unwrap();
    assert_eq!(index, 3);

    let added = &tracker.sheet().rows()[index];
    assert_eq!(added.student.course, "AWP");
    assert_eq!(added.student.attended, SessionFlags::default());
    assert_eq!(added.display.absences, SESSION_COUNT);
    assert_eq!(added.display.tier, Tier::High);

    let after = tracker.canvas().to_svg();
    assert_ne!(after, before);
    assert_eq!(tracker.state().last_report.as_ref().unwrap().total, [4; SESSION_COUNT]);
    assert!(tracker.form().visible_errors().is_empty());
}

#[test]
fn rejected_submission_adds_nothing() {
    let mut tracker = tracker();
    fill_form(&mut tracker);
    assert!(!tracker.form_input(Field::StudentId, "12a3"));
    assert!(!tracker.form_input(Field::Email, "a@b"));

    let invalid = tracker.submit_form().unwrap_err();
    assert_eq!(invalid, vec![Field::StudentId, Field::Email]);
    assert_eq!(tracker.form().visible_errors(), invalid);
    assert_eq!(tracker.sheet().len(), 3);
}

#[test]
fn empty_sheet_reports_and_draws_zeros() {
    let mut tracker = Tracker::new(
        Sheet::default(),
        ChartLayout::default(),
        "AWP",
        SvgCanvas::new(),
    );

    let report = tracker.request_report().cloned().unwrap();
    assert_eq!(report.total, [0; SESSION_COUNT]);
    assert_eq!(report.present, [0; SESSION_COUNT]);
    assert_eq!(report.participated, [0; SESSION_COUNT]);
    assert!(!tracker.canvas().to_svg().contains("NaN"));
}

#[test]
fn new_students_start_with_no_flags() {
    let row = StudentRow::new("1", "Lee", "Avery", "AWP");
    let mut sheet = Sheet::default();
    sheet.push(row);
    assert_eq!(sheet.rows()[0].display.participations, 0);
}
