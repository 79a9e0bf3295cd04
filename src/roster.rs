//! Loads the initial sheet content from a roster CSV.
//!
//! The expected header is
//! `id,last_name,first_name,course,session_1..session_6,participation_1..participation_6`.

use serde::{Deserialize, Deserializer, de};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

use crate::error::SheetError;
use crate::models::{SessionFlags, StudentRow};
use crate::validation::Field;

#[derive(Debug, Deserialize)]
struct RosterRecord {
    id: String,
    last_name: String,
    first_name: String,
    #[serde(default)]
    course: Option<String>,
    #[serde(deserialize_with = "flag")]
    session_1: bool,
    #[serde(deserialize_with = "flag")]
    session_2: bool,
    #[serde(deserialize_with = "flag")]
    session_3: bool,
    #[serde(deserialize_with = "flag")]
    session_4: bool,
    #[serde(deserialize_with = "flag")]
    session_5: bool,
    #[serde(deserialize_with = "flag")]
    session_6: bool,
    #[serde(deserialize_with = "flag")]
    participation_1: bool,
    #[serde(deserialize_with = "flag")]
    participation_2: bool,
    #[serde(deserialize_with = "flag")]
    participation_3: bool,
    #[serde(deserialize_with = "flag")]
    participation_4: bool,
    #[serde(deserialize_with = "flag")]
    participation_5: bool,
    #[serde(deserialize_with = "flag")]
    participation_6: bool,
}

impl RosterRecord {
    fn into_student(self, default_course: &str) -> StudentRow {
        let course = self
            .course
            .map(|course| course.trim().to_string())
            .filter(|course| !course.is_empty())
            .unwrap_or_else(|| default_course.to_string());

        StudentRow {
            id: self.id.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            course,
            attended: SessionFlags::new([
                self.session_1,
                self.session_2,
                self.session_3,
                self.session_4,
                self.session_5,
                self.session_6,
            ]),
            participated: SessionFlags::new([
                self.participation_1,
                self.participation_2,
                self.participation_3,
                self.participation_4,
                self.participation_5,
                self.participation_6,
            ]),
        }
    }
}

/// Accepts the ways a checkbox tends to be written in a spreadsheet. An empty cell is unchecked.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Ok(false),
        "1" | "true" | "yes" | "y" | "x" => Ok(true),
        other => Err(de::Error::custom(format!("'{}' is not a checkbox value", other))),
    }
}

/// Reads every student from `reader`. Rows without a course get `default_course`.
pub fn read_roster<R: io::Read>(
    reader: R,
    default_course: &str,
) -> Result<Vec<StudentRow>, SheetError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut students = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        let parsed: RosterRecord = record.deserialize(Some(&headers))?;

        if !Field::StudentId.is_valid(&parsed.id) {
            return Err(SheetError::InvalidRoster {
                line,
                reason: format!("student ID '{}' must contain digits only", parsed.id),
            });
        }

        students.push(parsed.into_student(default_course));
    }

    Ok(students)
}

/// Reads the roster CSV at `path`.
pub fn load_roster(
    path: impl AsRef<Path>,
    default_course: &str,
) -> Result<Vec<StudentRow>, SheetError> {
    let path = path.as_ref();
    let students = read_roster(File::open(path)?, default_course)?;
    info!(path = %path.display(), students = students.len(), "loaded roster");
    Ok(students)
}
