//! The records that make up an attendance sheet.

use std::fmt;

/// The number of sessions tracked for every student.
pub const SESSION_COUNT: usize = 6;

/// One boolean per session, in session order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SessionFlags([bool; SESSION_COUNT]);

impl SessionFlags {
    pub fn new(flags: [bool; SESSION_COUNT]) -> Self {
        Self(flags)
    }

    /// Returns the flag for the 0-indexed `session`, or `None` if there is no such session.
    pub fn get(&self, session: usize) -> Option<bool> {
        self.0.get(session).copied()
    }

    /// Sets the flag for the 0-indexed `session`. Returns `false` if there is no such session.
    pub fn set(&mut self, session: usize, value: bool) -> bool {
        match self.0.get_mut(session) {
            Some(flag) => {
                *flag = value;
                true
            }
            None => false,
        }
    }

    /// The number of flags that are set.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&flag| flag).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

impl From<[bool; SESSION_COUNT]> for SessionFlags {
    fn from(flags: [bool; SESSION_COUNT]) -> Self {
        Self(flags)
    }
}

/// Which of a student's two flag sequences a change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Attended,
    Participated,
}

/// Typed access to the twelve flags of a row.
///
/// Anything that can answer these two questions can be evaluated and aggregated.
pub trait AttendanceRecord {
    fn attended(&self) -> &SessionFlags;
    fn participated(&self) -> &SessionFlags;
}

/// A student on the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub course: String,
    pub attended: SessionFlags,
    pub participated: SessionFlags,
}

impl StudentRow {
    /// Creates a student with every flag cleared.
    pub fn new(id: &str, last_name: &str, first_name: &str, course: &str) -> Self {
        Self {
            id: id.to_string(),
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            course: course.to_string(),
            attended: SessionFlags::default(),
            participated: SessionFlags::default(),
        }
    }

    pub fn flags(&self, kind: FlagKind) -> &SessionFlags {
        match kind {
            FlagKind::Attended => &self.attended,
            FlagKind::Participated => &self.participated,
        }
    }

    pub fn flags_mut(&mut self, kind: FlagKind) -> &mut SessionFlags {
        match kind {
            FlagKind::Attended => &mut self.attended,
            FlagKind::Participated => &mut self.participated,
        }
    }
}

impl AttendanceRecord for StudentRow {
    fn attended(&self) -> &SessionFlags {
        &self.attended
    }

    fn participated(&self) -> &SessionFlags {
        &self.participated
    }
}

/// Severity bucket derived from a student's absence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    pub fn from_absences(absences: usize) -> Self {
        if absences >= 5 {
            Tier::High
        } else if absences >= 3 {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    /// The visual class applied to the row.
    pub fn class(&self) -> &'static str {
        match self {
            Tier::Low => "abs-low",
            Tier::Mid => "abs-mid",
            Tier::High => "abs-high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}
