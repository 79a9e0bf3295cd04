//! Pattern checks for the add-student form.

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static STUDENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("student ID pattern is valid"));
static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ' -]+$").expect("name pattern is valid"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern is valid")
});

/// A tracked input on the add-student form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Field {
    StudentId,
    LastName,
    FirstName,
    Email,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 4] = [
        Field::StudentId,
        Field::LastName,
        Field::FirstName,
        Field::Email,
    ];

    /// Tests a raw input value. Surrounding whitespace is ignored.
    pub fn is_valid(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Field::StudentId => STUDENT_ID.is_match(value),
            Field::LastName | Field::FirstName => NAME.is_match(value),
            Field::Email => EMAIL.is_match(value),
        }
    }

    /// The message shown next to the field while it is invalid.
    pub fn error_message(&self) -> &'static str {
        match self {
            Field::StudentId => "The student ID must contain digits only.",
            Field::LastName => "The last name may only contain letters, spaces, hyphens and apostrophes.",
            Field::FirstName => "The first name may only contain letters, spaces, hyphens and apostrophes.",
            Field::Email => "Enter an email address such as name@example.com.",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Field::StudentId => 0,
            Field::LastName => 1,
            Field::FirstName => 2,
            Field::Email => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::StudentId => "student-id",
            Field::LastName => "last-name",
            Field::FirstName => "first-name",
            Field::Email => "email",
        })
    }
}
