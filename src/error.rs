use std::fmt;
use std::io;

/// Failures while loading the sheet's inputs. Evaluating, aggregating and drawing never fail.
#[derive(Debug)]
pub enum SheetError {
    Config(config::ConfigError),
    Csv(csv::Error),
    Io(io::Error),
    /// A roster line that parsed as CSV but does not describe a student.
    InvalidRoster { line: u64, reason: String },
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::Config(err) => write!(f, "invalid configuration: {}", err),
            SheetError::Csv(err) => write!(f, "could not read roster: {}", err),
            SheetError::Io(err) => write!(f, "{}", err),
            SheetError::InvalidRoster { line, reason } => {
                write!(f, "roster line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetError::Config(err) => Some(err),
            SheetError::Csv(err) => Some(err),
            SheetError::Io(err) => Some(err),
            SheetError::InvalidRoster { .. } => None,
        }
    }
}

impl From<config::ConfigError> for SheetError {
    fn from(err: config::ConfigError) -> Self {
        SheetError::Config(err)
    }
}

impl From<csv::Error> for SheetError {
    fn from(err: csv::Error) -> Self {
        SheetError::Csv(err)
    }
}

impl From<io::Error> for SheetError {
    fn from(err: io::Error) -> Self {
        SheetError::Io(err)
    }
}
