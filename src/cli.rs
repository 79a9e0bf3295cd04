//! This module contains the command-line interface [`Cli`] parser for the attendance sheet, and
//! the parser for the commands accepted by the interactive `shell`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::FlagKind;
use crate::validation::Field;

/// The command line configuration struct, where the command-line interface parser is automatically
/// derived by [`clap::Parser`].
#[derive(Parser, Debug)]
#[command(name = "attendance-sheet")]
#[command(about = "Session attendance and participation tracker", long_about = None)]
pub struct Cli {
    /// Configuration file to load, without extension.
    #[arg(long, global = true, default_value = "config")]
    pub config: String,

    /// Roster CSV to load instead of the configured one.
    #[arg(long, global = true)]
    pub roster: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every student with their attendance standing.
    Show,

    /// Print per-session totals and draw them as a bar chart.
    Report {
        /// Where to write the SVG chart. Defaults to the configured chart path.
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Check a single add-student form value.
    Check { field: Field, value: String },

    /// Work on the sheet interactively.
    Shell,
}

/// A line typed into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Flip a checkbox. `row` and `session` are 1-indexed as shown to the user.
    Toggle {
        row: usize,
        kind: FlagKind,
        session: usize,
    },
    Report,
    Input { field: Field, value: String },
    Blur(Field),
    Submit,
    Show,
    Help,
    Quit,
}

pub const SHELL_HELP: &str = "\
Commands:
  toggle <row> session|part <n>   flip a checkbox (rows and sessions count from 1)
  report                          show per-session totals and draw the chart
  input <field> <value>           type into a form field (student-id, last-name, first-name, email)
  blur <field>                    leave a form field
  submit                          add the student in the form
  show                            show the sheet
  help                            show this message
  quit                            leave the shell";

pub fn parse_shell_command(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("empty command".to_string());
    };

    match verb {
        "toggle" => {
            let row = parse_position(words.next(), "row")?;
            let kind = match words.next() {
                Some("session" | "s") => FlagKind::Attended,
                Some("part" | "participation" | "p") => FlagKind::Participated,
                Some(other) => return Err(format!("'{other}' is neither session nor part")),
                None => return Err("missing checkbox kind (session or part)".to_string()),
            };
            let session = parse_position(words.next(), "session")?;
            Ok(ShellCommand::Toggle { row, kind, session })
        }
        "report" => Ok(ShellCommand::Report),
        "input" => {
            let field = parse_field(words.next())?;
            let value = words.collect::<Vec<_>>().join(" ");
            Ok(ShellCommand::Input { field, value })
        }
        "blur" => Ok(ShellCommand::Blur(parse_field(words.next())?)),
        "submit" => Ok(ShellCommand::Submit),
        "show" => Ok(ShellCommand::Show),
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}', try help")),
    }
}

fn parse_position(word: Option<&str>, what: &str) -> Result<usize, String> {
    let word = word.ok_or_else(|| format!("missing {what} number"))?;
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{word}' is not a {what} number")),
    }
}

fn parse_field(word: Option<&str>) -> Result<Field, String> {
    let word = word.ok_or_else(|| "missing field name".to_string())?;
    Field::from_str(word, true)
}
