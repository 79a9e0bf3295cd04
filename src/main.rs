use anyhow::{Context, Result};
use attendance_sheet::cli::{self, Cli, Command, SHELL_HELP, ShellCommand};
use attendance_sheet::display;
use attendance_sheet::settings::Settings;
use attendance_sheet::tracker::Tracker;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config).context("failed to load settings")?;

    match cli.command {
        Command::Check { field, value } => {
            if field.is_valid(&value) {
                println!("{field}: valid");
            } else {
                println!("{field}: invalid. {}", field.error_message());
                std::process::exit(1);
            }
        }
        Command::Show => {
            let tracker =
                attendance_sheet::create_default_tracker(&settings, cli.roster.as_deref())?;
            println!("Attendance:\n{}", display::sheet_table(tracker.sheet()));
        }
        Command::Report { svg } => {
            let mut tracker =
                attendance_sheet::create_default_tracker(&settings, cli.roster.as_deref())?;
            let out = svg.unwrap_or_else(|| settings.sheet.chart_path.clone().into());
            show_report(&mut tracker, &out)?;
        }
        Command::Shell => {
            let mut tracker =
                attendance_sheet::create_default_tracker(&settings, cli.roster.as_deref())?;
            run_shell(&mut tracker, Path::new(&settings.sheet.chart_path))?;
        }
    }

    Ok(())
}

/// Requests the report, prints it, and writes the chart that was drawn for it.
fn show_report(tracker: &mut Tracker, out: &Path) -> Result<()> {
    if let Some(report) = tracker.request_report() {
        println!("Session report:\n{}", display::report_table(report));
    }
    write_chart(tracker, out)
}

fn write_chart(tracker: &Tracker, out: &Path) -> Result<()> {
    std::fs::write(out, tracker.canvas().to_svg())
        .with_context(|| format!("failed to write chart to {}", out.display()))?;
    info!(path = %out.display(), "wrote session chart");
    Ok(())
}

fn run_shell(tracker: &mut Tracker, chart_path: &Path) -> Result<()> {
    println!("{}", display::sheet_table(tracker.sheet()));
    println!("Type help for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match cli::parse_shell_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Toggle { row, kind, session } => {
                match tracker.toggle(row - 1, kind, session - 1) {
                    Some(display) => println!(
                        "Row {row}: {} absences, {} participations, {}: {}",
                        display.absences, display.participations, display.tier, display.message
                    ),
                    None => eprintln!("No checkbox at row {row}, session {session}."),
                }
            }
            ShellCommand::Report => show_report(tracker, chart_path)?,
            ShellCommand::Input { field, value } => {
                if !tracker.form_input(field, &value) {
                    println!("{field}: {}", field.error_message());
                }
            }
            ShellCommand::Blur(field) => {
                if !tracker.form_blur(field) {
                    println!("{field}: {}", field.error_message());
                }
            }
            ShellCommand::Submit => {
                let was_visible = tracker.report_visible();
                match tracker.submit_form() {
                    Ok(index) => {
                        println!("Student added locally as row {}.", index + 1);
                        if was_visible {
                            write_chart(tracker, chart_path)?;
                        }
                    }
                    Err(invalid) => {
                        for field in invalid {
                            println!("{field}: {}", field.error_message());
                        }
                    }
                }
            }
            ShellCommand::Show => println!("{}", display::sheet_table(tracker.sheet())),
            ShellCommand::Help => println!("{SHELL_HELP}"),
            ShellCommand::Quit => break,
        }
    }

    Ok(())
}
