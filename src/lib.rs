use anyhow::{Context, Result};
use std::path::Path;

pub mod chart;
pub mod cli;
pub mod display;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod form;
pub mod models;
pub mod report;
pub mod roster;
pub mod settings;
pub mod sheet;
pub mod tracker;
pub mod validation;

use crate::chart::SvgCanvas;
use crate::settings::Settings;
use crate::sheet::Sheet;
use crate::tracker::Tracker;

/// Builds a tracker over the configured roster, or over `roster` when given.
pub fn create_default_tracker(settings: &Settings, roster: Option<&Path>) -> Result<Tracker> {
    let roster_path = roster.unwrap_or_else(|| Path::new(&settings.sheet.roster_path));

    let students = roster::load_roster(roster_path, &settings.sheet.course_tag)
        .with_context(|| format!("failed to load roster {}", roster_path.display()))?;

    Ok(Tracker::new(
        Sheet::new(students),
        settings.chart.clone(),
        &settings.sheet.course_tag,
        SvgCanvas::new(),
    ))
}
