use config::{Config, Environment, File, Source};
use serde::Deserialize;

use crate::chart::ChartLayout;
use crate::error::SheetError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
    /// CSV file holding the initial rows.
    pub roster_path: String,
    /// Course assigned to students added through the form.
    pub course_tag: String,
    /// Where `report` writes the chart.
    pub chart_path: String,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            roster_path: "demos/roster.csv".to_string(),
            course_tag: "AWP".to_string(),
            chart_path: "session-report.svg".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sheet: SheetSettings,
    pub chart: ChartLayout,
}

impl Settings {
    /// Loads settings from the optional config file `name` (any extension `config` knows),
    /// then from `ATTENDANCE__SECTION__KEY` environment variables. Anything left unset keeps
    /// its default.
    pub fn load(name: &str) -> Result<Self, SheetError> {
        dotenvy::dotenv().ok();
        Self::from_sources(File::with_name(name).required(false), environment())
    }

    fn from_sources<S>(file: S, env: Environment) -> Result<Self, SheetError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder().add_source(file).add_source(env).build()?;
        Ok(settings.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ATTENDANCE")
        .separator("__")
        .try_parsing(true)
}
